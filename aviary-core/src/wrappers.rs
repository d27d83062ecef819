//! Reward-transforming wrappers around [`ParallelEnv`](crate::ParallelEnv)
//! implementations.
//!
//! Wrappers preserve the full step/reset/render/close contract of the inner
//! environment; only the reward payload is transformed.
mod linearize;
mod normalize;

#[cfg(test)]
pub(crate) mod testing;

pub use linearize::{LinearizeReward, LinearizeRewardConfig, LinearizedReward};
pub use normalize::{NormalizeReward, NormalizeRewardConfig};
