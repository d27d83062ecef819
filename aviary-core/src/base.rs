//! Core functionalities.
mod env;
mod space;
mod step;

pub use env::{AgentId, ParallelEnv};
pub use space::Space;
pub use step::StepOutput;
