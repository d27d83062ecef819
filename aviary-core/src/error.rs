//! Errors in the library.
use crate::AgentId;
use thiserror::Error;

/// Errors raised by environments and wrappers.
///
/// There are no retries anywhere in the library: every failure is terminal
/// to the current call and propagates to the caller.
#[derive(Error, Debug)]
pub enum AviaryError {
    /// The action map passed to `step` lacks an entry for an active agent.
    #[error("missing action for active agent {0}")]
    MissingAction(AgentId),

    /// The action map passed to `step` has an entry for an agent that is
    /// inactive or unknown.
    #[error("action supplied for unknown or inactive agent {0}")]
    UnexpectedAction(AgentId),

    /// A render mode outside the recognized set was requested.
    #[error("unrecognized render mode: {0}")]
    UnknownRenderMode(String),

    /// The initial position map has no entry for a configured agent.
    #[error("no initial position for agent {0}")]
    MissingInitialPosition(AgentId),

    /// The initial position map has an entry for a name outside the
    /// configured agent list.
    #[error("initial position keyed by unknown agent {0}")]
    UnknownPositionKey(String),

    /// A task requires a target the configuration does not provide.
    #[error("target {0} not present in the target map")]
    MissingTarget(String),

    /// A linearization weight vector does not match the reward vector.
    #[error("weight vector for agent {agent} has {weights} entries, reward has {rewards}")]
    WeightShape {
        /// Agent the weights belong to.
        agent: AgentId,
        /// Length of the weight vector.
        weights: usize,
        /// Length of the reward vector.
        rewards: usize,
    },

    /// A reward component index is out of range for an agent's reward.
    #[error("reward component index {index} out of range for agent {agent} ({rewards} components)")]
    RewardIndex {
        /// Agent the index applies to.
        agent: AgentId,
        /// The out-of-range component index.
        index: usize,
        /// Length of the reward vector.
        rewards: usize,
    },
}
