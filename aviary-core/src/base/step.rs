//! Environment step output.
use super::{AgentId, ParallelEnv};
use std::collections::HashMap;

/// Per-agent results of one environment step.
///
/// Every map is keyed by the agents that were active when the step was
/// taken. An environment emits a [`StepOutput`] at every interaction step;
/// training loops consume it to build transitions.
pub struct StepOutput<E: ParallelEnv + ?Sized> {
    /// Observation of each agent at the new state.
    pub observations: HashMap<AgentId, E::Obs>,

    /// Reward of each agent.
    pub rewards: HashMap<AgentId, E::Reward>,

    /// Whether each agent reached a task-defined end condition.
    pub terminations: HashMap<AgentId, bool>,

    /// Whether each agent was cut off by an external limit such as time.
    pub truncations: HashMap<AgentId, bool>,

    /// Additional per-agent information.
    pub infos: HashMap<AgentId, E::Info>,
}

impl<E: ParallelEnv + ?Sized> std::fmt::Debug for StepOutput<E>
where
    E::Obs: std::fmt::Debug,
    E::Reward: std::fmt::Debug,
    E::Info: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepOutput")
            .field("observations", &self.observations)
            .field("rewards", &self.rewards)
            .field("terminations", &self.terminations)
            .field("truncations", &self.truncations)
            .field("infos", &self.infos)
            .finish()
    }
}

impl<E: ParallelEnv> StepOutput<E> {
    /// Whether the episode is over for every agent in this output, i.e.
    /// each entry is either terminated or truncated. Vacuously true when
    /// the output is empty.
    pub fn all_done(&self) -> bool {
        self.terminations.iter().all(|(agent, terminated)| {
            *terminated || self.truncations.get(agent).copied().unwrap_or(false)
        })
    }
}
