//! Environment.
use super::{Space, StepOutput};
use anyhow::Result;
use std::collections::HashMap;
use std::fmt::Debug;

/// Identifier of one agent, unique within an environment.
pub type AgentId = String;

/// Represents a parallel multi-agent environment.
///
/// All agents act simultaneously: one call to [`ParallelEnv::step`] consumes
/// an action for every currently active agent and yields per-agent
/// observations, rewards, termination/truncation flags and infos. Rewards
/// may be vectors (one entry per objective); single-objective environments
/// simply use one-element vectors.
///
/// An environment goes through the following lifecycle: it is built with
/// [`ParallelEnv::build`], becomes ready on the first [`ParallelEnv::reset`],
/// is stepped until every agent has terminated or been truncated, and can be
/// reset again any number of times. [`ParallelEnv::close`] releases
/// rendering resources and is idempotent.
pub trait ParallelEnv {
    /// Configuration of the environment.
    type Config: Clone;

    /// Observation of a single agent.
    type Obs: Clone + Debug;

    /// Action of a single agent.
    type Act: Clone + Debug;

    /// Reward of a single agent.
    type Reward: Clone + Debug;

    /// Additional per-agent information emitted at each step.
    type Info: Clone + Debug;

    /// Builds an environment with a given random seed.
    ///
    /// Configuration problems (malformed position maps, unknown render
    /// modes, missing targets) are reported here, before any episode runs.
    fn build(config: &Self::Config, seed: u64) -> Result<Self>
    where
        Self: Sized;

    /// The full agent list set at construction. Immutable for the lifetime
    /// of the environment.
    fn possible_agents(&self) -> &[AgentId];

    /// The currently active agents, a subset of
    /// [`possible_agents`](ParallelEnv::possible_agents). Shrinks as agents
    /// terminate; restored to the full list by [`reset`](ParallelEnv::reset).
    fn agents(&self) -> &[AgentId];

    /// Returns the observation space of the given agent.
    ///
    /// The value is memoized per agent identifier: it is computed once per
    /// agent for the lifetime of the environment instance and never
    /// invalidated. Panics if `agent` is not in the possible-agent list.
    fn observation_space(&self, agent: &str) -> Space;

    /// Returns the action space of the given agent. Memoized like
    /// [`observation_space`](ParallelEnv::observation_space).
    fn action_space(&self, agent: &str) -> Space;

    /// Returns the reward space of the given agent. Memoized like
    /// [`observation_space`](ParallelEnv::observation_space).
    fn reward_space(&self, agent: &str) -> Space;

    /// Resets the environment to its initial configuration and returns the
    /// initial per-agent observations and infos.
    ///
    /// When `seed` is given, the environment RNG is reseeded; otherwise it
    /// continues from its current stream.
    #[allow(clippy::type_complexity)]
    fn reset(
        &mut self,
        seed: Option<u64>,
    ) -> Result<(HashMap<AgentId, Self::Obs>, HashMap<AgentId, Self::Info>)>;

    /// Performs one environment step.
    ///
    /// `actions` must contain exactly one entry per currently active agent;
    /// a missing or extra entry is a caller contract violation and fails
    /// fast without mutating any state.
    fn step(&mut self, actions: &HashMap<AgentId, Self::Act>) -> Result<StepOutput<Self>>
    where
        Self: Sized;

    /// Triggers one frame draw if a visual rendering mode is active;
    /// otherwise a no-op.
    fn render(&mut self) -> Result<()>;

    /// Releases rendering resources if any were allocated. Safe to call
    /// repeatedly and from any lifecycle state.
    fn close(&mut self);
}
