//! Capability interface implemented by concrete swarm tasks.
use crate::env::SwarmState;
use anyhow::Result;
use aviary_core::{AgentId, Space};
use nalgebra::Vector3;
use ndarray::Array1;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;

/// Per-agent step information.
///
/// Currently empty and used to match the type signature of the parallel
/// environment contract.
#[derive(Clone, Copy, Debug, Default)]
pub struct SwarmInfo;

/// The hooks a concrete task supplies to
/// [`SwarmEnv`](crate::SwarmEnv).
///
/// A task is a plain value implementing every method below; it carries no
/// environment state of its own beyond its parameters. All episode state
/// lives in [`SwarmState`] and is passed to each hook. The compute hooks
/// return maps keyed by the currently active agents.
///
/// The engine calls the hooks in a fixed order at each step: transition
/// (when actuation is enabled), then terminated, truncation, reward,
/// observation and info, so reward and episode-end logic may rely on
/// distance-to-target at the new state.
pub trait SwarmTask {
    /// Configuration of the task.
    type Config: Clone + Debug + Default + Serialize + DeserializeOwned;

    /// Builds the task.
    fn build(config: &Self::Config) -> Result<Self>
    where
        Self: Sized;

    /// Checks task requirements against the initial state. Called once at
    /// environment build time, before any episode runs.
    fn validate(&self, _state: &SwarmState) -> Result<()> {
        Ok(())
    }

    /// Observation space of one agent. Static for the environment's
    /// lifetime; the engine memoizes the value per agent.
    fn observation_space(&self, state: &SwarmState, agent: &str) -> Space;

    /// Action space of one agent. Memoized like the observation space.
    fn action_space(&self, state: &SwarmState, agent: &str) -> Space;

    /// Reward space of one agent. Memoized like the observation space.
    fn reward_space(&self, state: &SwarmState, agent: &str) -> Space;

    /// Observation of every active agent at the current state.
    fn compute_observation(&self, state: &SwarmState) -> HashMap<AgentId, Array1<f32>>;

    /// Reward vector of every active agent.
    fn compute_reward(&self, state: &SwarmState) -> HashMap<AgentId, Vec<f32>>;

    /// Task-defined end condition per active agent.
    fn compute_terminated(&self, state: &SwarmState) -> HashMap<AgentId, bool>;

    /// External-limit end condition per active agent.
    fn compute_truncation(&self, state: &SwarmState) -> HashMap<AgentId, bool>;

    /// Additional information per active agent.
    fn compute_info(&self, state: &SwarmState) -> HashMap<AgentId, SwarmInfo>;

    /// Maps the per-agent action map to new positions. Only called while
    /// live rendering/actuation is enabled. The hook may also move targets
    /// through [`SwarmState::set_target`] or draw from
    /// [`SwarmState::rng_mut`]; the engine installs the returned positions
    /// and maintains the previous-position map.
    fn transition_state(
        &mut self,
        state: &mut SwarmState,
        actions: &HashMap<AgentId, Vector3<f32>>,
    ) -> HashMap<AgentId, Vector3<f32>>;
}
