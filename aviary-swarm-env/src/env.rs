//! Lifecycle engine for swarm environments.
mod config;
mod state;
mod window;

pub use config::{RenderMode, SwarmEnvConfig};
pub use state::{distance, reached, SwarmState, CLOSENESS_THRESHOLD};
pub use window::{RENDER_FPS, WINDOW_SIZE};

use crate::render;
use crate::task::{SwarmInfo, SwarmTask};
use anyhow::Result;
use aviary_core::{error::AviaryError, AgentId, ParallelEnv, Space, StepOutput};
use log::trace;
use nalgebra::Vector3;
use ndarray::Array1;
use std::cell::RefCell;
use std::collections::HashMap;
use window::SwarmWindow;

/// A fleet of drones flying inside a bounded arena.
///
/// The engine owns the episode state and drives the lifecycle
/// (reset / step / render / close). Everything task-specific, namely the
/// spaces, observations, rewards, episode-end conditions and the state
/// transition, comes from the [`SwarmTask`] it wraps.
///
/// The transition hook only runs while live rendering/actuation is enabled
/// (`Human` or `Real` mode); with rendering disabled the environment
/// evaluates the task hooks over the stored state without moving anything.
pub struct SwarmEnv<T: SwarmTask> {
    task: T,
    state: SwarmState,
    render_mode: RenderMode,
    window: Option<SwarmWindow>,
    observation_spaces: RefCell<HashMap<AgentId, Space>>,
    action_spaces: RefCell<HashMap<AgentId, Space>>,
    reward_spaces: RefCell<HashMap<AgentId, Space>>,
}

impl<T: SwarmTask> std::fmt::Debug for SwarmEnv<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwarmEnv")
            .field("render_mode", &self.render_mode)
            .finish_non_exhaustive()
    }
}

impl<T: SwarmTask> SwarmEnv<T> {
    /// Builds an environment around an already-constructed task.
    ///
    /// Fails fast on configuration problems: position maps not keyed
    /// exactly by the agent-name list, a configured target id without a
    /// position, or task requirements not met by the initial state.
    pub fn new(config: &SwarmEnvConfig<T>, task: T, seed: u64) -> Result<Self> {
        config.validate()?;

        let init_positions = config
            .init_flying_pos
            .iter()
            .map(|(name, p)| (name.clone(), Vector3::new(p[0], p[1], p[2])))
            .collect();
        let init_targets = config
            .target_location
            .iter()
            .map(|(name, p)| (name.clone(), Vector3::new(p[0], p[1], p[2])))
            .collect();
        let state = SwarmState::new(
            config.agent_names.clone(),
            init_positions,
            init_targets,
            config.size,
            seed,
        );
        task.validate(&state)?;

        Ok(Self {
            task,
            state,
            render_mode: config.render_mode,
            window: None,
            observation_spaces: RefCell::new(HashMap::new()),
            action_spaces: RefCell::new(HashMap::new()),
            reward_spaces: RefCell::new(HashMap::new()),
        })
    }

    /// Read access to the episode state.
    pub fn swarm_state(&self) -> &SwarmState {
        &self.state
    }

    /// Global state vector: the per-agent observation vectors concatenated
    /// over the possible-agent list.
    pub fn state(&self) -> Array1<f32> {
        let observations = self.task.compute_observation(&self.state);
        let mut values = Vec::new();
        for agent in self.state.possible_agents() {
            if let Some(observation) = observations.get(agent) {
                values.extend(observation.iter().copied());
            }
        }
        Array1::from(values)
    }

    fn memoized_space<F>(
        &self,
        cache: &RefCell<HashMap<AgentId, Space>>,
        agent: &str,
        compute: F,
    ) -> Space
    where
        F: FnOnce() -> Space,
    {
        assert!(
            self.state.possible_agents().iter().any(|a| a == agent),
            "unknown agent identifier: {}",
            agent
        );
        if let Some(space) = cache.borrow().get(agent) {
            return space.clone();
        }
        // First access for this agent; the cached value is never
        // invalidated afterwards.
        let space = compute();
        cache.borrow_mut().insert(agent.to_string(), space.clone());
        space
    }

    fn validate_actions(&self, actions: &HashMap<AgentId, Vector3<f32>>) -> Result<(), AviaryError> {
        for agent in self.state.agents() {
            if !actions.contains_key(agent) {
                return Err(AviaryError::MissingAction(agent.clone()));
            }
        }
        for agent in actions.keys() {
            if !self.state.agents().contains(agent) {
                return Err(AviaryError::UnexpectedAction(agent.clone()));
            }
        }
        Ok(())
    }

    fn draw_frame(&mut self) -> Result<()> {
        if self.window.is_none() {
            self.window = Some(SwarmWindow::new()?);
        }

        let state = &self.state;
        if let Some(window) = self.window.as_mut() {
            let (mut frame, camera) = window.scene();
            render::clear(&mut frame, render::BACKGROUND);
            render::field(&mut frame, camera, state.size());
            render::axes(&mut frame, camera, state.size() as f32);
            for agent in state.possible_agents() {
                if let Some(position) = state.position(agent) {
                    render::point(&mut frame, camera, position);
                }
            }
            for position in state.targets().values() {
                render::target_point(&mut frame, camera, position);
            }
            window.present()?;
        }
        Ok(())
    }
}

impl<T: SwarmTask> ParallelEnv for SwarmEnv<T> {
    type Config = SwarmEnvConfig<T>;
    type Obs = Array1<f32>;
    type Act = Vector3<f32>;
    type Reward = Vec<f32>;
    type Info = SwarmInfo;

    fn build(config: &Self::Config, seed: u64) -> Result<Self> {
        let task = T::build(&config.task_config)?;
        Self::new(config, task, seed)
    }

    fn possible_agents(&self) -> &[AgentId] {
        self.state.possible_agents()
    }

    fn agents(&self) -> &[AgentId] {
        self.state.agents()
    }

    fn observation_space(&self, agent: &str) -> Space {
        self.memoized_space(&self.observation_spaces, agent, || {
            self.task.observation_space(&self.state, agent)
        })
    }

    fn action_space(&self, agent: &str) -> Space {
        self.memoized_space(&self.action_spaces, agent, || {
            self.task.action_space(&self.state, agent)
        })
    }

    fn reward_space(&self, agent: &str) -> Space {
        self.memoized_space(&self.reward_spaces, agent, || {
            self.task.reward_space(&self.state, agent)
        })
    }

    fn reset(
        &mut self,
        seed: Option<u64>,
    ) -> Result<(HashMap<AgentId, Self::Obs>, HashMap<AgentId, Self::Info>)> {
        trace!("SwarmEnv::reset()");
        self.state.reset(seed);

        let observations = self.task.compute_observation(&self.state);
        let infos = self.task.compute_info(&self.state);

        if self.render_mode == RenderMode::Human {
            self.draw_frame()?;
        }
        Ok((observations, infos))
    }

    fn step(&mut self, actions: &HashMap<AgentId, Self::Act>) -> Result<StepOutput<Self>> {
        trace!("SwarmEnv::step()");
        self.validate_actions(actions)?;
        self.state.advance_time();

        if self.render_mode.is_live() {
            self.state.begin_transition();
            let new_positions = self.task.transition_state(&mut self.state, actions);
            self.state.commit_positions(new_positions);
            if self.render_mode == RenderMode::Human {
                self.draw_frame()?;
            }
        }

        // Episode-end flags first: reward logic may depend on them through
        // the distances at the new state.
        let terminations = self.task.compute_terminated(&self.state);
        let truncations = self.task.compute_truncation(&self.state);
        let rewards = self.task.compute_reward(&self.state);
        let observations = self.task.compute_observation(&self.state);
        let infos = self.task.compute_info(&self.state);

        self.state.remove_done_agents(&terminations, &truncations);

        Ok(StepOutput {
            observations,
            rewards,
            terminations,
            truncations,
            infos,
        })
    }

    fn render(&mut self) -> Result<()> {
        if self.render_mode == RenderMode::Human {
            self.draw_frame()?;
        }
        Ok(())
    }

    fn close(&mut self) {
        self.window = None;
    }
}
