//! Configuration of [`SwarmEnv`](super::SwarmEnv).
use crate::task::SwarmTask;
use anyhow::Result;
use aviary_core::{error::AviaryError, AgentId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;
use std::str::FromStr;

/// How the environment is displayed and actuated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Headless. The transition hook does not run; the environment only
    /// evaluates the task hooks over the stored state.
    None,
    /// Live rendering in an on-screen window.
    Human,
    /// Field deployment mode: actuates the simulated state without opening
    /// a window. The physical radio link of a real deployment is out of
    /// scope; the mode is accepted for API compatibility.
    Real,
}

impl Default for RenderMode {
    fn default() -> Self {
        RenderMode::None
    }
}

impl RenderMode {
    /// Whether live rendering/actuation is enabled, i.e. the transition
    /// hook runs at each step.
    pub fn is_live(self) -> bool {
        !matches!(self, RenderMode::None)
    }
}

impl FromStr for RenderMode {
    type Err = AviaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(RenderMode::None),
            "human" => Ok(RenderMode::Human),
            "real" => Ok(RenderMode::Real),
            other => Err(AviaryError::UnknownRenderMode(other.to_string())),
        }
    }
}

/// Configuration of [`SwarmEnv`](super::SwarmEnv).
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct SwarmEnvConfig<T: SwarmTask> {
    /// Ordered agent names; keys of the position maps.
    pub agent_names: Vec<AgentId>,
    /// Radio identifiers of the physical drones, parallel to
    /// `agent_names`. Ignored outside physical deployment.
    pub drone_ids: Vec<u32>,
    /// Target controlled by a real drone in field deployments. Must be a
    /// key of `target_location` when set.
    pub target_id: Option<String>,
    /// Initial XYZ position per agent.
    pub init_flying_pos: HashMap<AgentId, [f32; 3]>,
    /// XYZ position per target.
    pub target_location: HashMap<String, [f32; 3]>,
    /// Side length of the flying area.
    pub size: i32,
    /// Rendering/actuation mode.
    pub render_mode: RenderMode,
    /// Configuration of the task built by `SwarmEnv::build`.
    pub task_config: T::Config,
}

impl<T: SwarmTask> Clone for SwarmEnvConfig<T> {
    fn clone(&self) -> Self {
        Self {
            agent_names: self.agent_names.clone(),
            drone_ids: self.drone_ids.clone(),
            target_id: self.target_id.clone(),
            init_flying_pos: self.init_flying_pos.clone(),
            target_location: self.target_location.clone(),
            size: self.size,
            render_mode: self.render_mode,
            task_config: self.task_config.clone(),
        }
    }
}

impl<T: SwarmTask> Default for SwarmEnvConfig<T> {
    fn default() -> Self {
        Self {
            agent_names: Vec::new(),
            drone_ids: Vec::new(),
            target_id: None,
            init_flying_pos: HashMap::new(),
            target_location: HashMap::new(),
            size: 3,
            render_mode: RenderMode::default(),
            task_config: T::Config::default(),
        }
    }
}

impl<T: SwarmTask> fmt::Debug for SwarmEnvConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwarmEnvConfig")
            .field("agent_names", &self.agent_names)
            .field("drone_ids", &self.drone_ids)
            .field("target_id", &self.target_id)
            .field("init_flying_pos", &self.init_flying_pos)
            .field("target_location", &self.target_location)
            .field("size", &self.size)
            .field("render_mode", &self.render_mode)
            .field("task_config", &self.task_config)
            .finish()
    }
}

impl<T: SwarmTask> SwarmEnvConfig<T> {
    /// Adds an agent with its initial position. The drone id is assigned
    /// sequentially.
    pub fn agent(mut self, name: impl Into<String>, position: [f32; 3]) -> Self {
        let name = name.into();
        self.drone_ids.push(self.agent_names.len() as u32);
        self.agent_names.push(name.clone());
        self.init_flying_pos.insert(name, position);
        self
    }

    /// Adds a target at a fixed position.
    pub fn target(mut self, name: impl Into<String>, position: [f32; 3]) -> Self {
        self.target_location.insert(name.into(), position);
        self
    }

    /// Marks one target as controlled by a real drone in field
    /// deployments.
    pub fn target_id(mut self, id: impl Into<String>) -> Self {
        self.target_id = Some(id.into());
        self
    }

    /// Sets the side length of the flying area.
    pub fn size(mut self, size: i32) -> Self {
        self.size = size;
        self
    }

    /// Sets the rendering/actuation mode.
    pub fn render_mode(mut self, render_mode: RenderMode) -> Self {
        self.render_mode = render_mode;
        self
    }

    /// Sets the task configuration.
    pub fn task_config(mut self, task_config: T::Config) -> Self {
        self.task_config = task_config;
        self
    }

    /// Checks that the position maps are keyed exactly by the agent list
    /// and that a configured target id exists.
    pub fn validate(&self) -> Result<(), AviaryError> {
        for name in &self.agent_names {
            if !self.init_flying_pos.contains_key(name) {
                return Err(AviaryError::MissingInitialPosition(name.clone()));
            }
        }
        for key in self.init_flying_pos.keys() {
            if !self.agent_names.contains(key) {
                return Err(AviaryError::UnknownPositionKey(key.clone()));
            }
        }
        if let Some(id) = &self.target_id {
            if !self.target_location.contains_key(id) {
                return Err(AviaryError::MissingTarget(id.clone()));
            }
        }
        Ok(())
    }

    /// Constructs a configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let config = serde_yaml::from_reader(rdr)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
