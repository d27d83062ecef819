//! Episode state shared between the lifecycle engine and task hooks.
use aviary_core::AgentId;
use nalgebra::Vector3;
use std::collections::HashMap;

/// Distance below which a position counts as having reached another.
pub const CLOSENESS_THRESHOLD: f32 = 0.1;

/// Euclidean distance between two positions.
pub fn distance(a: &Vector3<f32>, b: &Vector3<f32>) -> f32 {
    (a - b).norm()
}

/// Whether `a` has reached `b` under [`CLOSENESS_THRESHOLD`].
pub fn reached(a: &Vector3<f32>, b: &Vector3<f32>) -> bool {
    distance(a, b) < CLOSENESS_THRESHOLD
}

/// Mutable state of one episode.
///
/// Position maps are keyed exactly by the possible-agent identifiers; the
/// previous-position map always reflects positions as of the prior actuated
/// step until the next step boundary overwrites it. The active-agent list
/// shrinks as agents terminate and is restored to the full possible-agent
/// list on reset.
pub struct SwarmState {
    possible_agents: Vec<AgentId>,
    agents: Vec<AgentId>,
    init_positions: HashMap<AgentId, Vector3<f32>>,
    positions: HashMap<AgentId, Vector3<f32>>,
    previous_positions: HashMap<AgentId, Vector3<f32>>,
    init_targets: HashMap<String, Vector3<f32>>,
    targets: HashMap<String, Vector3<f32>>,
    previous_targets: HashMap<String, Vector3<f32>>,
    timestep: u32,
    size: i32,
    rng: fastrand::Rng,
}

impl SwarmState {
    pub(crate) fn new(
        possible_agents: Vec<AgentId>,
        init_positions: HashMap<AgentId, Vector3<f32>>,
        init_targets: HashMap<String, Vector3<f32>>,
        size: i32,
        seed: u64,
    ) -> Self {
        Self {
            possible_agents,
            // No agent is active until the first reset.
            agents: Vec::new(),
            positions: init_positions.clone(),
            previous_positions: init_positions.clone(),
            init_positions,
            targets: init_targets.clone(),
            previous_targets: init_targets.clone(),
            init_targets,
            timestep: 0,
            size,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub(crate) fn reset(&mut self, seed: Option<u64>) {
        if let Some(seed) = seed {
            self.rng = fastrand::Rng::with_seed(seed);
        }
        self.timestep = 0;
        self.agents = self.possible_agents.clone();
        self.positions = self.init_positions.clone();
        self.previous_positions = self.init_positions.clone();
        self.targets = self.init_targets.clone();
        self.previous_targets = self.init_targets.clone();
    }

    pub(crate) fn advance_time(&mut self) {
        self.timestep += 1;
    }

    /// Snapshots the target map before the transition hook runs, so that
    /// targets moved by the hook leave their prior positions behind.
    pub(crate) fn begin_transition(&mut self) {
        self.previous_targets = self.targets.clone();
    }

    /// Shifts current positions into the previous-position map and installs
    /// the new ones. Agents absent from `new_positions` (already inactive)
    /// keep their last position.
    pub(crate) fn commit_positions(&mut self, new_positions: HashMap<AgentId, Vector3<f32>>) {
        self.previous_positions = self.positions.clone();
        for (agent, position) in new_positions {
            debug_assert!(self.positions.contains_key(&agent));
            self.positions.insert(agent, position);
        }
    }

    pub(crate) fn remove_done_agents(
        &mut self,
        terminations: &HashMap<AgentId, bool>,
        truncations: &HashMap<AgentId, bool>,
    ) {
        self.agents.retain(|agent| {
            let done = terminations.get(agent).copied().unwrap_or(false)
                || truncations.get(agent).copied().unwrap_or(false);
            !done
        });
    }

    /// The full agent list set at construction.
    pub fn possible_agents(&self) -> &[AgentId] {
        &self.possible_agents
    }

    /// The currently active agents.
    pub fn agents(&self) -> &[AgentId] {
        &self.agents
    }

    /// Steps taken since the last reset.
    pub fn timestep(&self) -> u32 {
        self.timestep
    }

    /// Side length of the flying area.
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Current position of an agent.
    pub fn position(&self, agent: &str) -> Option<&Vector3<f32>> {
        self.positions.get(agent)
    }

    /// Position of an agent as of the prior actuated step.
    pub fn previous_position(&self, agent: &str) -> Option<&Vector3<f32>> {
        self.previous_positions.get(agent)
    }

    /// All current agent positions, keyed by the possible-agent list.
    pub fn positions(&self) -> &HashMap<AgentId, Vector3<f32>> {
        &self.positions
    }

    /// Current position of a target.
    pub fn target(&self, name: &str) -> Option<&Vector3<f32>> {
        self.targets.get(name)
    }

    /// Position of a target as of the prior actuated step.
    pub fn previous_target(&self, name: &str) -> Option<&Vector3<f32>> {
        self.previous_targets.get(name)
    }

    /// All current target positions.
    pub fn targets(&self) -> &HashMap<String, Vector3<f32>> {
        &self.targets
    }

    /// Moves a target. Intended for transition hooks of tasks with moving
    /// targets; the prior position stays in the previous-target map until
    /// the next step boundary.
    pub fn set_target(&mut self, name: &str, position: Vector3<f32>) {
        if let Some(target) = self.targets.get_mut(name) {
            *target = position;
        }
    }

    /// RNG for stochastic transitions, seeded at build and reseeded by
    /// `reset` when a seed is given.
    pub fn rng_mut(&mut self) -> &mut fastrand::Rng {
        &mut self.rng
    }
}
