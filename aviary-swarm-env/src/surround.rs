//! Multi-objective surround task.
//!
//! The swarm has to close in on a shared target while keeping its members
//! apart from each other: touching the target or another drone is a crash
//! and ends the episode for everyone.
use crate::env::{distance, reached, SwarmState};
use crate::task::{SwarmInfo, SwarmTask};
use anyhow::Result;
use aviary_core::{error::AviaryError, AgentId, Space};
use itertools::Itertools;
use nalgebra::Vector3;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Reward of every active agent on a crash step.
const CRASH_REWARD: f32 = -10.0;

/// Configuration of [`Surround`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurroundConfig {
    /// Name of the target to surround.
    pub target: String,
    /// Step count after which every agent is truncated.
    pub horizon: u32,
}

impl Default for SurroundConfig {
    fn default() -> Self {
        Self {
            target: "target".to_string(),
            horizon: 200,
        }
    }
}

/// Keep close to a shared target, stay apart from the other drones.
///
/// The reward vector has two objectives per agent: progress toward the
/// target since the previous step (potential-based, via the
/// previous-position map) and the distance to the nearest other drone.
/// Both are replaced by a crash penalty when any pair of drones, or a
/// drone and the target, come within the closeness threshold.
pub struct Surround {
    target: String,
    horizon: u32,
}

impl Surround {
    /// Bounds of one position block inside the arena.
    fn position_bounds(state: &SwarmState) -> (Vec<f32>, Vec<f32>) {
        let s = state.size() as f32;
        (vec![-s, -s, 0.0], vec![s, s, s])
    }

    fn target_position(&self, state: &SwarmState) -> Vector3<f32> {
        state
            .target(&self.target)
            .copied()
            .unwrap_or_else(Vector3::zeros)
    }

    /// Whether any pair of drones, or a drone and the target, touched.
    fn crashed(&self, state: &SwarmState) -> bool {
        for (a, b) in state.agents().iter().tuple_combinations() {
            if let (Some(pa), Some(pb)) = (state.position(a), state.position(b)) {
                if reached(pa, pb) {
                    return true;
                }
            }
        }
        let target = self.target_position(state);
        state
            .agents()
            .iter()
            .filter_map(|agent| state.position(agent))
            .any(|position| reached(position, &target))
    }
}

impl SwarmTask for Surround {
    type Config = SurroundConfig;

    fn build(config: &Self::Config) -> Result<Self> {
        Ok(Self {
            target: config.target.clone(),
            horizon: config.horizon,
        })
    }

    fn validate(&self, state: &SwarmState) -> Result<()> {
        if state.target(&self.target).is_none() {
            return Err(AviaryError::MissingTarget(self.target.clone()).into());
        }
        Ok(())
    }

    fn observation_space(&self, state: &SwarmState, _agent: &str) -> Space {
        // Own position, the target, then every other drone.
        let blocks = state.possible_agents().len() + 1;
        let (block_low, block_high) = Self::position_bounds(state);
        let mut low = Vec::with_capacity(3 * blocks);
        let mut high = Vec::with_capacity(3 * blocks);
        for _ in 0..blocks {
            low.extend_from_slice(&block_low);
            high.extend_from_slice(&block_high);
        }
        Space::boxed(low, high)
    }

    fn action_space(&self, _state: &SwarmState, _agent: &str) -> Space {
        Space::boxed(vec![-1.0; 3], vec![1.0; 3])
    }

    fn reward_space(&self, state: &SwarmState, _agent: &str) -> Space {
        let s = state.size() as f32;
        let diagonal = ((2.0 * s) * (2.0 * s) * 2.0 + s * s).sqrt();
        Space::boxed(vec![CRASH_REWARD; 2], vec![diagonal; 2])
    }

    fn compute_observation(&self, state: &SwarmState) -> HashMap<AgentId, Array1<f32>> {
        let target = self.target_position(state);
        let mut observations = HashMap::with_capacity(state.agents().len());
        for agent in state.agents() {
            let own = match state.position(agent) {
                Some(position) => position,
                None => continue,
            };
            let mut values = Vec::with_capacity(3 * (state.possible_agents().len() + 1));
            values.extend_from_slice(own.as_slice());
            values.extend_from_slice(target.as_slice());
            for other in state.possible_agents() {
                if other == agent {
                    continue;
                }
                if let Some(position) = state.position(other) {
                    values.extend_from_slice(position.as_slice());
                }
            }
            observations.insert(agent.clone(), Array1::from(values));
        }
        observations
    }

    fn compute_reward(&self, state: &SwarmState) -> HashMap<AgentId, Vec<f32>> {
        let crashed = self.crashed(state);
        let target = self.target_position(state);
        let mut rewards = HashMap::with_capacity(state.agents().len());
        for agent in state.agents() {
            if crashed {
                rewards.insert(agent.clone(), vec![CRASH_REWARD; 2]);
                continue;
            }
            let position = match state.position(agent) {
                Some(position) => position,
                None => continue,
            };
            let previous = state.previous_position(agent).unwrap_or(position);

            let progress = distance(previous, &target) - distance(position, &target);
            let separation = state
                .agents()
                .iter()
                .filter(|other| *other != agent)
                .filter_map(|other| state.position(other))
                .map(|other| distance(position, other))
                .fold(f32::INFINITY, f32::min);
            let separation = if separation.is_finite() { separation } else { 0.0 };

            rewards.insert(agent.clone(), vec![progress, separation]);
        }
        rewards
    }

    fn compute_terminated(&self, state: &SwarmState) -> HashMap<AgentId, bool> {
        let crashed = self.crashed(state);
        state
            .agents()
            .iter()
            .map(|agent| (agent.clone(), crashed))
            .collect()
    }

    fn compute_truncation(&self, state: &SwarmState) -> HashMap<AgentId, bool> {
        let truncated = state.timestep() >= self.horizon;
        state
            .agents()
            .iter()
            .map(|agent| (agent.clone(), truncated))
            .collect()
    }

    fn compute_info(&self, state: &SwarmState) -> HashMap<AgentId, SwarmInfo> {
        state
            .agents()
            .iter()
            .map(|agent| (agent.clone(), SwarmInfo))
            .collect()
    }

    fn transition_state(
        &mut self,
        state: &mut SwarmState,
        actions: &HashMap<AgentId, Vector3<f32>>,
    ) -> HashMap<AgentId, Vector3<f32>> {
        let s = state.size() as f32;
        let mut next = HashMap::with_capacity(actions.len());
        for (agent, action) in actions {
            let position = match state.position(agent) {
                Some(position) => *position,
                None => continue,
            };
            let step = Vector3::new(
                action.x.clamp(-1.0, 1.0),
                action.y.clamp(-1.0, 1.0),
                action.z.clamp(-1.0, 1.0),
            );
            let moved = position + step;
            next.insert(
                agent.clone(),
                Vector3::new(
                    moved.x.clamp(-s, s),
                    moved.y.clamp(-s, s),
                    moved.z.clamp(0.0, s),
                ),
            );
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(positions: &[(&str, [f32; 3])], target: [f32; 3]) -> SwarmState {
        let possible = positions
            .iter()
            .map(|(name, _)| name.to_string())
            .collect::<Vec<_>>();
        let init = positions
            .iter()
            .map(|(name, p)| (name.to_string(), Vector3::new(p[0], p[1], p[2])))
            .collect();
        let mut targets = HashMap::new();
        targets.insert(
            "target".to_string(),
            Vector3::new(target[0], target[1], target[2]),
        );
        let mut state = SwarmState::new(possible, init, targets, 3, 42);
        state.reset(None);
        state
    }

    fn task() -> Surround {
        Surround::build(&SurroundConfig::default()).unwrap()
    }

    #[test]
    fn observations_lay_out_own_target_then_others() {
        let state = state(
            &[
                ("drone_0", [-1.0, 0.0, 1.0]),
                ("drone_1", [1.0, 0.0, 1.0]),
            ],
            [0.0, 0.0, 2.0],
        );
        let observations = task().compute_observation(&state);

        let expected = [-1.0, 0.0, 1.0, 0.0, 0.0, 2.0, 1.0, 0.0, 1.0];
        assert_eq!(observations["drone_0"].to_vec(), expected);
        assert_eq!(
            observations["drone_0"].len(),
            task().observation_space(&state, "drone_0").dim()
        );
    }

    #[test]
    fn progress_is_positive_when_moving_toward_the_target() {
        let mut state = state(
            &[
                ("drone_0", [-2.0, 0.0, 2.0]),
                ("drone_1", [2.0, 0.0, 2.0]),
            ],
            [0.0, 0.0, 2.0],
        );
        let mut moved = HashMap::new();
        moved.insert("drone_0".to_string(), Vector3::new(-1.0, 0.0, 2.0));
        moved.insert("drone_1".to_string(), Vector3::new(2.0, 0.0, 2.0));
        state.commit_positions(moved);

        let rewards = task().compute_reward(&state);
        assert!((rewards["drone_0"][0] - 1.0).abs() < 1e-6);
        assert_eq!(rewards["drone_1"][0], 0.0);
        // Separation is the distance to the nearest other drone.
        assert!((rewards["drone_0"][1] - 3.0).abs() < 1e-6);
    }

    #[test]
    fn touching_drones_crash_the_whole_swarm() {
        let state = state(
            &[
                ("drone_0", [0.0, 0.0, 1.0]),
                ("drone_1", [0.05, 0.0, 1.0]),
                ("drone_2", [2.0, 2.0, 1.0]),
            ],
            [0.0, 0.0, 2.5],
        );
        let task = task();
        assert!(task.crashed(&state));
        let terminations = task.compute_terminated(&state);
        assert!(terminations.values().all(|terminated| *terminated));
        let rewards = task.compute_reward(&state);
        assert_eq!(rewards["drone_2"], vec![CRASH_REWARD, CRASH_REWARD]);
    }

    #[test]
    fn touching_the_target_is_a_crash_too() {
        let state = state(
            &[
                ("drone_0", [0.0, 0.0, 1.95]),
                ("drone_1", [2.0, 0.0, 1.0]),
            ],
            [0.0, 0.0, 2.0],
        );
        assert!(task().crashed(&state));
    }

    #[test]
    fn truncation_hits_every_agent_at_the_horizon() {
        let mut state = state(
            &[
                ("drone_0", [-1.0, 0.0, 1.0]),
                ("drone_1", [1.0, 0.0, 1.0]),
            ],
            [0.0, 0.0, 2.0],
        );
        let task = Surround::build(&SurroundConfig {
            horizon: 2,
            ..SurroundConfig::default()
        })
        .unwrap();

        state.advance_time();
        assert!(task.compute_truncation(&state).values().all(|t| !*t));
        state.advance_time();
        assert!(task.compute_truncation(&state).values().all(|t| *t));
    }

    #[test]
    fn transitions_clamp_into_the_arena() {
        let mut state = state(
            &[("drone_0", [2.8, 0.0, 0.2]), ("drone_1", [0.0, 2.0, 1.0])],
            [0.0, 0.0, 2.0],
        );
        let mut task = task();
        let mut actions = HashMap::new();
        actions.insert("drone_0".to_string(), Vector3::new(5.0, 0.0, -1.0));
        actions.insert("drone_1".to_string(), Vector3::new(0.0, 0.5, 0.0));

        let next = task.transition_state(&mut state, &actions);
        // The action is clamped to the unit cube, the position to the arena.
        assert_eq!(next["drone_0"], Vector3::new(3.0, 0.0, 0.0));
        assert_eq!(next["drone_1"], Vector3::new(0.0, 2.5, 1.0));
    }
}
