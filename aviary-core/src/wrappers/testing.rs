//! Scripted environment used by the wrapper tests.
use crate::{AgentId, ParallelEnv, Space, StepOutput};
use anyhow::Result;
use std::collections::HashMap;

/// Environment emitting a fixed reward vector per agent at every step.
pub(crate) struct StubEnv {
    possible: Vec<AgentId>,
    active: Vec<AgentId>,
    rewards: Vec<(AgentId, Vec<f32>)>,
    alternate: Option<usize>,
    timestep: u32,
}

impl StubEnv {
    pub fn new(rewards: Vec<(AgentId, Vec<f32>)>) -> Self {
        let possible: Vec<AgentId> = rewards.iter().map(|(agent, _)| agent.clone()).collect();
        Self {
            possible: possible.clone(),
            active: possible,
            rewards,
            alternate: None,
            timestep: 0,
        }
    }

    /// Flips the sign of one reward component on every other step.
    pub fn alternate_component(mut self, index: usize) -> Self {
        self.alternate = Some(index);
        self
    }
}

impl ParallelEnv for StubEnv {
    type Config = Vec<(AgentId, Vec<f32>)>;
    type Obs = Vec<f32>;
    type Act = f32;
    type Reward = Vec<f32>;
    type Info = ();

    fn build(config: &Self::Config, _seed: u64) -> Result<Self> {
        Ok(Self::new(config.clone()))
    }

    fn possible_agents(&self) -> &[AgentId] {
        &self.possible
    }

    fn agents(&self) -> &[AgentId] {
        &self.active
    }

    fn observation_space(&self, _agent: &str) -> Space {
        Space::boxed(vec![0.0], vec![1.0])
    }

    fn action_space(&self, _agent: &str) -> Space {
        Space::boxed(vec![-1.0], vec![1.0])
    }

    fn reward_space(&self, agent: &str) -> Space {
        let dim = self
            .rewards
            .iter()
            .find(|(name, _)| name == agent)
            .map(|(_, reward)| reward.len())
            .unwrap_or(0);
        Space::boxed(vec![f32::MIN; dim], vec![f32::MAX; dim])
    }

    fn reset(
        &mut self,
        _seed: Option<u64>,
    ) -> Result<(HashMap<AgentId, Self::Obs>, HashMap<AgentId, Self::Info>)> {
        self.timestep = 0;
        self.active = self.possible.clone();
        let observations = self
            .possible
            .iter()
            .map(|agent| (agent.clone(), vec![0.0]))
            .collect();
        let infos = self.possible.iter().map(|agent| (agent.clone(), ())).collect();
        Ok((observations, infos))
    }

    fn step(&mut self, _actions: &HashMap<AgentId, Self::Act>) -> Result<StepOutput<Self>> {
        self.timestep += 1;
        let flip = self.timestep % 2 == 0;

        let mut rewards = HashMap::new();
        for (agent, reward) in &self.rewards {
            let mut reward = reward.clone();
            if let Some(index) = self.alternate {
                if flip {
                    reward[index] = -reward[index];
                }
            }
            rewards.insert(agent.clone(), reward);
        }

        Ok(StepOutput {
            observations: self
                .active
                .iter()
                .map(|agent| (agent.clone(), vec![0.0]))
                .collect(),
            rewards,
            terminations: self.active.iter().map(|agent| (agent.clone(), false)).collect(),
            truncations: self.active.iter().map(|agent| (agent.clone(), false)).collect(),
            infos: self.active.iter().map(|agent| (agent.clone(), ())).collect(),
        })
    }

    fn render(&mut self) -> Result<()> {
        Ok(())
    }

    fn close(&mut self) {}
}
