//! Running normalization of reward components.
use crate::{error::AviaryError, AgentId, ParallelEnv, Space, StepOutput};
use anyhow::Result;
use std::collections::HashMap;

const EPSILON: f32 = 1e-8;

/// Configuration of [`NormalizeReward`]: the inner environment's
/// configuration plus the normalization target.
#[derive(Clone, Debug)]
pub struct NormalizeRewardConfig<C: Clone> {
    /// Configuration of the wrapped environment.
    pub env_config: C,
    /// Agent whose rewards are normalized.
    pub agent: AgentId,
    /// Reward component indices to normalize.
    pub indices: Vec<usize>,
}

/// Welford accumulator over one reward component.
#[derive(Clone, Debug, Default)]
struct RunningStat {
    count: u64,
    mean: f64,
    m2: f64,
}

impl RunningStat {
    fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / self.count as f64
        }
    }
}

/// Scales selected reward components of one agent by the reciprocal of
/// their running standard deviation.
///
/// Statistics accumulate across episodes: they describe the reward stream
/// seen over training, not a single episode, so `reset` does not clear
/// them. Components of other agents, and components outside `indices`, are
/// passed through unmodified. The reward payload keeps its vector shape.
pub struct NormalizeReward<E> {
    env: E,
    agent: AgentId,
    indices: Vec<usize>,
    stats: Vec<RunningStat>,
}

impl<E> NormalizeReward<E>
where
    E: ParallelEnv<Reward = Vec<f32>>,
{
    /// Wraps a built environment, normalizing `indices` of `agent`'s
    /// reward vector.
    pub fn new(env: E, agent: AgentId, indices: Vec<usize>) -> Self {
        let stats = vec![RunningStat::default(); indices.len()];
        Self {
            env,
            agent,
            indices,
            stats,
        }
    }

    /// Consumes the wrapper and returns the inner environment.
    pub fn into_inner(self) -> E {
        self.env
    }

    fn normalize(&mut self, reward: &mut Vec<f32>) -> Result<(), AviaryError> {
        for (stat, &index) in self.stats.iter_mut().zip(self.indices.iter()) {
            if index >= reward.len() {
                return Err(AviaryError::RewardIndex {
                    agent: self.agent.clone(),
                    index,
                    rewards: reward.len(),
                });
            }
            stat.push(reward[index] as f64);
            let scale = (stat.variance() + EPSILON as f64).sqrt();
            reward[index] = (reward[index] as f64 / scale) as f32;
        }
        Ok(())
    }
}

impl<E> ParallelEnv for NormalizeReward<E>
where
    E: ParallelEnv<Reward = Vec<f32>>,
{
    type Config = NormalizeRewardConfig<E::Config>;
    type Obs = E::Obs;
    type Act = E::Act;
    type Reward = Vec<f32>;
    type Info = E::Info;

    fn build(config: &Self::Config, seed: u64) -> Result<Self> {
        let env = E::build(&config.env_config, seed)?;
        Ok(Self::new(env, config.agent.clone(), config.indices.clone()))
    }

    fn possible_agents(&self) -> &[AgentId] {
        self.env.possible_agents()
    }

    fn agents(&self) -> &[AgentId] {
        self.env.agents()
    }

    fn observation_space(&self, agent: &str) -> Space {
        self.env.observation_space(agent)
    }

    fn action_space(&self, agent: &str) -> Space {
        self.env.action_space(agent)
    }

    fn reward_space(&self, agent: &str) -> Space {
        self.env.reward_space(agent)
    }

    fn reset(
        &mut self,
        seed: Option<u64>,
    ) -> Result<(HashMap<AgentId, Self::Obs>, HashMap<AgentId, Self::Info>)> {
        self.env.reset(seed)
    }

    fn step(&mut self, actions: &HashMap<AgentId, Self::Act>) -> Result<StepOutput<Self>> {
        let StepOutput {
            observations,
            mut rewards,
            terminations,
            truncations,
            infos,
        } = self.env.step(actions)?;

        if let Some(reward) = rewards.get_mut(&self.agent) {
            self.normalize(reward)?;
        }

        Ok(StepOutput {
            observations,
            rewards,
            terminations,
            truncations,
            infos,
        })
    }

    fn render(&mut self) -> Result<()> {
        self.env.render()
    }

    fn close(&mut self) {
        self.env.close()
    }
}
