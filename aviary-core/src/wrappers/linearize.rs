//! Linearization of vector rewards.
use crate::{error::AviaryError, AgentId, ParallelEnv, Space, StepOutput};
use anyhow::Result;
use std::collections::HashMap;

/// Reward emitted by [`LinearizeReward`].
///
/// Agents with a weight vector receive a scalar; agents without one keep
/// their reward vector unchanged.
#[derive(Clone, Debug, PartialEq)]
pub enum LinearizedReward {
    /// Weighted dot product of the reward vector.
    Scalar(f32),
    /// Unweighted reward, passed through unmodified.
    Vector(Vec<f32>),
}

impl LinearizedReward {
    /// The scalar value, if this reward was linearized.
    pub fn scalar(&self) -> Option<f32> {
        match self {
            LinearizedReward::Scalar(value) => Some(*value),
            LinearizedReward::Vector(_) => None,
        }
    }

    /// The reward components: the pass-through vector, or the scalar as a
    /// one-element slice.
    pub fn components(&self) -> &[f32] {
        match self {
            LinearizedReward::Scalar(value) => std::slice::from_ref(value),
            LinearizedReward::Vector(values) => values,
        }
    }
}

/// Configuration of [`LinearizeReward`]: the inner environment's
/// configuration plus the per-agent weight map.
#[derive(Clone, Debug)]
pub struct LinearizeRewardConfig<C: Clone> {
    /// Configuration of the wrapped environment.
    pub env_config: C,
    /// Weight vector per agent. Agents may be omitted.
    pub weights: HashMap<AgentId, Vec<f32>>,
}

/// Collapses per-agent vector rewards into scalars by a fixed weighted dot
/// product, applied at every step boundary.
///
/// Agents absent from the weight map are passed through unmodified, as
/// [`LinearizedReward::Vector`]. Partial weighting is an explicit design
/// choice: it allows linearizing some agents of a heterogeneous swarm while
/// leaving others multi-objective. Everything else of the inner
/// environment's contract (reset, render, close, agent lists, spaces and
/// the action-map precondition) is delegated unchanged; `reward_space`
/// reports the inner space, the payload shape change is documented here.
pub struct LinearizeReward<E> {
    env: E,
    weights: HashMap<AgentId, Vec<f32>>,
}

impl<E> LinearizeReward<E>
where
    E: ParallelEnv<Reward = Vec<f32>>,
{
    /// Wraps a built environment.
    pub fn new(env: E, weights: HashMap<AgentId, Vec<f32>>) -> Self {
        Self { env, weights }
    }

    /// Consumes the wrapper and returns the inner environment.
    pub fn into_inner(self) -> E {
        self.env
    }

    fn linearize(&self, agent: &AgentId, reward: Vec<f32>) -> Result<LinearizedReward, AviaryError> {
        match self.weights.get(agent) {
            None => Ok(LinearizedReward::Vector(reward)),
            Some(weights) => {
                if weights.len() != reward.len() {
                    return Err(AviaryError::WeightShape {
                        agent: agent.clone(),
                        weights: weights.len(),
                        rewards: reward.len(),
                    });
                }
                let value = weights.iter().zip(reward.iter()).map(|(w, r)| w * r).sum();
                Ok(LinearizedReward::Scalar(value))
            }
        }
    }
}

impl<E> ParallelEnv for LinearizeReward<E>
where
    E: ParallelEnv<Reward = Vec<f32>>,
{
    type Config = LinearizeRewardConfig<E::Config>;
    type Obs = E::Obs;
    type Act = E::Act;
    type Reward = LinearizedReward;
    type Info = E::Info;

    fn build(config: &Self::Config, seed: u64) -> Result<Self> {
        let env = E::build(&config.env_config, seed)?;
        Ok(Self::new(env, config.weights.clone()))
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
            rewards,
            terminations,
            truncations,
            infos,
        } = self.env.step(actions)?;

        let mut linearized = HashMap::with_capacity(rewards.len());
        for (agent, reward) in rewards {
            let reward = self.linearize(&agent, reward)?;
            linearized.insert(agent, reward);
        }

        Ok(StepOutput {
            observations,
            rewards: linearized,
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
