//! End-to-end lifecycle of the swarm environment, driven through the
//! public parallel-environment API.
use aviary_core::{
    wrappers::{LinearizeReward, LinearizedReward},
    ParallelEnv,
};
use aviary_swarm_env::{RenderMode, Surround, SwarmEnv, SwarmEnvConfig};
use nalgebra::Vector3;
use std::collections::HashMap;

fn two_drone_config() -> SwarmEnvConfig<Surround> {
    SwarmEnvConfig::default()
        .agent("drone_0", [-1.0, 0.0, 1.0])
        .agent("drone_1", [1.0, 0.0, 1.0])
        .target("target", [0.0, 0.0, 2.0])
}

fn zero_actions(agents: &[String]) -> HashMap<String, Vector3<f32>> {
    agents
        .iter()
        .map(|agent| (agent.clone(), Vector3::zeros()))
        .collect()
}

#[test]
fn a_step_covers_every_possible_agent() {
    let mut env = SwarmEnv::<Surround>::build(&two_drone_config(), 42).unwrap();

    let (observations, infos) = env.reset(Some(42)).unwrap();
    assert_eq!(observations.len(), env.possible_agents().len());
    assert_eq!(infos.len(), env.possible_agents().len());

    let step = env.step(&zero_actions(&env.agents().to_vec())).unwrap();
    for agent in env.possible_agents() {
        assert!(step.observations.contains_key(agent));
        assert!(step.rewards.contains_key(agent));
        assert!(step.terminations.contains_key(agent));
        assert!(step.truncations.contains_key(agent));
        assert!(step.infos.contains_key(agent));
    }

    env.close();
}

#[test]
fn an_episode_runs_to_truncation_in_real_mode() {
    let config = two_drone_config().render_mode(RenderMode::Real);
    let mut env = SwarmEnv::<Surround>::build(&config, 7).unwrap();
    env.reset(None).unwrap();

    // Hovering drones never crash; the episode ends at the horizon.
    let mut steps = 0;
    while !env.agents().is_empty() {
        let step = env.step(&zero_actions(&env.agents().to_vec())).unwrap();
        steps += 1;
        assert!(step.terminations.values().all(|terminated| !*terminated));
    }
    assert_eq!(steps, 200);
    assert_eq!(env.swarm_state().timestep(), 200);
    env.close();
}

#[test]
fn rewards_linearize_over_the_real_environment() {
    let env = SwarmEnv::<Surround>::build(&two_drone_config(), 42).unwrap();

    let mut weights = HashMap::new();
    weights.insert("drone_0".to_string(), vec![0.5, 0.5]);
    let mut env = LinearizeReward::new(env, weights);

    env.reset(None).unwrap();
    let step = env.step(&zero_actions(&env.agents().to_vec())).unwrap();

    assert!(step.rewards["drone_0"].scalar().is_some());
    match &step.rewards["drone_1"] {
        LinearizedReward::Vector(reward) => assert_eq!(reward.len(), 2),
        other => panic!("expected a pass-through vector, got {:?}", other),
    }
}

#[test]
fn reset_supports_repeated_episodes() {
    let config = two_drone_config().render_mode(RenderMode::Real);
    let mut env = SwarmEnv::<Surround>::build(&config, 1).unwrap();

    for _ in 0..3 {
        env.reset(None).unwrap();
        assert_eq!(env.agents(), env.possible_agents());
        for _ in 0..5 {
            env.step(&zero_actions(&env.agents().to_vec())).unwrap();
        }
        assert_eq!(env.swarm_state().timestep(), 5);
    }
    env.close();
    env.close();
}
