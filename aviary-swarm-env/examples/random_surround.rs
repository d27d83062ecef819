use anyhow::Result;
use aviary_core::{wrappers::LinearizeReward, ParallelEnv};
use aviary_swarm_env::{RenderMode, Surround, SwarmEnv, SwarmEnvConfig};
use nalgebra::Vector3;
use std::collections::HashMap;

type Env = SwarmEnv<Surround>;

fn env_config() -> SwarmEnvConfig<Surround> {
    SwarmEnvConfig::default()
        .agent("drone_0", [-1.0, 1.0, 1.0])
        .agent("drone_1", [1.0, -1.0, 1.0])
        .target("target", [0.0, 0.0, 2.0])
        // Real mode actuates without a window; use RenderMode::Human to
        // watch the episode instead.
        .render_mode(RenderMode::Real)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let mut rng = fastrand::Rng::with_seed(42);

    let env = Env::build(&env_config(), 42)?;

    // Linearize one of the two drones; the other keeps its vector reward.
    let mut weights = HashMap::new();
    weights.insert("drone_0".to_string(), vec![0.5, 0.5]);
    let mut env = LinearizeReward::new(env, weights);

    env.reset(Some(42))?;
    while !env.agents().is_empty() {
        let actions = env
            .agents()
            .iter()
            .map(|agent| {
                let sample = env.action_space(agent).sample(&mut rng);
                (
                    agent.clone(),
                    Vector3::new(sample[0], sample[1], sample[2]),
                )
            })
            .collect::<HashMap<_, _>>();

        let step = env.step(&actions)?;
        for (agent, reward) in &step.rewards {
            println!("{} {:?}", agent, reward);
        }
        println!("===");
    }
    env.close();

    Ok(())
}
