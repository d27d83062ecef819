//! Drone-swarm environments for Aviary.
//!
//! The crate provides [`SwarmEnv`], a parallel multi-agent environment in
//! which a fleet of drones flies inside a bounded arena, and [`SwarmTask`],
//! the capability interface a concrete task implements to supply spaces,
//! observations, rewards, episode-end conditions and the state transition.
//! [`Surround`] is the multi-objective task shipped with the crate.
//!
//! In `human` render mode the environment draws the swarm in a window; in
//! `real` mode it actuates the simulated state without a window (the field
//! deployment mode); with rendering disabled the environment is headless.
mod env;
mod render;
mod surround;
mod task;

pub use env::{
    distance, reached, RenderMode, SwarmEnv, SwarmEnvConfig, SwarmState, CLOSENESS_THRESHOLD,
    RENDER_FPS, WINDOW_SIZE,
};
pub use surround::{Surround, SurroundConfig};
pub use task::{SwarmInfo, SwarmTask};
