#![warn(missing_docs)]
//! Core abstractions for multi-objective multi-agent environments.
//!
//! This crate defines the parallel environment contract implemented by the
//! environment crates of the workspace (see `aviary-swarm-env`) together
//! with the space model, the per-step output type, the error taxonomy and
//! reward-transforming wrappers.
pub mod error;
pub mod wrappers;

mod base;
pub use base::{AgentId, ParallelEnv, Space, StepOutput};
