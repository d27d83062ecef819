//! Software rendering of the swarm scene.
mod camera;
mod draw;

pub(crate) use camera::Camera;
pub(crate) use draw::{axes, clear, field, point, target_point, Frame, BACKGROUND};
