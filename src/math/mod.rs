mod aabb;
mod angle;

pub use aabb::AABB;
pub use angle::{damp_factor, lerp_angle, wrap_angle};
