//! Player movement: damped acceleration on the XZ plane, gravity, static
//! collision, world-bounds clamping and ground contact.
//!
//! Conventions: +Y is up, and a camera at yaw `θ` looks along
//! `(-sin θ, 0, -cos θ)`, so "forward" input moves away from the camera.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::{CollisionResponse, MovementConfig, WorldBounds};
use crate::core::clamp_delta;
use crate::math::{damp_factor, lerp_angle};

use super::collision::CollisionOracle;
use super::input::FrameIntent;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Feet position in world space
    pub position: Vec3,
    pub velocity: Vec3,
    pub grounded: bool,
    pub sprint: bool,
    /// Yaw of the character mesh; +Z at zero
    pub facing: f32,
}

impl PlayerState {
    pub fn spawn(position: Vec3) -> Self {
        let position = Vec3::new(position.x, position.y.max(0.0), position.z);
        Self {
            position,
            velocity: Vec3::ZERO,
            grounded: position.y <= 0.0,
            sprint: false,
            facing: 0.0,
        }
    }

    pub fn horizontal_velocity(&self) -> Vec3 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z)
    }

    pub fn horizontal_speed(&self) -> f32 {
        self.horizontal_velocity().length()
    }
}

/// Horizontal forward/right basis for a camera yaw
pub fn camera_basis(yaw: f32) -> (Vec3, Vec3) {
    let forward = Vec3::new(-yaw.sin(), 0.0, -yaw.cos());
    let right = Vec3::new(yaw.cos(), 0.0, -yaw.sin());
    (forward, right)
}

/// What happened during one integration step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepOutcome {
    /// Delta actually integrated, after clamping
    pub dt: f32,
    /// Horizontal move refused by a collider
    pub blocked: bool,
    /// Vertical move stopped on a collider's top or underside
    pub blocked_vertical: bool,
    /// Position pinned to the world bounds
    pub clamped: bool,
    pub jumped: bool,
}

#[derive(Debug, Clone)]
pub struct MovementIntegrator {
    config: MovementConfig,
    response: CollisionResponse,
    bounds: WorldBounds,
}

impl MovementIntegrator {
    pub fn new(config: MovementConfig, response: CollisionResponse, bounds: WorldBounds) -> Self {
        Self {
            config,
            response,
            bounds,
        }
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    /// Horizontal speed limit for the given sprint request
    pub fn speed_cap(&self, sprint: bool) -> f32 {
        if sprint {
            self.config.sprint_speed
        } else {
            self.config.walk_speed
        }
    }

    /// Advance `player` by one frame. `raw_dt` is clamped to `max_dt` first.
    pub fn step(
        &self,
        player: &mut PlayerState,
        intent: &FrameIntent,
        camera_yaw: f32,
        oracle: &CollisionOracle,
        raw_dt: f32,
    ) -> StepOutcome {
        let m = &self.config;
        let dt = clamp_delta(raw_dt, m.max_dt);
        let mut outcome = StepOutcome {
            dt,
            ..Default::default()
        };

        player.sprint = intent.sprint;
        let control = if player.grounded { 1.0 } else { m.air_control };
        let cap = self.speed_cap(intent.sprint);

        let (forward, right) = camera_basis(camera_yaw);
        let direction = (right * intent.movement.x + forward * intent.movement.y).normalize_or_zero();

        let mut horizontal = player.horizontal_velocity().clamp_length_max(cap);
        if direction != Vec3::ZERO {
            let desired = direction * cap;
            let delta = desired - horizontal;
            let max_change = m.acceleration * control * dt;
            let delta_len = delta.length();
            if delta_len <= max_change {
                horizontal = desired;
            } else {
                horizontal += delta * (max_change / delta_len);
            }
            horizontal = horizontal.clamp_length_max(cap);
        } else {
            let speed = horizontal.length();
            if speed > 0.0 {
                let slowed = (speed - m.deceleration * control * dt).max(0.0);
                horizontal *= slowed / speed;
            }
        }
        player.velocity.x = horizontal.x;
        player.velocity.z = horizontal.z;

        if intent.jump && player.grounded && m.jump_speed > 0.0 {
            player.velocity.y = m.jump_speed;
            player.grounded = false;
            outcome.jumped = true;
        }
        if !player.grounded {
            player.velocity.y -= m.gravity * dt;
        }

        let target = player.position + horizontal * dt;
        let candidate = self.bounds.clamp_xz(target);
        if candidate.x != target.x {
            player.velocity.x = 0.0;
            outcome.clamped = true;
        }
        if candidate.z != target.z {
            player.velocity.z = 0.0;
            outcome.clamped = true;
        }
        if candidate != player.position {
            if oracle.admits(player.position, candidate) {
                player.position = candidate;
            } else {
                outcome.blocked = true;
                if self.response == CollisionResponse::ZeroVelocity {
                    player.velocity.x = 0.0;
                    player.velocity.z = 0.0;
                }
            }
        }

        let rise = player.velocity.y * dt;
        if rise != 0.0 {
            let candidate = player.position + Vec3::Y * rise;
            if oracle.admits(player.position, candidate) {
                player.position = candidate;
            } else {
                // stop on the face that was hit, or stay put if even that overlaps
                outcome.blocked_vertical = true;
                player.position = oracle
                    .vertical_contact(player.position, candidate)
                    .filter(|&contact| oracle.admits(player.position, contact))
                    .unwrap_or(player.position);
                player.velocity.y = 0.0;
            }
        }

        let y = player.position.y;
        if y <= 0.0 || (y <= m.ground_epsilon && player.velocity.y <= 0.0) {
            player.position.y = 0.0;
            player.velocity.y = 0.0;
            player.grounded = true;
        } else {
            player.grounded = y <= m.ground_epsilon;
        }

        if player.horizontal_speed() > m.move_threshold {
            let heading = player.velocity.x.atan2(player.velocity.z);
            player.facing = lerp_angle(player.facing, heading, damp_factor(m.turn_rate, dt));
        }

        outcome
    }
}
