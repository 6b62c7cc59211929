//! Tuning values for the simulation.
//!
//! Every section deserializes with `#[serde(default)]`, so a JSON file only needs
//! the fields it overrides. Rates are per second; angles are radians.

use anyhow::{bail, Context, Result};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::scene;

/// Environment variable consulted when no config path is given on the command line
pub const CONFIG_ENV_VAR: &str = "SCENE_SIM_CONFIG";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub movement: MovementConfig,
    pub camera: CameraConfig,
    pub collision: CollisionConfig,
    pub world: WorldConfig,
    pub missions: MissionConfig,
    pub input: InputConfig,
    pub animation: AnimationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub walk_speed: f32,
    pub sprint_speed: f32,
    /// Horizontal acceleration toward the intended velocity
    pub acceleration: f32,
    /// Horizontal braking with no input
    pub deceleration: f32,
    /// Multiplier on acceleration/deceleration while airborne
    pub air_control: f32,
    /// Magnitude of downward acceleration
    pub gravity: f32,
    pub jump_speed: f32,
    /// Upper bound on a single integration step, in seconds
    pub max_dt: f32,
    pub ground_epsilon: f32,
    /// Horizontal speed above which the player counts as moving
    pub move_threshold: f32,
    /// Rate at which the character turns to face its heading
    pub turn_rate: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            walk_speed: 4.0,
            sprint_speed: 7.5,
            acceleration: 20.0,
            deceleration: 24.0,
            air_control: 0.35,
            gravity: 20.0,
            jump_speed: 7.0,
            max_dt: 0.05,
            ground_epsilon: 0.01,
            move_threshold: 0.1,
            turn_rate: 12.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub initial_yaw: f32,
    pub initial_pitch: f32,
    pub pitch_min: f32,
    pub pitch_max: f32,
    /// Smoothing rate of yaw/pitch toward their targets
    pub rotate_rate: f32,
    /// Smoothing rate of the eye toward its desired position
    pub follow_rate: f32,
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Distance change per unit of zoom input
    pub zoom_step: f32,
    /// Height of the look-at point above the player's feet
    pub eye_height: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            initial_yaw: 0.0,
            initial_pitch: 0.35,
            pitch_min: 0.05,
            pitch_max: 1.2,
            rotate_rate: 12.0,
            follow_rate: 10.0,
            distance: 6.0,
            min_distance: 2.5,
            max_distance: 12.0,
            zoom_step: 0.5,
            eye_height: 1.5,
        }
    }
}

/// What happens to velocity when a horizontal move is blocked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionResponse {
    /// Refuse the move and zero horizontal velocity
    #[default]
    ZeroVelocity,
    /// Refuse the move, keep velocity
    RejectMove,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    pub player_radius: f32,
    pub player_height: f32,
    pub response: CollisionResponse,
    /// Mesh names turned into colliders when the world loads
    pub blocked_meshes: Vec<String>,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            player_radius: 0.35,
            player_height: 1.8,
            response: CollisionResponse::default(),
            blocked_meshes: scene::default_blocked_meshes(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl WorldBounds {
    pub fn clamp_xz(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            p.x.clamp(self.min_x, self.max_x),
            p.y,
            p.z.clamp(self.min_z, self.max_z),
        )
    }

    pub fn contains_xz(&self, p: Vec3) -> bool {
        (self.min_x..=self.max_x).contains(&p.x) && (self.min_z..=self.max_z).contains(&p.z)
    }

    /// Map a world position into [0, 1]^2 (x right, y down the +Z axis)
    pub fn normalize_xz(&self, p: Vec3) -> Vec2 {
        let w = self.max_x - self.min_x;
        let d = self.max_z - self.min_z;
        if w <= 0.0 || d <= 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new((p.x - self.min_x) / w, (p.z - self.min_z) / d).clamp(Vec2::ZERO, Vec2::ONE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub spawn: Vec3,
    pub bounds: WorldBounds,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            spawn: Vec3::from_array(scene::SPAWN_POSITION),
            bounds: scene::WORLD_BOUNDS,
        }
    }
}

/// Which marker wins when several are in range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProximityPolicy {
    #[default]
    FirstInList,
    Nearest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSpec {
    pub key: String,
    pub position: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionConfig {
    pub interaction_radius: f32,
    pub policy: ProximityPolicy,
    pub float_amplitude: f32,
    pub float_frequency: f32,
    pub markers: Vec<MarkerSpec>,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            interaction_radius: 3.0,
            policy: ProximityPolicy::default(),
            float_amplitude: 0.25,
            float_frequency: 2.0,
            markers: scene::default_markers(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Radians per pixel of drag
    pub drag_sensitivity: f32,
    /// Screen radius of the virtual joystick, in pixels
    pub joystick_radius: f32,
    /// Zoom units per pixel of pinch distance change
    pub pinch_zoom_scale: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            drag_sensitivity: 0.005,
            joystick_radius: 60.0,
            pinch_zoom_scale: 0.02,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub crossfade: f32,
    pub idle_clip: String,
    pub walk_clip: String,
    pub run_clip: String,
    pub jump_clip: String,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            crossfade: 0.2,
            idle_clip: "idle".to_string(),
            walk_clip: "walk".to_string(),
            run_clip: "run".to_string(),
            jump_clip: "jump".to_string(),
        }
    }
}

impl SimConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(json).context("Failed to parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {:?}", path))?;
        Self::from_json_str(&text).context(format!("Invalid config file: {:?}", path))
    }

    /// Explicit path first, then `SCENE_SIM_CONFIG`, then built-in defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_json_file(path);
        }
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(env_path) if !env_path.is_empty() => Self::from_json_file(env_path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let m = &self.movement;
        if m.walk_speed <= 0.0 || m.sprint_speed < m.walk_speed {
            bail!(
                "movement speeds must satisfy 0 < walk ({}) <= sprint ({})",
                m.walk_speed,
                m.sprint_speed
            );
        }
        if m.acceleration <= 0.0 || m.deceleration <= 0.0 {
            bail!("movement acceleration and deceleration must be positive");
        }
        if !(0.0..=1.0).contains(&m.air_control) {
            bail!("air_control must be within [0, 1], got {}", m.air_control);
        }
        if m.gravity < 0.0 || m.jump_speed < 0.0 {
            bail!("gravity and jump_speed are magnitudes and must not be negative");
        }
        if m.max_dt <= 0.0 || m.ground_epsilon < 0.0 || m.move_threshold < 0.0 {
            bail!("max_dt must be positive; ground_epsilon and move_threshold non-negative");
        }

        let c = &self.camera;
        if c.pitch_min > c.pitch_max {
            bail!("camera pitch range is inverted: [{}, {}]", c.pitch_min, c.pitch_max);
        }
        if c.min_distance <= 0.0 || c.min_distance > c.max_distance {
            bail!(
                "camera distance range is invalid: [{}, {}]",
                c.min_distance,
                c.max_distance
            );
        }
        if c.rotate_rate < 0.0 || c.follow_rate < 0.0 {
            bail!("camera smoothing rates must not be negative");
        }

        if self.collision.player_radius <= 0.0 || self.collision.player_height <= 0.0 {
            bail!("player collision box must have positive radius and height");
        }

        let b = &self.world.bounds;
        if b.min_x > b.max_x || b.min_z > b.max_z {
            bail!("world bounds are inverted: {:?}", b);
        }

        if self.missions.interaction_radius < 0.0 {
            bail!("interaction_radius must not be negative");
        }
        if self.animation.crossfade < 0.0 {
            bail!("crossfade duration must not be negative");
        }
        Ok(())
    }
}
