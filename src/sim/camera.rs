//! Third-person orbit camera.
//!
//! Yaw and pitch chase their targets with frame-rate independent smoothing,
//! the eye sits on a sphere of radius `distance` around the player and itself
//! eases toward that spot, and the view always looks at the player's eye height.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::CameraConfig;
use crate::math::{damp_factor, lerp_angle, wrap_angle};
use crate::traits::camera::CameraView;
use crate::types::CameraUniform;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub yaw: f32,
    pub pitch: f32,
    pub target_yaw: f32,
    pub target_pitch: f32,
    pub distance: f32,
    /// Smoothed eye position; `None` until the first update snaps it
    pub eye: Option<Vec3>,
}

/// Position and look-at point for the render call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
}

impl CameraView for CameraPose {
    fn eye(&self) -> Vec3 {
        self.eye
    }

    fn target(&self) -> Vec3 {
        self.target
    }
}

impl CameraPose {
    pub fn to_uniform(&self) -> CameraUniform {
        CameraUniform {
            view: self.view_matrix().to_cols_array_2d(),
            position: self.eye.to_array(),
            _pad1: 0.0,
            forward: self.forward().to_array(),
            _pad2: 0.0,
        }
    }
}

/// Offset from the orbit center for yaw `θ`, pitch `φ` and distance `d`
pub fn orbit_offset(yaw: f32, pitch: f32, distance: f32) -> Vec3 {
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    let (sin_pitch, cos_pitch) = pitch.sin_cos();
    Vec3::new(
        distance * sin_yaw * cos_pitch,
        distance * sin_pitch,
        distance * cos_yaw * cos_pitch,
    )
}

#[derive(Debug, Clone)]
pub struct CameraRig {
    config: CameraConfig,
    state: CameraState,
}

impl CameraRig {
    pub fn new(config: CameraConfig) -> Self {
        let pitch = config.initial_pitch.clamp(config.pitch_min, config.pitch_max);
        let distance = config.distance.clamp(config.min_distance, config.max_distance);
        let state = CameraState {
            yaw: config.initial_yaw,
            pitch,
            target_yaw: config.initial_yaw,
            target_pitch: pitch,
            distance,
            eye: None,
        };
        Self { config, state }
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn restore(&mut self, state: CameraState) {
        self.state = state;
    }

    pub fn yaw(&self) -> f32 {
        self.state.yaw
    }

    /// Feed drag and zoom input into the targets
    pub fn apply_input(&mut self, yaw_delta: f32, pitch_delta: f32, zoom_delta: f32) {
        let c = &self.config;
        let s = &mut self.state;
        if yaw_delta.is_finite() {
            s.target_yaw = wrap_angle(s.target_yaw + yaw_delta);
        }
        if pitch_delta.is_finite() {
            s.target_pitch = (s.target_pitch + pitch_delta).clamp(c.pitch_min, c.pitch_max);
        }
        if zoom_delta.is_finite() {
            s.distance = (s.distance + zoom_delta * c.zoom_step).clamp(c.min_distance, c.max_distance);
        }
    }

    /// Smooth toward the targets and place the eye around `player_position`
    pub fn update(&mut self, player_position: Vec3, dt: f32) -> CameraPose {
        let c = &self.config;
        let s = &mut self.state;

        let turn = damp_factor(c.rotate_rate, dt);
        s.yaw = lerp_angle(s.yaw, s.target_yaw, turn);
        s.pitch = (s.pitch + (s.target_pitch - s.pitch) * turn).clamp(c.pitch_min, c.pitch_max);

        let desired = player_position + orbit_offset(s.yaw, s.pitch, s.distance);
        let eye = match s.eye {
            Some(current) => current.lerp(desired, damp_factor(c.follow_rate, dt)),
            None => desired,
        };
        s.eye = Some(eye);

        CameraPose {
            eye,
            target: player_position + Vec3::new(0.0, c.eye_height, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_at_zero_angles_is_behind_on_plus_z() {
        let o = orbit_offset(0.0, 0.0, 5.0);
        assert!((o - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-6);
    }

    #[test]
    fn offset_length_is_distance() {
        let o = orbit_offset(1.3, 0.7, 4.0);
        assert!((o.length() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn first_update_snaps_to_orbit() {
        let config = CameraConfig::default();
        let mut rig = CameraRig::new(config.clone());
        let player = Vec3::new(3.0, 0.0, -2.0);
        let pose = rig.update(player, 1.0 / 60.0);
        let expected = player + orbit_offset(config.initial_yaw, config.initial_pitch, config.distance);
        assert!((pose.eye - expected).length() < 1e-5);
        assert_eq!(pose.target, player + Vec3::new(0.0, config.eye_height, 0.0));
    }

    #[test]
    fn pitch_target_is_clamped() {
        let config = CameraConfig::default();
        let mut rig = CameraRig::new(config.clone());
        rig.apply_input(0.0, 100.0, 0.0);
        assert_eq!(rig.state().target_pitch, config.pitch_max);
        rig.apply_input(0.0, -100.0, 0.0);
        assert_eq!(rig.state().target_pitch, config.pitch_min);
    }

    #[test]
    fn zoom_is_clamped() {
        let config = CameraConfig::default();
        let mut rig = CameraRig::new(config.clone());
        rig.apply_input(0.0, 0.0, 1000.0);
        assert_eq!(rig.state().distance, config.max_distance);
        rig.apply_input(0.0, 0.0, -1000.0);
        assert_eq!(rig.state().distance, config.min_distance);
    }

    #[test]
    fn yaw_converges_to_target() {
        let mut rig = CameraRig::new(CameraConfig::default());
        rig.apply_input(1.0, 0.0, 0.0);
        for _ in 0..240 {
            rig.update(Vec3::ZERO, 1.0 / 60.0);
        }
        assert!((rig.yaw() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn eye_eases_after_player_jumps_ahead() {
        let mut rig = CameraRig::new(CameraConfig::default());
        let first = rig.update(Vec3::ZERO, 1.0 / 60.0);
        let moved = rig.update(Vec3::new(10.0, 0.0, 0.0), 1.0 / 60.0);
        // partway there, not snapped
        assert!(moved.eye.x > first.eye.x);
        assert!(moved.eye.x < first.eye.x + 10.0);
    }

    #[test]
    fn uniform_forward_points_at_target() {
        let pose = CameraPose {
            eye: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
        };
        let uniform = pose.to_uniform();
        assert_eq!(uniform.position, [0.0, 0.0, 5.0]);
        assert!((Vec3::from_array(uniform.forward) - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
    }
}
