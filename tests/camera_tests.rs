use glam::{Vec2, Vec3};
use scene_sim::config::SimConfig;
use scene_sim::sim::{orbit_offset, AnalogInput, FrameIntent, InputAggregator, SimContext};
use scene_sim::traits::{Button, CameraView, Controller};

const DT: f32 = 1.0 / 60.0;

struct Held(Vec<Button>);

impl Controller for Held {
    fn is_down(&self, button: Button) -> bool {
        self.0.contains(&button)
    }

    fn get_down_keys(&self) -> &[Button] {
        &self.0
    }
}

#[cfg(test)]
mod camera_tests {
    use super::*;

    #[test]
    fn test_pitch_and_distance_stay_clamped_under_wild_input() {
        let config = SimConfig::default();
        let c = config.camera.clone();
        let mut ctx = SimContext::new(config);
        let mut seed: u32 = 12345;

        for _ in 0..1000 {
            seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
            let r = (seed >> 8) as f32 / (1u32 << 24) as f32;
            let intent = FrameIntent {
                yaw_delta: (r - 0.5) * 20.0,
                pitch_delta: (0.5 - r) * 10.0,
                zoom_delta: (r - 0.5) * 50.0,
                ..Default::default()
            };
            ctx.tick(&intent, DT);

            let s = ctx.camera().state();
            assert!(s.pitch >= c.pitch_min && s.pitch <= c.pitch_max, "pitch {}", s.pitch);
            assert!(s.target_pitch >= c.pitch_min && s.target_pitch <= c.pitch_max);
            assert!(s.distance >= c.min_distance && s.distance <= c.max_distance);
            assert!(s.yaw.abs() <= std::f32::consts::PI + 1e-4);
        }
    }

    #[test]
    fn test_non_finite_deltas_are_ignored() {
        let mut ctx = SimContext::new(SimConfig::default());
        let before = *ctx.camera().state();
        let intent = FrameIntent {
            yaw_delta: f32::NAN,
            pitch_delta: f32::INFINITY,
            zoom_delta: f32::NEG_INFINITY,
            ..Default::default()
        };
        let out = ctx.tick(&intent, DT);
        let after = ctx.camera().state();
        assert_eq!(after.target_yaw, before.target_yaw);
        assert_eq!(after.target_pitch, before.target_pitch);
        assert_eq!(after.distance, before.distance);
        assert!(out.camera.eye.is_finite());
    }

    #[test]
    fn test_camera_settles_behind_player() {
        let config = SimConfig::default();
        let c = config.camera.clone();
        let mut ctx = SimContext::new(config);

        let mut out = ctx.tick(&FrameIntent::default(), DT);
        for _ in 0..120 {
            out = ctx.tick(&FrameIntent::default(), DT);
        }
        let player = out.player_position;
        let expected = player + orbit_offset(c.initial_yaw, c.initial_pitch, c.distance);
        assert!((out.camera.eye - expected).length() < 1e-3);
        assert_eq!(out.camera.target, player + Vec3::new(0.0, c.eye_height, 0.0));
        assert!(out.camera.forward().z < 0.0);
    }

    #[test]
    fn test_drag_only_rotates_while_button_held() {
        let config = SimConfig::default();
        let mut ctx = SimContext::new(config.clone());
        let mut aggregator = InputAggregator::new(&config.input);
        let drag = AnalogInput {
            drag: Vec2::new(200.0, 0.0),
            ..Default::default()
        };

        let intent = aggregator.aggregate(&Held(vec![]), &drag);
        ctx.tick(&intent, DT);
        assert_eq!(ctx.camera().state().target_yaw, 0.0);

        let intent = aggregator.aggregate(&Held(vec![Button::MouseLeft]), &drag);
        ctx.tick(&intent, DT);
        assert!(ctx.camera().state().target_yaw < 0.0);
    }

    #[test]
    fn test_uniform_matches_pose() {
        let mut ctx = SimContext::new(SimConfig::default());
        let out = ctx.tick(&FrameIntent::default(), DT);
        let uniform = out.camera.to_uniform();
        assert_eq!(uniform.position, out.camera.eye.to_array());
        assert_eq!(uniform.view, out.camera.view_matrix().to_cols_array_2d());
    }
}
