use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::core::clamp_delta;
use crate::loaders::CharacterRig;

use super::animation::{AnimationBlend, AnimationMixer, AnimationSnapshot};
use super::camera::{CameraPose, CameraRig, CameraState};
use super::collision::{ColliderBox, CollisionOracle};
use super::input::FrameIntent;
use super::locomotion::LocomotionState;
use super::missions::{MissionProximityDetector, ProximityChange, UiState};
use super::movement::{MovementIntegrator, PlayerState};

/// Everything the host needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameOutput {
    pub frame: u64,
    pub dt: f32,
    pub player_position: Vec3,
    pub player_velocity: Vec3,
    pub player_facing: f32,
    pub grounded: bool,
    pub locomotion: LocomotionState,
    pub animation: Option<AnimationBlend>,
    pub camera: CameraPose,
    pub active_mission: Option<String>,
    pub proximity_change: Option<ProximityChange>,
    pub ui: UiState,
    /// Player position inside the world rectangle, [0, 1] on both axes
    pub minimap: Vec2,
    pub marker_heights: Vec<f32>,
    pub blocked: bool,
}

/// Serializable copy of the mutable simulation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub frame: u64,
    pub elapsed: f32,
    pub player: PlayerState,
    pub camera: CameraState,
    pub locomotion: LocomotionState,
    pub active_mission: Option<String>,
    pub ui: UiState,
    pub animation: AnimationSnapshot,
}

/// All per-frame state, advanced by [`SimContext::tick`]
#[derive(Debug, Clone)]
pub struct SimContext {
    config: SimConfig,
    player: PlayerState,
    camera: CameraRig,
    integrator: MovementIntegrator,
    oracle: CollisionOracle,
    missions: MissionProximityDetector,
    animation: AnimationMixer,
    ui: UiState,
    locomotion: LocomotionState,
    frame: u64,
    elapsed: f32,
}

impl SimContext {
    pub fn new(config: SimConfig) -> Self {
        let player = PlayerState::spawn(config.world.spawn);
        let integrator = MovementIntegrator::new(
            config.movement.clone(),
            config.collision.response,
            config.world.bounds,
        );
        Self {
            player,
            camera: CameraRig::new(config.camera.clone()),
            integrator,
            oracle: CollisionOracle::new(&config.collision),
            missions: MissionProximityDetector::new(&config.missions),
            animation: AnimationMixer::new(config.animation.clone()),
            ui: UiState::default(),
            locomotion: LocomotionState::Idle.next(&player, config.movement.move_threshold),
            frame: 0,
            elapsed: 0.0,
            config,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// Direct access for hosts that teleport the player (respawn, cutscenes)
    pub fn player_mut(&mut self) -> &mut PlayerState {
        &mut self.player
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn oracle(&self) -> &CollisionOracle {
        &self.oracle
    }

    pub fn missions(&self) -> &MissionProximityDetector {
        &self.missions
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn locomotion(&self) -> LocomotionState {
        self.locomotion
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn register_colliders(&mut self, colliders: Vec<ColliderBox>) {
        self.oracle.register(colliders);
    }

    pub fn attach_character(&mut self, rig: CharacterRig) {
        self.animation.attach_clips(rig.clips);
    }

    /// Run one frame: movement, camera, proximity, UI flags, animation
    pub fn tick(&mut self, intent: &FrameIntent, raw_dt: f32) -> FrameOutput {
        let dt = clamp_delta(raw_dt, self.config.movement.max_dt);

        self.camera
            .apply_input(intent.yaw_delta, intent.pitch_delta, intent.zoom_delta);

        let outcome = self.integrator.step(
            &mut self.player,
            intent,
            self.camera.yaw(),
            &self.oracle,
            dt,
        );

        let pose = self.camera.update(self.player.position, dt);

        let change = self.missions.update(self.player.position);
        if let Some(change) = &change {
            log::info!("Mission proximity: {:?}", change);
        }
        self.ui
            .update(self.missions.active_key(), intent.interact, intent.close);

        self.locomotion = self
            .locomotion
            .next(&self.player, self.config.movement.move_threshold);
        self.animation.update(self.locomotion, dt);

        self.elapsed += dt;
        self.frame += 1;

        FrameOutput {
            frame: self.frame,
            dt,
            player_position: self.player.position,
            player_velocity: self.player.velocity,
            player_facing: self.player.facing,
            grounded: self.player.grounded,
            locomotion: self.locomotion,
            animation: self.animation.blend(),
            camera: pose,
            active_mission: self.missions.active_key().map(str::to_string),
            proximity_change: change,
            ui: self.ui.clone(),
            minimap: self.config.world.bounds.normalize_xz(self.player.position),
            marker_heights: self.missions.display_heights(self.elapsed),
            blocked: outcome.blocked,
        }
    }

    pub fn snapshot(&self) -> SimSnapshot {
        SimSnapshot {
            frame: self.frame,
            elapsed: self.elapsed,
            player: self.player,
            camera: *self.camera.state(),
            locomotion: self.locomotion,
            active_mission: self.missions.active_key().map(str::to_string),
            ui: self.ui.clone(),
            animation: self.animation.snapshot(),
        }
    }

    /// Overwrite mutable state; colliders, rig clips and config are kept
    pub fn restore(&mut self, snapshot: SimSnapshot) {
        self.frame = snapshot.frame;
        self.elapsed = snapshot.elapsed;
        self.player = snapshot.player;
        self.camera.restore(snapshot.camera);
        self.locomotion = snapshot.locomotion;
        self.missions.set_active_key(snapshot.active_mission.as_deref());
        self.ui = snapshot.ui;
        self.animation.restore(snapshot.animation);
    }
}
