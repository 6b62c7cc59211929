//! Headless per-frame simulation: input, movement, camera, missions, animation.

pub mod animation;
pub mod app;
pub mod camera;
pub mod collision;
pub mod context;
pub mod input;
pub mod locomotion;
pub mod missions;
pub mod movement;

pub use animation::{AnimationBlend, AnimationMixer, AnimationSnapshot};
pub use app::App;
pub use camera::{orbit_offset, CameraPose, CameraRig, CameraState};
pub use collision::{ColliderBox, CollisionOracle};
pub use context::{FrameOutput, SimContext, SimSnapshot};
pub use input::{AnalogInput, FrameIntent, InputAggregator, VirtualJoystick};
pub use locomotion::LocomotionState;
pub use missions::{MissionMarker, MissionProximityDetector, ProximityChange, UiState};
pub use movement::{camera_basis, MovementIntegrator, PlayerState, StepOutcome};
