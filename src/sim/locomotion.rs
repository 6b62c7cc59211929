use serde::{Deserialize, Serialize};

use super::movement::PlayerState;

/// Animation-facing movement state, derived fresh every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocomotionState {
    #[default]
    Idle,
    Walking,
    Sprinting,
    Airborne,
}

impl LocomotionState {
    /// Priority decision: airborne, then sprinting, then walking, then idle.
    /// The previous state does not influence the result.
    pub fn next(self, player: &PlayerState, move_threshold: f32) -> LocomotionState {
        if !player.grounded {
            return LocomotionState::Airborne;
        }
        let moving = player.horizontal_speed() > move_threshold;
        match (moving, player.sprint) {
            (true, true) => LocomotionState::Sprinting,
            (true, false) => LocomotionState::Walking,
            (false, _) => LocomotionState::Idle,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            LocomotionState::Idle => "idle",
            LocomotionState::Walking => "walking",
            LocomotionState::Sprinting => "sprinting",
            LocomotionState::Airborne => "airborne",
        }
    }
}
