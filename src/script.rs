//! Recorded input for headless runs.
//!
//! ```json
//! { "steps": [ { "frames": 60, "buttons": ["KeyW", "Shift"], "drag": [12.0, 0.0] } ] }
//! ```
//! Every field of a step is optional; analog values repeat on each of its frames.

use anyhow::{Context, Result};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::sim::AnalogInput;
use crate::traits::{Button, Controller};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptStep {
    pub frames: u32,
    pub buttons: Vec<Button>,
    pub joystick: Vec2,
    pub drag: Vec2,
    pub zoom: f32,
    pub pointer_locked: bool,
}

impl Default for ScriptStep {
    fn default() -> Self {
        Self {
            frames: 1,
            buttons: Vec::new(),
            joystick: Vec2::ZERO,
            drag: Vec2::ZERO,
            zoom: 0.0,
            pointer_locked: false,
        }
    }
}

impl ScriptStep {
    pub fn idle(frames: u32) -> Self {
        Self {
            frames,
            ..Default::default()
        }
    }

    pub fn controller(&self) -> ScriptedController {
        ScriptedController::new(self.buttons.clone())
    }

    pub fn analog(&self) -> AnalogInput {
        AnalogInput {
            drag: self.drag,
            zoom: self.zoom,
            joystick: self.joystick,
            pointer_locked: self.pointer_locked,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputScript {
    pub steps: Vec<ScriptStep>,
}

impl InputScript {
    pub fn idle(frames: u32) -> Self {
        Self {
            steps: vec![ScriptStep::idle(frames)],
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid input script")
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .context(format!("Failed to read input script: {:?}", path))?;
        Self::from_json_str(&json)
    }

    pub fn total_frames(&self) -> u64 {
        self.steps.iter().map(|s| s.frames as u64).sum()
    }

    /// One entry per frame, in order
    pub fn frames(&self) -> impl Iterator<Item = (ScriptedController, AnalogInput)> + '_ {
        self.steps.iter().flat_map(|step| {
            let controller = step.controller();
            let analog = step.analog();
            (0..step.frames).map(move |_| (controller.clone(), analog))
        })
    }
}

/// Fixed set of held buttons
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptedController {
    pressed: Vec<Button>,
}

impl ScriptedController {
    pub fn new(mut pressed: Vec<Button>) -> Self {
        pressed.sort_by_key(|b| *b as u8);
        pressed.dedup();
        Self { pressed }
    }
}

impl Controller for ScriptedController {
    fn is_down(&self, button: Button) -> bool {
        self.pressed.contains(&button)
    }

    fn get_down_keys(&self) -> &[Button] {
        &self.pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_steps() {
        let script = InputScript::from_json_str(
            r#"{ "steps": [
                { "frames": 3, "buttons": ["KeyW", "Shift"] },
                { "drag": [4.0, -2.0] }
            ] }"#,
        )
        .unwrap();
        assert_eq!(script.total_frames(), 4);
        assert_eq!(script.steps[1].frames, 1);
        assert_eq!(script.steps[1].drag, Vec2::new(4.0, -2.0));
    }

    #[test]
    fn frames_expand_each_step() {
        let script = InputScript {
            steps: vec![
                ScriptStep {
                    frames: 2,
                    buttons: vec![Button::KeyE],
                    ..Default::default()
                },
                ScriptStep::idle(1),
            ],
        };
        let frames: Vec<_> = script.frames().collect();
        assert_eq!(frames.len(), 3);
        assert!(frames[0].0.is_down(Button::KeyE));
        assert!(frames[1].0.is_down(Button::KeyE));
        assert!(frames[2].0.get_down_keys().is_empty());
    }

    #[test]
    fn unknown_button_is_an_error() {
        assert!(InputScript::from_json_str(r#"{ "steps": [ { "buttons": ["KeyQ"] } ] }"#).is_err());
    }

    #[test]
    fn duplicate_buttons_collapse() {
        let controller = ScriptedController::new(vec![Button::KeyW, Button::KeyW]);
        assert_eq!(controller.get_down_keys(), &[Button::KeyW]);
    }
}
