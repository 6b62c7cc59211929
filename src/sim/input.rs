//! Input aggregation: held buttons, pointer drag, zoom and a virtual joystick
//! folded into one [`FrameIntent`] per frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::config::InputConfig;
use crate::traits::controller::{Button, Controller};

/// Analog samples gathered by a host adapter since the previous frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalogInput {
    /// Pointer movement in pixels (x right, y down)
    pub drag: Vec2,
    /// Zoom steps; positive moves the camera away
    pub zoom: f32,
    /// Joystick vector, x right, y forward, magnitude <= 1
    pub joystick: Vec2,
    /// Pointer-lock equivalent: drag applies without a held button
    pub pointer_locked: bool,
}

/// On-screen stick: origin where the finger landed, offset clamped to a radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualJoystick {
    radius: f32,
    origin: Option<Vec2>,
    offset: Vec2,
}

impl VirtualJoystick {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            origin: None,
            offset: Vec2::ZERO,
        }
    }

    pub fn begin(&mut self, origin: Vec2) {
        self.origin = Some(origin);
        self.offset = Vec2::ZERO;
    }

    pub fn drag_to(&mut self, point: Vec2) {
        if let Some(origin) = self.origin {
            self.offset = (point - origin).clamp_length_max(self.radius.max(0.0));
        }
    }

    pub fn release(&mut self) {
        self.origin = None;
        self.offset = Vec2::ZERO;
    }

    pub fn is_active(&self) -> bool {
        self.origin.is_some()
    }

    /// Stick deflection with screen-up mapped to forward
    pub fn vector(&self) -> Vec2 {
        if self.radius <= 0.0 {
            return Vec2::ZERO;
        }
        let v = self.offset / self.radius;
        Vec2::new(v.x, -v.y)
    }
}

/// Everything the simulation needs from input for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameIntent {
    /// Camera-relative movement, x right, y forward, magnitude <= 1
    pub movement: Vec2,
    pub sprint: bool,
    /// Edge-triggered actions: true only on the frame the button went down
    pub jump: bool,
    pub interact: bool,
    pub close: bool,
    pub yaw_delta: f32,
    pub pitch_delta: f32,
    pub zoom_delta: f32,
}

/// Turns controller state and analog samples into a [`FrameIntent`]
#[derive(Debug, Clone)]
pub struct InputAggregator {
    drag_sensitivity: f32,
    previous: HashSet<Button>,
}

impl InputAggregator {
    pub fn new(config: &InputConfig) -> Self {
        Self {
            drag_sensitivity: config.drag_sensitivity,
            previous: HashSet::new(),
        }
    }

    pub fn aggregate(&mut self, controller: &dyn Controller, analog: &AnalogInput) -> FrameIntent {
        let held = |buttons: &[Button]| buttons.iter().any(|&b| controller.is_down(b));
        let axis = |positive: bool, negative: bool| match (positive, negative) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        };

        let keyboard = Vec2::new(
            axis(
                held(&[Button::KeyD, Button::ArrowRight]),
                held(&[Button::KeyA, Button::ArrowLeft]),
            ),
            axis(
                held(&[Button::KeyW, Button::ArrowUp]),
                held(&[Button::KeyS, Button::ArrowDown]),
            ),
        );
        let joystick = if analog.joystick.is_finite() {
            analog.joystick
        } else {
            Vec2::ZERO
        };
        let movement = (keyboard + joystick).clamp_length_max(1.0);

        let drag_active = analog.pointer_locked || controller.is_down(Button::MouseLeft);
        let (yaw_delta, pitch_delta) = if drag_active && analog.drag.is_finite() {
            // dragging right swings the camera right, dragging down raises it
            (
                -analog.drag.x * self.drag_sensitivity,
                analog.drag.y * self.drag_sensitivity,
            )
        } else {
            (0.0, 0.0)
        };

        let intent = FrameIntent {
            movement,
            sprint: controller.is_down(Button::Shift),
            jump: self.pressed_now(controller, Button::Space),
            interact: self.pressed_now(controller, Button::KeyE),
            close: self.pressed_now(controller, Button::Escape),
            yaw_delta,
            pitch_delta,
            zoom_delta: if analog.zoom.is_finite() { analog.zoom } else { 0.0 },
        };

        self.previous = controller.get_down_keys().iter().copied().collect();
        intent
    }

    fn pressed_now(&self, controller: &dyn Controller, button: Button) -> bool {
        controller.is_down(button) && !self.previous.contains(&button)
    }
}
