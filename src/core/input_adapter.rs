use glam::Vec2;
use std::collections::{BTreeMap, HashSet};
use winit::event::{DeviceEvent, ElementState, MouseButton, MouseScrollDelta, TouchPhase, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::config::InputConfig;
use crate::sim::input::{AnalogInput, VirtualJoystick};
use crate::traits::controller::{Button, Controller};

/// Pixels of trackpad scroll treated as one wheel line
const PIXELS_PER_LINE: f32 = 40.0;

/// Adapter that bridges Winit events to the Controller trait and per-frame analog input
#[derive(Debug, Clone)]
pub struct WinitController {
    /// Currently pressed buttons
    pressed_keys: HashSet<Button>,
    /// All pressed buttons as a vec (for efficient get_down_keys)
    pressed_vec: Vec<Button>,
    /// Current mouse position (relative to window)
    mouse_position: Option<Vec2>,
    /// Pointer movement since last reset, in pixels
    mouse_delta: Vec2,
    /// Zoom since last reset; positive moves the camera away
    zoom_delta: f32,
    pointer_locked: bool,
    /// Active touches by id, in arrival order of ids
    touches: BTreeMap<u64, Vec2>,
    joystick_touch: Option<u64>,
    joystick: VirtualJoystick,
    pinch_distance: Option<f32>,
    pinch_zoom_scale: f32,
}

impl WinitController {
    pub fn new(config: &InputConfig) -> Self {
        Self {
            pressed_keys: HashSet::new(),
            pressed_vec: Vec::new(),
            mouse_position: None,
            mouse_delta: Vec2::ZERO,
            zoom_delta: 0.0,
            pointer_locked: false,
            touches: BTreeMap::new(),
            joystick_touch: None,
            joystick: VirtualJoystick::new(config.joystick_radius),
            pinch_distance: None,
            pinch_zoom_scale: config.pinch_zoom_scale,
        }
    }

    /// Process a Winit WindowEvent and update internal state
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    if let Some(button) = Self::keycode_to_button(keycode) {
                        self.set_button(button, event.state);
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(btn) = Self::mouse_button_to_button(*button) {
                    self.set_button(btn, *state);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let new_pos = Vec2::new(position.x as f32, position.y as f32);
                if let Some(old_pos) = self.mouse_position {
                    self.mouse_delta += new_pos - old_pos;
                }
                self.mouse_position = Some(new_pos);
            }
            WindowEvent::CursorLeft { .. } => {
                self.mouse_position = None;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
                };
                // scrolling up pulls the camera in
                self.zoom_delta -= lines;
            }
            WindowEvent::Touch(touch) => {
                let location = Vec2::new(touch.location.x as f32, touch.location.y as f32);
                self.process_touch(touch.id, touch.phase, location);
            }
            WindowEvent::Focused(false) => self.release_all(),
            _ => {}
        }
    }

    /// Raw mouse motion only counts while the pointer is locked
    pub fn process_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            if self.pointer_locked {
                self.mouse_delta += Vec2::new(*dx as f32, *dy as f32);
            }
        }
    }

    /// First finger drives the joystick; a second finger turns the pair into a pinch
    pub fn process_touch(&mut self, id: u64, phase: TouchPhase, location: Vec2) {
        match phase {
            TouchPhase::Started => {
                self.touches.insert(id, location);
                if self.joystick_touch.is_none() {
                    self.joystick_touch = Some(id);
                    self.joystick.begin(location);
                }
                self.pinch_distance = self.current_pinch_distance();
            }
            TouchPhase::Moved => {
                if let Some(pos) = self.touches.get_mut(&id) {
                    *pos = location;
                }
                if self.joystick_touch == Some(id) {
                    self.joystick.drag_to(location);
                }
                if let (Some(previous), Some(current)) =
                    (self.pinch_distance, self.current_pinch_distance())
                {
                    // fingers spreading apart zooms in
                    self.zoom_delta += (previous - current) * self.pinch_zoom_scale;
                    self.pinch_distance = Some(current);
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                self.touches.remove(&id);
                if self.joystick_touch == Some(id) {
                    self.joystick_touch = None;
                    self.joystick.release();
                }
                self.pinch_distance = self.current_pinch_distance();
            }
        }
    }

    fn current_pinch_distance(&self) -> Option<f32> {
        let mut points = self.touches.values();
        let a = points.next()?;
        let b = points.next()?;
        Some(a.distance(*b))
    }

    fn set_button(&mut self, button: Button, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if self.pressed_keys.insert(button) {
                    self.pressed_vec.push(button);
                }
            }
            ElementState::Released => {
                if self.pressed_keys.remove(&button) {
                    self.pressed_vec.retain(|&b| b != button);
                }
            }
        }
    }

    /// Drop every held button, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.pressed_keys.clear();
        self.pressed_vec.clear();
    }

    pub fn set_pointer_locked(&mut self, locked: bool) {
        self.pointer_locked = locked;
    }

    pub fn pointer_locked(&self) -> bool {
        self.pointer_locked
    }

    /// Analog input gathered since the last call; resets the per-frame deltas
    pub fn take_analog(&mut self) -> AnalogInput {
        let analog = AnalogInput {
            drag: self.mouse_delta,
            zoom: self.zoom_delta,
            joystick: self.joystick.vector(),
            pointer_locked: self.pointer_locked,
        };
        self.reset_deltas();
        analog
    }

    /// Reset per-frame state (mouse delta, zoom)
    pub fn reset_deltas(&mut self) {
        self.mouse_delta = Vec2::ZERO;
        self.zoom_delta = 0.0;
    }

    /// Get current mouse position (if available)
    pub fn mouse_position(&self) -> Option<Vec2> {
        self.mouse_position
    }

    /// Get accumulated mouse delta since last reset
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// Map Winit KeyCode to Button
    fn keycode_to_button(keycode: KeyCode) -> Option<Button> {
        match keycode {
            KeyCode::KeyW => Some(Button::KeyW),
            KeyCode::KeyA => Some(Button::KeyA),
            KeyCode::KeyS => Some(Button::KeyS),
            KeyCode::KeyD => Some(Button::KeyD),
            KeyCode::ArrowUp => Some(Button::ArrowUp),
            KeyCode::ArrowDown => Some(Button::ArrowDown),
            KeyCode::ArrowLeft => Some(Button::ArrowLeft),
            KeyCode::ArrowRight => Some(Button::ArrowRight),
            KeyCode::KeyE | KeyCode::Enter => Some(Button::KeyE),
            KeyCode::Space => Some(Button::Space),
            KeyCode::ShiftLeft | KeyCode::ShiftRight => Some(Button::Shift),
            KeyCode::Escape => Some(Button::Escape),
            _ => None,
        }
    }

    /// Map Winit MouseButton to Button
    fn mouse_button_to_button(button: MouseButton) -> Option<Button> {
        match button {
            MouseButton::Left => Some(Button::MouseLeft),
            MouseButton::Right => Some(Button::MouseRight),
            _ => None,
        }
    }
}

impl Default for WinitController {
    fn default() -> Self {
        Self::new(&InputConfig::default())
    }
}

impl Controller for WinitController {
    fn is_down(&self, button: Button) -> bool {
        self.pressed_keys.contains(&button)
    }

    fn get_down_keys(&self) -> &[Button] {
        &self.pressed_vec
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;
    use winit::event::DeviceId;

    // KeyEvent carries private platform fields, so keyboard input is covered
    // through the keycode mapping; pointer and touch events are built directly.

    fn device() -> DeviceId {
        // SAFETY: only used as an opaque id inside synthetic test events
        unsafe { DeviceId::dummy() }
    }

    fn cursor_to(x: f64, y: f64) -> WindowEvent {
        WindowEvent::CursorMoved {
            device_id: device(),
            position: PhysicalPosition::new(x, y),
        }
    }

    #[test]
    fn test_new_controller_empty() {
        let controller = WinitController::default();
        assert!(!controller.is_down(Button::KeyW));
        assert_eq!(controller.get_down_keys().len(), 0);
        assert_eq!(controller.mouse_position(), None);
        assert_eq!(controller.mouse_delta(), Vec2::ZERO);
    }

    #[test]
    fn test_keycode_mapping() {
        assert_eq!(WinitController::keycode_to_button(KeyCode::KeyW), Some(Button::KeyW));
        assert_eq!(WinitController::keycode_to_button(KeyCode::ShiftRight), Some(Button::Shift));
        assert_eq!(WinitController::keycode_to_button(KeyCode::ArrowLeft), Some(Button::ArrowLeft));
        assert_eq!(WinitController::keycode_to_button(KeyCode::KeyZ), None);
    }

    #[test]
    fn test_mouse_button_press_release() {
        let mut controller = WinitController::default();
        controller.process_event(&WindowEvent::MouseInput {
            device_id: device(),
            state: ElementState::Pressed,
            button: MouseButton::Left,
        });
        assert!(controller.is_down(Button::MouseLeft));

        controller.process_event(&WindowEvent::MouseInput {
            device_id: device(),
            state: ElementState::Released,
            button: MouseButton::Left,
        });
        assert!(!controller.is_down(Button::MouseLeft));
        assert!(controller.get_down_keys().is_empty());
    }

    #[test]
    fn test_cursor_delta_accumulates_and_resets() {
        let mut controller = WinitController::default();
        controller.process_event(&cursor_to(100.0, 100.0));
        controller.process_event(&cursor_to(110.0, 95.0));
        controller.process_event(&cursor_to(115.0, 95.0));
        assert_eq!(controller.mouse_delta(), Vec2::new(15.0, -5.0));

        let analog = controller.take_analog();
        assert_eq!(analog.drag, Vec2::new(15.0, -5.0));
        assert_eq!(controller.mouse_delta(), Vec2::ZERO);
        assert_eq!(controller.mouse_position(), Some(Vec2::new(115.0, 95.0)));
    }

    #[test]
    fn test_raw_motion_only_when_locked() {
        let mut controller = WinitController::default();
        let motion = DeviceEvent::MouseMotion { delta: (4.0, 2.0) };

        controller.process_device_event(&motion);
        assert_eq!(controller.mouse_delta(), Vec2::ZERO);

        controller.set_pointer_locked(true);
        controller.process_device_event(&motion);
        assert_eq!(controller.mouse_delta(), Vec2::new(4.0, 2.0));
        assert!(controller.take_analog().pointer_locked);
    }

    #[test]
    fn test_wheel_up_zooms_in() {
        let mut controller = WinitController::default();
        controller.process_event(&WindowEvent::MouseWheel {
            device_id: device(),
            delta: MouseScrollDelta::LineDelta(0.0, 2.0),
            phase: TouchPhase::Moved,
        });
        assert_eq!(controller.take_analog().zoom, -2.0);
        assert_eq!(controller.take_analog().zoom, 0.0);
    }

    #[test]
    fn test_touch_drives_joystick() {
        let mut controller = WinitController::default();
        controller.process_touch(1, TouchPhase::Started, Vec2::new(100.0, 400.0));
        // drag up past the radius: full forward
        controller.process_touch(1, TouchPhase::Moved, Vec2::new(100.0, 200.0));
        let v = controller.take_analog().joystick;
        assert!((v - Vec2::new(0.0, 1.0)).length() < 1e-5, "got {v:?}");

        controller.process_touch(1, TouchPhase::Ended, Vec2::new(100.0, 200.0));
        assert_eq!(controller.take_analog().joystick, Vec2::ZERO);
    }

    #[test]
    fn test_pinch_spread_zooms_in() {
        let mut controller = WinitController::default();
        controller.process_touch(1, TouchPhase::Started, Vec2::new(100.0, 100.0));
        controller.process_touch(2, TouchPhase::Started, Vec2::new(200.0, 100.0));
        controller.process_touch(2, TouchPhase::Moved, Vec2::new(300.0, 100.0));
        let zoom = controller.take_analog().zoom;
        assert!(zoom < 0.0, "spreading fingers should zoom in, got {zoom}");
    }

    #[test]
    fn test_focus_loss_releases_buttons() {
        let mut controller = WinitController::default();
        controller.process_event(&WindowEvent::MouseInput {
            device_id: device(),
            state: ElementState::Pressed,
            button: MouseButton::Right,
        });
        controller.process_event(&WindowEvent::Focused(false));
        assert!(!controller.is_down(Button::MouseRight));
    }
}
