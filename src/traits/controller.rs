use serde::{Deserialize, Serialize};

/// Input button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    KeyE,
    Space,
    Shift,
    Escape,
    MouseLeft,
    MouseRight,
}

impl Button {
    pub const ALL: [Button; 14] = [
        Button::KeyW,
        Button::KeyA,
        Button::KeyS,
        Button::KeyD,
        Button::ArrowUp,
        Button::ArrowDown,
        Button::ArrowLeft,
        Button::ArrowRight,
        Button::KeyE,
        Button::Space,
        Button::Shift,
        Button::Escape,
        Button::MouseLeft,
        Button::MouseRight,
    ];
}

/// Controller - handles button input states
pub trait Controller {
    /// Check if button is currently down
    fn is_down(&self, button: Button) -> bool;

    /// Get all currently pressed buttons
    fn get_down_keys(&self) -> &[Button];
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_button_hash() {
        let mut set = HashSet::new();
        set.insert(Button::KeyW);
        set.insert(Button::KeyA);
        set.insert(Button::Space);

        assert!(set.contains(&Button::KeyW));
        assert!(set.contains(&Button::KeyA));
        assert!(!set.contains(&Button::KeyS));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_all_button_variants_unique() {
        let set: HashSet<_> = Button::ALL.iter().collect();
        assert_eq!(set.len(), Button::ALL.len());
    }

    #[test]
    fn test_button_serde_names() {
        let json = serde_json::to_string(&Button::ArrowLeft).unwrap();
        assert_eq!(json, "\"ArrowLeft\"");
        let parsed: Button = serde_json::from_str("\"Shift\"").unwrap();
        assert_eq!(parsed, Button::Shift);
    }

    // Test mock controller implementation
    struct MockController {
        pressed: Vec<Button>,
    }

    impl Controller for MockController {
        fn is_down(&self, button: Button) -> bool {
            self.pressed.contains(&button)
        }

        fn get_down_keys(&self) -> &[Button] {
            &self.pressed
        }
    }

    #[test]
    fn test_controller_is_down() {
        let controller = MockController {
            pressed: vec![Button::KeyW, Button::Space],
        };

        assert!(controller.is_down(Button::KeyW));
        assert!(controller.is_down(Button::Space));
        assert!(!controller.is_down(Button::KeyA));
    }

    #[test]
    fn test_controller_no_keys_pressed() {
        let controller = MockController { pressed: vec![] };

        assert!(!controller.is_down(Button::KeyW));
        assert_eq!(controller.get_down_keys().len(), 0);
    }
}
