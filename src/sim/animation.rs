use serde::{Deserialize, Serialize};

use crate::config::AnimationConfig;
use crate::core::timer::Countdown;
use crate::loaders::AnimationClip;

use super::locomotion::LocomotionState;

/// Clip weights for the current frame; `weight` belongs to `current`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationBlend {
    pub current: String,
    pub previous: Option<String>,
    pub weight: f32,
}

/// Mixer playback state without the rig's clip list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationSnapshot {
    pub state: LocomotionState,
    pub current: Option<String>,
    pub previous: Option<String>,
    pub fade: Countdown,
}

/// Picks a clip per locomotion state and cross-fades between them
#[derive(Debug, Clone)]
pub struct AnimationMixer {
    config: AnimationConfig,
    /// Clips offered by the character rig; empty until it loads
    available: Vec<AnimationClip>,
    state: LocomotionState,
    current: Option<String>,
    previous: Option<String>,
    fade: Countdown,
}

impl AnimationMixer {
    pub fn new(config: AnimationConfig) -> Self {
        let fade = Countdown::new(config.crossfade);
        Self {
            config,
            available: Vec::new(),
            state: LocomotionState::Idle,
            current: None,
            previous: None,
            fade,
        }
    }

    /// Character rig finished loading
    pub fn attach_clips(&mut self, clips: Vec<AnimationClip>) {
        log::info!(
            "Character rig attached with clips: {:?}",
            clips.iter().map(|c| c.name.as_str()).collect::<Vec<_>>()
        );
        self.available = clips;
        // start the current state's clip without a fade
        self.current = self.clip_for(self.state);
        self.previous = None;
    }

    pub fn has_rig(&self) -> bool {
        !self.available.is_empty()
    }

    pub fn state(&self) -> LocomotionState {
        self.state
    }

    pub fn clip_name(&self, state: LocomotionState) -> &str {
        match state {
            LocomotionState::Idle => &self.config.idle_clip,
            LocomotionState::Walking => &self.config.walk_clip,
            LocomotionState::Sprinting => &self.config.run_clip,
            LocomotionState::Airborne => &self.config.jump_clip,
        }
    }

    fn clip_for(&self, state: LocomotionState) -> Option<String> {
        let name = self.clip_name(state);
        self.available
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.name.clone())
    }

    /// Track the new state and advance any running fade
    pub fn update(&mut self, state: LocomotionState, dt: f32) {
        if state != self.state {
            log::debug!("Locomotion {} -> {}", self.state.key(), state.key());
            self.state = state;
            let next = self.clip_for(state);
            // a missing clip keeps the last one playing
            if next.is_some() && next != self.current {
                self.previous = self.current.take();
                self.current = next;
                self.fade.start();
            }
        }
        if self.fade.tick(dt) {
            self.previous = None;
        }
    }

    pub fn snapshot(&self) -> AnimationSnapshot {
        AnimationSnapshot {
            state: self.state,
            current: self.current.clone(),
            previous: self.previous.clone(),
            fade: self.fade,
        }
    }

    pub fn restore(&mut self, snapshot: AnimationSnapshot) {
        self.state = snapshot.state;
        self.current = snapshot.current;
        self.previous = snapshot.previous;
        self.fade = snapshot.fade;
    }

    pub fn blend(&self) -> Option<AnimationBlend> {
        let current = self.current.clone()?;
        let (previous, weight) = match &self.previous {
            Some(prev) if self.fade.is_active() => (Some(prev.clone()), self.fade.progress()),
            _ => (None, 1.0),
        };
        Some(AnimationBlend {
            current,
            previous,
            weight,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clips(names: &[&str]) -> Vec<AnimationClip> {
        names
            .iter()
            .map(|n| AnimationClip {
                name: n.to_string(),
                duration: 1.0,
            })
            .collect()
    }

    #[test]
    fn no_rig_means_no_blend() {
        let mut mixer = AnimationMixer::new(AnimationConfig::default());
        mixer.update(LocomotionState::Walking, 0.016);
        assert_eq!(mixer.state(), LocomotionState::Walking);
        assert!(!mixer.has_rig());
        assert_eq!(mixer.blend(), None);
    }

    #[test]
    fn attaching_starts_current_state_clip() {
        let mut mixer = AnimationMixer::new(AnimationConfig::default());
        mixer.attach_clips(clips(&["idle", "walk", "run", "jump"]));
        let blend = mixer.blend().unwrap();
        assert_eq!(blend.current, "idle");
        assert_eq!(blend.previous, None);
        assert_eq!(blend.weight, 1.0);
    }

    #[test]
    fn state_change_crossfades() {
        let mut mixer = AnimationMixer::new(AnimationConfig::default());
        mixer.attach_clips(clips(&["idle", "walk", "run", "jump"]));

        mixer.update(LocomotionState::Walking, 0.0);
        mixer.update(LocomotionState::Walking, 0.1);
        let blend = mixer.blend().unwrap();
        assert_eq!(blend.current, "walk");
        assert_eq!(blend.previous.as_deref(), Some("idle"));
        assert!((blend.weight - 0.5).abs() < 1e-5);

        mixer.update(LocomotionState::Walking, 0.2);
        let blend = mixer.blend().unwrap();
        assert_eq!(blend.previous, None);
        assert_eq!(blend.weight, 1.0);
    }

    #[test]
    fn missing_clip_keeps_last_clip() {
        let mut mixer = AnimationMixer::new(AnimationConfig::default());
        mixer.attach_clips(clips(&["idle", "walk"]));
        mixer.update(LocomotionState::Airborne, 0.016);
        assert_eq!(mixer.state(), LocomotionState::Airborne);
        assert_eq!(mixer.blend().unwrap().current, "idle");
    }
}
