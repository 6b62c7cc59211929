//! Mission markers, proximity detection and the UI flags it drives.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::{MarkerSpec, MissionConfig, ProximityPolicy};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionMarker {
    pub key: String,
    pub position: Vec3,
    /// Resting height of the floating marker mesh
    pub base_height: f32,
}

impl From<&MarkerSpec> for MissionMarker {
    fn from(marker: &MarkerSpec) -> Self {
        Self {
            key: marker.key.clone(),
            position: marker.position,
            base_height: marker.position.y,
        }
    }
}

/// Active-marker transitions reported to the UI collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProximityChange {
    Entered { key: String },
    Left { key: String },
    Switched { from: String, to: String },
}

#[derive(Debug, Clone)]
pub struct MissionProximityDetector {
    markers: Vec<MissionMarker>,
    radius: f32,
    policy: ProximityPolicy,
    float_amplitude: f32,
    float_frequency: f32,
    active: Option<usize>,
}

impl MissionProximityDetector {
    pub fn new(config: &MissionConfig) -> Self {
        Self {
            markers: config.markers.iter().map(MissionMarker::from).collect(),
            radius: config.interaction_radius,
            policy: config.policy,
            float_amplitude: config.float_amplitude,
            float_frequency: config.float_frequency,
            active: None,
        }
    }

    pub fn markers(&self) -> &[MissionMarker] {
        &self.markers
    }

    pub fn active_key(&self) -> Option<&str> {
        self.active.map(|i| self.markers[i].key.as_str())
    }

    /// Force the active marker, e.g. when restoring a snapshot. Unknown keys clear it.
    pub fn set_active_key(&mut self, key: Option<&str>) {
        self.active = key.and_then(|k| self.markers.iter().position(|m| m.key == k));
    }

    /// Index of the marker that should be active for `player`, without changing state
    pub fn select(&self, player: Vec3) -> Option<usize> {
        let in_range = self
            .markers
            .iter()
            .enumerate()
            .map(|(i, m)| (i, m.position.distance(player)))
            .filter(|&(_, d)| d <= self.radius);

        match self.policy {
            ProximityPolicy::FirstInList => in_range.map(|(i, _)| i).next(),
            ProximityPolicy::Nearest => in_range
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(i, _)| i),
        }
    }

    /// Re-evaluate the active marker; returns a change when the key differs from last frame
    pub fn update(&mut self, player: Vec3) -> Option<ProximityChange> {
        let next = self.select(player);
        if next == self.active {
            return None;
        }
        let key = |i: usize| self.markers[i].key.clone();
        let change = match (self.active, next) {
            (None, Some(n)) => ProximityChange::Entered { key: key(n) },
            (Some(p), None) => ProximityChange::Left { key: key(p) },
            (Some(p), Some(n)) => ProximityChange::Switched {
                from: key(p),
                to: key(n),
            },
            (None, None) => return None,
        };
        self.active = next;
        Some(change)
    }

    /// Idle bob height for each marker at `elapsed` seconds, offset per marker
    pub fn display_heights(&self, elapsed: f32) -> Vec<f32> {
        self.markers
            .iter()
            .enumerate()
            .map(|(i, m)| {
                let phase = i as f32 * 0.9;
                m.base_height + self.float_amplitude * (elapsed * self.float_frequency + phase).sin()
            })
            .collect()
    }
}

/// Prompt and popup flags exposed to the host UI
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    pub prompt_visible: bool,
    pub open_popup: Option<String>,
}

impl UiState {
    /// Apply this frame's interact/close edges against the active marker
    pub fn update(&mut self, active: Option<&str>, interact: bool, close: bool) {
        if close {
            if let Some(key) = self.open_popup.take() {
                log::debug!("Closed popup {key}");
            }
        } else if interact {
            if let Some(key) = active {
                if self.open_popup.as_deref() != Some(key) {
                    log::debug!("Opened popup {key}");
                    self.open_popup = Some(key.to_string());
                }
            }
        }
        self.prompt_visible = active.is_some() && self.open_popup.is_none();
    }
}
