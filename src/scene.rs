//! Fixed scene literals: spawn point, world extent, blocked mesh names and mission markers.

use glam::Vec3;

use crate::config::{MarkerSpec, WorldBounds};

/// Where the player appears when the scene starts
pub const SPAWN_POSITION: [f32; 3] = [0.0, 0.0, 6.0];

/// Playable rectangle on the XZ plane
pub const WORLD_BOUNDS: WorldBounds = WorldBounds {
    min_x: -48.0,
    max_x: 48.0,
    min_z: -48.0,
    max_z: 48.0,
};

/// Static world meshes that block the player
pub const BLOCKED_MESHES: &[&str] = &[
    "Building_Main",
    "Building_Annex",
    "Fountain",
    "Wall_North",
    "Wall_South",
    "Kiosk",
    "Statue",
];

/// Mission markers in activation order
pub fn default_markers() -> Vec<MarkerSpec> {
    [
        ("about", Vec3::new(-12.0, 1.2, -6.0)),
        ("projects", Vec3::new(10.0, 1.2, -14.0)),
        ("gallery", Vec3::new(18.0, 1.2, 8.0)),
        ("contact", Vec3::new(-16.0, 1.2, 14.0)),
    ]
    .into_iter()
    .map(|(key, position)| MarkerSpec {
        key: key.to_string(),
        position,
    })
    .collect()
}

pub fn default_blocked_meshes() -> Vec<String> {
    BLOCKED_MESHES.iter().map(|name| name.to_string()).collect()
}
