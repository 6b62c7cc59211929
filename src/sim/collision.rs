//! Static collision: a handful of axis-aligned boxes taken from named world meshes.
//!
//! The box list is small (single digits), so queries are a linear scan.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::CollisionConfig;
use crate::math::AABB;

/// A static blocking volume and the mesh it came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColliderBox {
    pub bounds: AABB,
    pub source: String,
}

impl ColliderBox {
    pub fn new(source: impl Into<String>, bounds: AABB) -> Self {
        Self {
            bounds,
            source: source.into(),
        }
    }
}

/// Relative slack when comparing overlap volumes across a move
const OVERLAP_TOLERANCE: f32 = 1e-5;
/// Face contacts within this distance of the start still count
const CONTACT_SLOP: f32 = 1e-4;

#[derive(Debug, Clone, Default)]
pub struct CollisionOracle {
    colliders: Vec<ColliderBox>,
    player_radius: f32,
    player_height: f32,
}

impl CollisionOracle {
    pub fn new(config: &CollisionConfig) -> Self {
        Self {
            colliders: Vec::new(),
            player_radius: config.player_radius,
            player_height: config.player_height,
        }
    }

    /// Install the world's colliders, replacing any previous set
    pub fn register(&mut self, colliders: Vec<ColliderBox>) {
        log::info!("Registered {} static colliders", colliders.len());
        for collider in &colliders {
            log::debug!(
                "  collider {:?}: {:?} .. {:?}",
                collider.source,
                collider.bounds.min,
                collider.bounds.max
            );
        }
        self.colliders = colliders;
    }

    pub fn colliders(&self) -> &[ColliderBox] {
        &self.colliders
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Player volume with its feet at `position`
    pub fn player_box(&self, position: Vec3) -> AABB {
        AABB::from_feet(position, self.player_radius, self.player_height)
    }

    pub fn would_collide(&self, candidate: Vec3) -> bool {
        self.first_hit(candidate).is_some()
    }

    /// First collider the player box would overlap at `candidate`
    pub fn first_hit(&self, candidate: Vec3) -> Option<&ColliderBox> {
        let player = self.player_box(candidate);
        self.colliders.iter().find(|c| c.bounds.intersects(&player))
    }

    pub fn player_height(&self) -> f32 {
        self.player_height
    }

    /// Whether the player may move from `from` to `to`.
    ///
    /// Boxes the player is not inside must stay clear. Boxes it already overlaps
    /// (colliders that arrived late) may be left, but the overlap must not grow.
    pub fn admits(&self, from: Vec3, to: Vec3) -> bool {
        let before = self.player_box(from);
        let after = self.player_box(to);
        self.colliders.iter().all(|c| {
            if !c.bounds.intersects(&after) {
                return true;
            }
            if !c.bounds.intersects(&before) {
                return false;
            }
            let was = c.bounds.overlap_volume(&before);
            c.bounds.overlap_volume(&after) <= was + OVERLAP_TOLERANCE * was.max(1.0)
        })
    }

    /// Where a vertical move from `from` to `to` first meets a collider face:
    /// the highest top below the feet when falling, the lowest underside above
    /// the head when rising. `None` if nothing is in the way.
    pub fn vertical_contact(&self, from: Vec3, to: Vec3) -> Option<Vec3> {
        let swept = self.player_box(to);
        let hits = self
            .colliders
            .iter()
            .filter(|c| c.bounds.intersects(&swept))
            .map(|c| c.bounds);

        let y = if to.y < from.y {
            hits.map(|b| b.max.y)
                .filter(|&top| top <= from.y + CONTACT_SLOP)
                .reduce(f32::max)
        } else {
            hits.map(|b| b.min.y - self.player_height)
                .filter(|&y| y >= from.y - CONTACT_SLOP)
                .reduce(f32::min)
        }?;
        Some(Vec3::new(to.x, y, to.z))
    }
}
