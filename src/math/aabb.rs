use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box spanning every point, or `None` for an empty slice
    pub fn from_points(points: &[Vec3]) -> Option<AABB> {
        let (first, rest) = points.split_first()?;
        let bounds = rest.iter().fold(AABB::new(*first, *first), |acc, &p| AABB {
            min: acc.min.min(p),
            max: acc.max.max(p),
        });
        Some(bounds)
    }

    /// Upright box with its base centered on `feet`
    pub fn from_feet(feet: Vec3, radius: f32, height: f32) -> AABB {
        AABB {
            min: Vec3::new(feet.x - radius, feet.y, feet.z - radius),
            max: Vec3::new(feet.x + radius, feet.y + height, feet.z + radius),
        }
    }

    pub fn union(&self, other: &AABB) -> AABB {
        AABB {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Strict overlap: boxes that only share a face do not intersect
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    pub fn contains_point(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Volume shared with `other`; zero when they are apart or only touch
    pub fn overlap_volume(&self, other: &AABB) -> f32 {
        let extent = (self.max.min(other.max) - self.min.max(other.min)).max(Vec3::ZERO);
        extent.x * extent.y * extent.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_center() {
        let aabb = AABB::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(aabb.center(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_aabb_union_non_overlapping() {
        let aabb1 = AABB::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        let aabb2 = AABB::new(Vec3::new(2.0, 2.0, 2.0), Vec3::new(3.0, 3.0, 3.0));
        let union = aabb1.union(&aabb2);
        assert_eq!(union.min, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(union.max, Vec3::new(3.0, 3.0, 3.0));
    }

    #[test]
    fn test_from_points_empty() {
        assert!(AABB::from_points(&[]).is_none());
    }

    #[test]
    fn test_from_points_spans_all() {
        let bounds = AABB::from_points(&[
            Vec3::new(-1.0, 2.0, 0.5),
            Vec3::new(3.0, -2.0, 0.0),
            Vec3::new(0.0, 0.0, 4.0),
        ])
        .unwrap();
        assert_eq!(bounds.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(bounds.max, Vec3::new(3.0, 2.0, 4.0));
    }

    #[test]
    fn test_from_feet() {
        let b = AABB::from_feet(Vec3::new(1.0, 0.0, -1.0), 0.5, 2.0);
        assert_eq!(b.min, Vec3::new(0.5, 0.0, -1.5));
        assert_eq!(b.max, Vec3::new(1.5, 2.0, -0.5));
    }

    #[test]
    fn test_intersects_overlap_and_touch() {
        let a = AABB::new(Vec3::ZERO, Vec3::ONE);
        let overlapping = AABB::new(Vec3::splat(0.5), Vec3::splat(1.5));
        let touching = AABB::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        let apart = AABB::new(Vec3::splat(3.0), Vec3::splat(4.0));

        assert!(a.intersects(&overlapping));
        assert!(overlapping.intersects(&a));
        assert!(!a.intersects(&touching), "shared faces are not a collision");
        assert!(!a.intersects(&apart));
    }

    #[test]
    fn test_overlap_volume() {
        let a = AABB::new(Vec3::ZERO, Vec3::splat(2.0));
        let b = AABB::new(Vec3::ONE, Vec3::splat(3.0));
        let touching = AABB::new(Vec3::new(2.0, 0.0, 0.0), Vec3::new(3.0, 2.0, 2.0));
        assert_eq!(a.overlap_volume(&b), 1.0);
        assert_eq!(b.overlap_volume(&a), 1.0);
        assert_eq!(a.overlap_volume(&touching), 0.0);
        assert_eq!(a.overlap_volume(&a), 8.0);
    }

    #[test]
    fn test_contains_point_inclusive() {
        let a = AABB::new(Vec3::ZERO, Vec3::ONE);
        assert!(a.contains_point(Vec3::splat(0.5)));
        assert!(a.contains_point(Vec3::ONE));
        assert!(!a.contains_point(Vec3::new(1.1, 0.5, 0.5)));
    }
}
