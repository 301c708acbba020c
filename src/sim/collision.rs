//! Bounding-sphere collision
//!
//! The only collision test in the game: player sphere against asteroid sphere.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Center + radius approximation of a collider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// True when the spheres overlap or touch
    #[inline]
    pub fn intersects(&self, other: &BoundingSphere) -> bool {
        spheres_intersect(self.center, self.radius, other.center, other.radius)
    }
}

/// Sphere-sphere overlap test (touching counts as a hit)
#[inline]
pub fn spheres_intersect(a_center: Vec3, a_radius: f32, b_center: Vec3, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    a_center.distance_squared(b_center) <= reach * reach
}
