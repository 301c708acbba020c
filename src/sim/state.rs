//! Asteroid field state types
//!
//! Slots are identified by their index into the fixed pool and are reset in
//! place, never reallocated.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collision::BoundingSphere;
use super::spawn::{SpawnAnimator, SpawnTween};

/// Which asteroid mesh a slot shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AsteroidModel {
    Rock1,
    Rock2,
    Rock3,
    Rock4,
}

impl AsteroidModel {
    /// Model for the slot at `index` in a pool of `pool_size`
    pub fn for_slot(index: usize, pool_size: usize) -> Self {
        match index.checked_rem(pool_size) {
            Some(0) => AsteroidModel::Rock1,
            Some(1) => AsteroidModel::Rock2,
            Some(2) => AsteroidModel::Rock3,
            _ => AsteroidModel::Rock4,
        }
    }

    pub fn asset_name(&self) -> &'static str {
        match self {
            AsteroidModel::Rock1 => "asteroid_1_0",
            AsteroidModel::Rock2 => "asteroid_2_0",
            AsteroidModel::Rock3 => "asteroid_3_0",
            AsteroidModel::Rock4 => "asteroid_4_0",
        }
    }
}

/// One reusable asteroid in the pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsteroidSlot {
    pub index: usize,
    pub model: AsteroidModel,
    pub position: Vec3,
    /// Spin rate per axis (radians/s)
    pub spin: Vec3,
    /// Accumulated Euler rotation from spinning
    pub rotation: Vec3,
    /// Current uniform scale (grows during the spawn tween)
    pub scale: f32,
    /// Scale chosen at spawn
    pub target_scale: f32,
    pub visible: bool,
    /// Collider radius at scale 1
    pub bounding_radius: f32,
    pub tween: SpawnTween,
}

impl AsteroidSlot {
    /// A hidden slot
    pub fn new(index: usize, pool_size: usize, bounding_radius: f32) -> Self {
        Self {
            index,
            model: AsteroidModel::for_slot(index, pool_size),
            position: Vec3::ZERO,
            spin: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
            target_scale: 1.0,
            visible: false,
            bounding_radius,
            tween: SpawnTween::default(),
        }
    }

    /// World-space collider
    pub fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::new(self.position, self.bounding_radius * self.scale)
    }

    /// Advance spin and scale-in animation
    pub fn animate(&mut self, dt: f32) {
        self.rotation += self.spin * dt;
        if self.tween.is_animating() {
            self.scale = self.tween.advance(dt);
        }
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.tween.stop();
    }
}

/// Field state machine mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldMode {
    /// Built but not yet ticked
    Uninitialized,
    /// Spawning and checking collisions
    Playing,
    /// Player destroyed, counting down to reset
    Exploding,
}

/// Things that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldEvent {
    /// Slot became visible ahead of the player
    Spawned { slot: usize },
    /// Player hit this slot; field is now exploding
    Collision { slot: usize },
    /// Field cleared and play resumed
    Reset,
}

/// Read-only view of the field for debugging and dumps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSnapshot {
    pub mode: FieldMode,
    pub next_slot: usize,
    pub remaining_spawn_time: f32,
    pub remaining_explode_time: f32,
    pub spawn_count: u64,
    pub game_over_count: u64,
    pub slots: Vec<AsteroidSlot>,
}
