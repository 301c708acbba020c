//! Scale-in animation for freshly spawned asteroids

use serde::{Deserialize, Serialize};

use crate::consts::{SPAWN_LERP_PER_FRAME, SPAWN_REFERENCE_FPS, SPAWN_SNAP_FRACTION};

/// Anything that can grow an object into view after it spawns
pub trait SpawnAnimator {
    /// Restart the animation from scale 0 toward `target_scale`
    fn start_spawn_animation(&mut self, target_scale: f32);
    /// Advance by `dt` seconds, returning the current scale
    fn advance(&mut self, dt: f32) -> f32;
    fn is_animating(&self) -> bool;
    /// Abort without touching the reached scale
    fn stop(&mut self);
}

/// Exponential ease from 0 to a target scale
///
/// Matches a lerp of [`SPAWN_LERP_PER_FRAME`] per 60 Hz frame at any frame rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnTween {
    pub current: f32,
    pub target: f32,
    pub active: bool,
}

impl SpawnTween {
    /// Fraction of the remaining distance covered in `dt` seconds
    #[inline]
    pub fn blend_factor(dt: f32) -> f32 {
        1.0 - (1.0 - SPAWN_LERP_PER_FRAME).powf(dt * SPAWN_REFERENCE_FPS)
    }
}

impl SpawnAnimator for SpawnTween {
    fn start_spawn_animation(&mut self, target_scale: f32) {
        self.current = 0.0;
        self.target = target_scale;
        self.active = target_scale > 0.0;
        if !self.active {
            self.current = target_scale;
        }
    }

    fn advance(&mut self, dt: f32) -> f32 {
        if !self.active {
            return self.current;
        }
        self.current += (self.target - self.current) * Self::blend_factor(dt);
        if self.target - self.current <= self.target * SPAWN_SNAP_FRACTION {
            self.current = self.target;
            self.active = false;
        }
        self.current
    }

    fn is_animating(&self) -> bool {
        self.active
    }

    fn stop(&mut self) {
        self.active = false;
    }
}
