//! Explosion effect target
//!
//! The field only tells the effect where and when to go off; emitting
//! particles and playing the sound belong to the host.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Something that can burst at a position and be cleared again
pub trait ExplosionEffect {
    fn trigger(&mut self, position: Vec3);
    fn clear(&mut self);
}

/// Particle emitter + sound cue state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub name: String,
    pub position: Vec3,
    /// Particle system is emitting
    pub emitting: bool,
    /// Sound waiting to be played by the host
    sound_cue: bool,
}

impl Explosion {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Consume the pending sound cue (true at most once per trigger)
    pub fn take_sound_cue(&mut self) -> bool {
        std::mem::take(&mut self.sound_cue)
    }
}

impl ExplosionEffect for Explosion {
    fn trigger(&mut self, position: Vec3) {
        self.position = position;
        self.emitting = true;
        self.sound_cue = true;
    }

    fn clear(&mut self) {
        self.emitting = false;
    }
}
