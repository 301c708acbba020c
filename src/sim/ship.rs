//! The player's ship
//!
//! Flies forward continuously, accelerating over time. Steering is
//! keyboard-style: pitch up/down and yaw left/right at a fixed turn rate.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::collision::BoundingSphere;
use crate::config::ShipConfig;
use crate::{forward_of, yaw_pitch_roll};

/// What the asteroid field needs from the player
pub trait PlayerCraft {
    fn position(&self) -> Vec3;
    /// Unit vector the craft is flying along
    fn forward(&self) -> Vec3;
    fn bounding_sphere(&self) -> BoundingSphere;
    /// Stop forward motion and drop out of play
    fn on_game_over(&mut self);
    /// Restore the initial pose and resume flying
    fn on_reset(&mut self);
}

/// Steering commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SteerInput {
    pub pitch_up: bool,
    pub pitch_down: bool,
    pub yaw_left: bool,
    pub yaw_right: bool,
}

/// The player ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub name: String,
    pub position: Vec3,
    pub orientation: Quat,
    /// Current forward speed
    pub speed: f32,
    pub acceleration: f32,
    /// Turn rate (radians/s)
    pub maneuverability: f32,
    pub collider_radius: f32,
    /// Rendered and flying
    pub visible: bool,
    /// Engine loop volume (0 while wrecked)
    pub engine_volume: f32,
    initial_position: Vec3,
    initial_orientation: Quat,
    initial_speed: f32,
}

impl Ship {
    pub fn new(config: &ShipConfig) -> Self {
        let orientation = config.orientation.normalize();
        Self {
            name: config.name.clone(),
            position: config.position,
            orientation,
            speed: config.speed,
            acceleration: config.acceleration,
            maneuverability: config.maneuverability,
            collider_radius: config.collider_radius,
            visible: true,
            engine_volume: 1.0,
            initial_position: config.position,
            initial_orientation: orientation,
            initial_speed: config.speed,
        }
    }

    /// Apply steering input (no-op while wrecked)
    pub fn steer(&mut self, input: &SteerInput, dt: f32) {
        if !self.visible {
            return;
        }

        let turn = self.maneuverability * dt;
        let mut yaw = 0.0;
        let mut pitch = 0.0;
        if input.pitch_down {
            pitch -= turn;
        }
        if input.pitch_up {
            pitch += turn;
        }
        if input.yaw_left {
            yaw += turn;
        }
        if input.yaw_right {
            yaw -= turn;
        }

        if yaw != 0.0 || pitch != 0.0 {
            // Local rotation: post-multiply
            self.orientation = (self.orientation * yaw_pitch_roll(yaw, pitch, 0.0)).normalize();
        }
    }

    /// Move along forward and accelerate
    pub fn integrate(&mut self, dt: f32) {
        if !self.visible {
            return;
        }
        self.position += forward_of(self.orientation) * self.speed * dt;
        self.speed += self.acceleration * dt;
    }
}

impl PlayerCraft for Ship {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn forward(&self) -> Vec3 {
        forward_of(self.orientation)
    }

    fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::new(self.position, self.collider_radius)
    }

    fn on_game_over(&mut self) {
        self.visible = false;
        self.speed = 0.0;
        self.engine_volume = 0.0;
    }

    fn on_reset(&mut self) {
        self.visible = true;
        self.position = self.initial_position;
        self.orientation = self.initial_orientation;
        self.speed = self.initial_speed;
        self.engine_volume = 1.0;
    }
}
