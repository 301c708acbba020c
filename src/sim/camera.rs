//! Chase camera that tracks the player's pose

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::CameraConfig;
use crate::consts::CAMERA_FOLLOW_RATE;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowCamera {
    pub position: Vec3,
    pub orientation: Quat,
    pub smooth: bool,
    pub follow_rotation: bool,
}

impl FollowCamera {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            smooth: config.smooth,
            follow_rotation: config.follow_rotation,
        }
    }

    /// Move toward the target pose
    pub fn update(&mut self, target_position: Vec3, target_orientation: Quat, dt: f32) {
        if self.smooth {
            let t = (CAMERA_FOLLOW_RATE * dt).min(1.0);
            self.position = self.position.lerp(target_position, t);
            if self.follow_rotation {
                self.orientation = self.orientation.slerp(target_orientation, t);
            }
        } else {
            self.position = target_position;
            if self.follow_rotation {
                self.orientation = target_orientation;
            }
        }
    }

    /// Jump straight to the target (used when the scene is built)
    pub fn snap_to(&mut self, target_position: Vec3, target_orientation: Quat) {
        self.position = target_position;
        if self.follow_rotation {
            self.orientation = target_orientation;
        }
    }
}
