//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied dt only
//! - Seeded RNG only
//! - Stable iteration order (by slot index)
//! - No rendering, audio or platform dependencies

pub mod camera;
pub mod collision;
pub mod explosion;
pub mod field;
pub mod scene;
pub mod ship;
pub mod spawn;
pub mod state;

pub use camera::FollowCamera;
pub use collision::{BoundingSphere, spheres_intersect};
pub use explosion::{Explosion, ExplosionEffect};
pub use field::AsteroidField;
pub use scene::{Scene, TickInput};
pub use ship::{PlayerCraft, Ship, SteerInput};
pub use spawn::{SpawnAnimator, SpawnTween};
pub use state::{AsteroidModel, AsteroidSlot, FieldEvent, FieldMode, FieldSnapshot};
