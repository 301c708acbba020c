//! Scene composition
//!
//! Builds the ship, explosion and camera, wires the field to them by name
//! once, and drives everything from a single per-frame tick.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::camera::FollowCamera;
use super::explosion::Explosion;
use super::field::AsteroidField;
use super::ship::{PlayerCraft, Ship, SteerInput};
use super::state::FieldEvent;
use crate::config::SceneConfig;
use crate::error::ConfigError;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub steer: SteerInput,
    /// Force an immediate field reset
    pub reset: bool,
}

/// Look up `wanted` among the scene's named entities
fn resolve(role: &str, wanted: Option<&str>, available: &str) -> bool {
    match wanted {
        Some(name) if name == available => true,
        Some(name) => {
            log::warn!("{} '{}' not found in scene; {} disabled", role, name, role);
            false
        }
        None => false,
    }
}

/// The whole game world
#[derive(Debug)]
pub struct Scene {
    pub field: AsteroidField<Ship, Explosion>,
    /// `None` when the camera target was not found
    pub camera: Option<FollowCamera>,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl Scene {
    pub fn new(config: &SceneConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let ship = Ship::new(&config.ship);
        let explosion = Explosion::new(config.explosion_name.clone());

        // Handles are resolved exactly once; a miss never heals later
        let player = resolve("Player", config.player.as_deref(), &ship.name).then_some(ship);
        let explosion = resolve("Explosion", config.explosion.as_deref(), &explosion.name)
            .then_some(explosion);
        let camera = match &player {
            Some(ship) if resolve("Camera target", config.camera.target.as_deref(), &ship.name) => {
                let mut camera = FollowCamera::new(&config.camera);
                camera.snap_to(ship.position, ship.orientation);
                Some(camera)
            }
            _ => None,
        };

        let rng = Pcg32::seed_from_u64(config.seed);
        let field = AsteroidField::new(config.field.clone(), rng, player, explosion)?;

        log::info!(
            "Scene built with seed {} (player: {}, explosion: {}, camera: {})",
            config.seed,
            field.player().is_some(),
            field.explosion().is_some(),
            camera.is_some()
        );

        Ok(Self {
            field,
            camera,
            time_ticks: 0,
        })
    }

    /// Advance the whole scene by one frame
    pub fn tick(&mut self, input: &TickInput, dt: f32) {
        self.time_ticks += 1;

        if let Some(ship) = self.field.player_mut() {
            ship.steer(&input.steer, dt);
            ship.integrate(dt);
        }

        self.field.tick(dt);

        // After the field tick so the Reset event survives into this frame
        if input.reset {
            self.field.reset();
        }

        if let (Some(camera), Some(ship)) = (self.camera.as_mut(), self.field.player()) {
            camera.update(ship.position(), ship.orientation, dt);
        }
    }

    pub fn ship(&self) -> Option<&Ship> {
        self.field.player()
    }

    pub fn events(&self) -> &[FieldEvent] {
        self.field.events()
    }

    /// Drain the explosion sound cue, if one fired
    pub fn take_explosion_sound(&mut self) -> bool {
        self.field
            .explosion_mut()
            .map(Explosion::take_sound_cue)
            .unwrap_or(false)
    }
}
