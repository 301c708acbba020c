//! Asteroid Field headless runner
//!
//! Usage: `asteroid-field [config.json] [frames]`
//!
//! Runs the scene at a fixed timestep with a simple autopilot dodging the
//! nearest asteroid, logs field events and prints the final field snapshot.

use glam::Vec3;

use asteroid_field::SceneConfig;
use asteroid_field::consts::SIM_DT;
use asteroid_field::sim::{FieldEvent, PlayerCraft, Scene, SteerInput, TickInput};

/// Default run length (one minute at 60 Hz)
const DEFAULT_FRAMES: u64 = 60 * 60;

/// Only asteroids closer than this get dodged
const DODGE_RANGE: f32 = 800.0;

/// Steer away from the closest visible asteroid ahead of the ship
fn autopilot(scene: &Scene) -> SteerInput {
    let Some(ship) = scene.ship() else {
        return SteerInput::default();
    };
    let forward = ship.forward();
    let right = ship.orientation * Vec3::X;
    let up = ship.orientation * Vec3::Y;

    let threat = scene
        .field
        .slots()
        .iter()
        .filter(|s| s.visible)
        .map(|s| s.position - ship.position)
        .filter(|offset| {
            let ahead = offset.dot(forward);
            ahead > 0.0 && ahead < DODGE_RANGE
        })
        .min_by(|a, b| {
            a.length_squared()
                .partial_cmp(&b.length_squared())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    match threat {
        Some(offset) => SteerInput {
            yaw_left: offset.dot(right) >= 0.0,
            yaw_right: offset.dot(right) < 0.0,
            pitch_down: offset.dot(up) >= 0.0,
            pitch_up: offset.dot(up) < 0.0,
        },
        None => SteerInput::default(),
    }
}

fn main() {
    env_logger::init();
    log::info!("Asteroid Field (headless) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match SceneConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => SceneConfig::default(),
    };
    let frames = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(frames)) => frames,
        Some(Err(e)) => {
            log::error!("Invalid frame count: {}", e);
            std::process::exit(2);
        }
        None => DEFAULT_FRAMES,
    };

    let mut scene = match Scene::new(&config) {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("Invalid scene config: {}", e);
            std::process::exit(1);
        }
    };

    for _ in 0..frames {
        let input = TickInput {
            steer: autopilot(&scene),
            reset: false,
        };
        scene.tick(&input, SIM_DT);

        for event in scene.events() {
            match event {
                FieldEvent::Spawned { slot } => {
                    log::debug!("t={} spawned {}", scene.time_ticks, slot)
                }
                FieldEvent::Collision { slot } => {
                    log::info!("t={} ship hit asteroid {}", scene.time_ticks, slot)
                }
                FieldEvent::Reset => log::info!("t={} field reset", scene.time_ticks),
            }
        }
        if scene.take_explosion_sound() {
            log::info!("t={} *boom*", scene.time_ticks);
        }
    }

    log::info!(
        "Ran {} frames: {} spawns, {} crashes",
        frames,
        scene.field.spawn_count(),
        scene.field.game_over_count()
    );

    match serde_json::to_string_pretty(&scene.field.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}
