//! Particle Life
//!
//! Headless driver: loads settings, spawns the world and steps it at a fixed
//! frame rate, logging progress once per simulated second.
//!
//! Usage: `particle-life [settings.json] [frames]`
//! Set `PARTICLE_LIFE_SEED` for a reproducible run.

use particle_physics::ParticleInstance;
use particle_simulation::{ParticleSimulation, Settings};
use std::time::{Duration, Instant};

const WORLD_WIDTH: f32 = 800.0;
const WORLD_HEIGHT: f32 = 600.0;
const FRAME_DT: f32 = 1.0 / 60.0;
const DEFAULT_FRAMES: usize = 600;
const DEFAULT_SETTINGS_PATH: &str = "particle-life.json";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let settings_path = args.next().unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());
    let frames = match args.next() {
        Some(n) => n.parse()?,
        None => DEFAULT_FRAMES,
    };
    let seed = match std::env::var("PARTICLE_LIFE_SEED") {
        Ok(s) => Some(s.parse()?),
        Err(_) => None,
    };

    let settings = Settings::load_or_default(&settings_path);
    log::info!(
        "Starting particle life: {} particles, {} types, {} mode",
        settings.particle_count,
        settings.type_count,
        if settings.use_brute_force { "brute-force" } else { "spatial-hash" }
    );

    let mut sim = ParticleSimulation::from_settings(&settings, WORLD_WIDTH, WORLD_HEIGHT, seed)?;
    let frames_per_report = (1.0 / FRAME_DT).round() as usize;
    let mut step_time = Duration::ZERO;

    for frame in 1..=frames {
        // Exercise runtime switching half way through
        if frame == frames / 2 {
            let brute_force = !sim.params().use_brute_force;
            log::info!("Switching to {} mode", if brute_force { "brute-force" } else { "spatial-hash" });
            sim.set_brute_force(brute_force);
        }

        let start = Instant::now();
        sim.update(FRAME_DT);
        step_time += start.elapsed();

        if frame % frames_per_report == 0 {
            log::info!(
                "t={:.1}s  step={:.2}ms  energy={:.2}  types={:?}",
                frame as f32 * FRAME_DT,
                step_time.as_secs_f64() * 1000.0 / frames_per_report as f64,
                sim.kinetic_energy(),
                sim.type_histogram()
            );
            step_time = Duration::ZERO;
        }
    }

    let view = sim.render_view();
    let instances: Vec<ParticleInstance> = view.instances();
    log::info!(
        "Finished {} frames, {} instances ({} bytes) ready for upload",
        frames,
        instances.len(),
        std::mem::size_of_val(instances.as_slice())
    );
    Ok(())
}
