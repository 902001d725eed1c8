//! phys2d - 2D rigid body physics sandbox
//!
//! Headless harness: loads the configuration, builds the demo scene and runs
//! it for the configured duration, reporting through the log.

use phys2d::config::AppConfig;
use phys2d::scene::{Scene, SceneBuilder};
use phys2d::systems::{GizmoLogger, SimulationSystem};

fn main() {
    // Load configuration before logging so the configured level applies
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // Initialize logging; RUST_LOG still wins over the config file
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();

    if let Some(e) = load_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }
    log::info!("Starting phys2d");

    let physics = match config.physics.to_physics_config() {
        Ok(physics) => physics,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let scene = match SceneBuilder::with_config(physics).and_then(SceneBuilder::demo) {
        Ok(builder) => builder.build_scene(),
        Err(e) => {
            log::error!("Failed to build demo scene: {}", e);
            std::process::exit(1);
        }
    };
    let Scene {
        mut world,
        names,
        guides,
    } = scene;
    log::info!(
        "Built demo scene with {} bodies and {} guide markers",
        world.body_count(),
        guides.len()
    );

    let sim_config = &config.simulation;
    let frames = (sim_config.duration / sim_config.frame_dt).ceil() as u64;
    let mut simulation = SimulationSystem::new(sim_config);
    let mut gizmos = GizmoLogger::new();

    for _ in 0..frames {
        simulation.update(&mut world, sim_config.frame_dt);
        if config.debug.draw_gizmos {
            gizmos.draw_frame(&world, &guides);
        }
    }

    log::info!(
        "Simulated {:.2}s in {} fixed steps over {} frames",
        simulation.elapsed(),
        simulation.total_steps(),
        frames
    );
    world.debug_scene();

    let mut named: Vec<_> = names.iter().collect();
    named.sort_by(|a, b| a.0.cmp(b.0));
    for (name, &key) in named {
        if let Some(body) = world.get_body(key) {
            log::info!("{}: {}", name, body);
        }
    }
}
