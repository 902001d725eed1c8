//! Simulation system
//!
//! Feeds frame time into the physics world:
//! - Frame delta capping
//! - Fixed-step physics stepping
//! - Periodic scene dumps

use log::debug;
use phys2d_physics::PhysicsWorld;

use crate::config::SimulationConfig;

/// Result of a simulation update
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationResult {
    /// Frame delta actually fed to the world, after capping
    pub dt: f32,
    /// Fixed physics steps run this frame
    pub steps: usize,
}

/// Manages the per-frame simulation update
pub struct SimulationSystem {
    max_frame_dt: f32,
    debug_interval: f32,
    /// Simulated time since the system started
    elapsed: f32,
    /// Simulated time at the last scene dump
    last_dump: f32,
    total_steps: u64,
}

impl SimulationSystem {
    /// Create a new simulation system
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            max_frame_dt: config.max_frame_dt,
            debug_interval: config.debug_interval,
            elapsed: 0.0,
            last_dump: 0.0,
            total_steps: 0,
        }
    }

    /// Run one simulation frame
    ///
    /// `raw_dt` is capped to avoid a spiral of death after a long stall; the
    /// world's accumulator further subdivides it into fixed steps.
    pub fn update(&mut self, world: &mut PhysicsWorld, raw_dt: f32) -> SimulationResult {
        let dt = raw_dt.min(self.max_frame_dt);
        let steps = world.step(dt);

        self.elapsed += dt;
        self.total_steps += steps as u64;

        if self.debug_interval > 0.0 && self.elapsed - self.last_dump >= self.debug_interval {
            self.last_dump = self.elapsed;
            debug!("t = {:.2}s after {} steps", self.elapsed, self.total_steps);
            world.debug_scene();
        }

        SimulationResult { dt, steps }
    }

    /// Simulated time fed to the world so far
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Fixed steps run so far
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new(&SimulationConfig::default())
    }
}
