//! Physics world and fixed-timestep stepping

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::body::{BodyKey, RigidBody2D};
use crate::collision::detect;
use crate::error::PhysicsError;
use crate::gizmo::{Gizmo, GizmoSink};
use crate::integrator::integrate;
use crate::resolver::{resolve, ContactResponse};
use phys2d_math::Vec2;

/// Default fixed timestep in seconds
pub const DEFAULT_FIXED_TIMESTEP: f32 = 0.01;

/// Default cap on fixed steps run by a single [`PhysicsWorld::step`] call
pub const DEFAULT_MAX_STEPS_PER_UPDATE: u32 = 250;

/// Configuration for the physics simulation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity acceleration applied to every dynamic body
    pub gravity: Vec2,
    /// Length of one simulation step in seconds
    pub fixed_timestep: f32,
    /// Most fixed steps one `step` call may run before dropping time
    pub max_steps_per_update: u32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::ZERO,
            fixed_timestep: DEFAULT_FIXED_TIMESTEP,
            max_steps_per_update: DEFAULT_MAX_STEPS_PER_UPDATE,
        }
    }
}

impl PhysicsConfig {
    /// Create a new physics config with the given gravity
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity,
            ..Self::default()
        }
    }

    pub fn with_fixed_timestep(mut self, fixed_timestep: f32) -> Self {
        self.fixed_timestep = fixed_timestep;
        self
    }

    pub fn with_max_steps_per_update(mut self, max_steps: u32) -> Self {
        self.max_steps_per_update = max_steps;
        self
    }

    /// Check the timestep is positive and finite and the step cap is non-zero
    pub fn validate(&self) -> Result<(), PhysicsError> {
        validate_timestep(self.fixed_timestep)?;
        if self.max_steps_per_update == 0 {
            return Err(PhysicsError::InvalidMaxSteps);
        }
        Ok(())
    }
}

fn validate_timestep(fixed_timestep: f32) -> Result<(), PhysicsError> {
    if fixed_timestep.is_finite() && fixed_timestep > 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::InvalidTimestep(fixed_timestep))
    }
}

/// The physics world containing all rigid bodies
///
/// Bodies are processed in insertion order, which decides the order pairs are
/// resolved in within a step.
pub struct PhysicsWorld {
    /// All rigid bodies in the world (using generational keys)
    bodies: SlotMap<BodyKey, RigidBody2D>,
    /// Insertion order of live keys
    order: Vec<BodyKey>,
    config: PhysicsConfig,
    /// Frame time not yet consumed by a fixed step
    accumulator: f32,
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self {
            bodies: SlotMap::with_key(),
            order: Vec::new(),
            config: PhysicsConfig::default(),
            accumulator: 0.0,
        }
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Result<Self, PhysicsError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn gravity(&self) -> Vec2 {
        self.config.gravity
    }

    /// Change gravity, effective from the next fixed step
    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.config.gravity = gravity;
    }

    pub fn fixed_timestep(&self) -> f32 {
        self.config.fixed_timestep
    }

    /// Change the fixed timestep; time already accumulated is kept
    pub fn set_fixed_timestep(&mut self, fixed_timestep: f32) -> Result<(), PhysicsError> {
        validate_timestep(fixed_timestep)?;
        self.config.fixed_timestep = fixed_timestep;
        Ok(())
    }

    /// Leftover time waiting for the next fixed step
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Add a body to the world and return its key
    pub fn add_body(&mut self, body: RigidBody2D) -> BodyKey {
        let key = self.bodies.insert(body);
        self.order.push(key);
        key
    }

    /// Remove a body from the world and return it
    ///
    /// Returns `None` if the key does not refer to a body in this world.
    pub fn remove_body(&mut self, key: BodyKey) -> Option<RigidBody2D> {
        let index = self.order.iter().position(|&k| k == key)?;
        self.order.remove(index);
        self.bodies.remove(key)
    }

    /// Get an immutable reference to a body by key
    pub fn get_body(&self, key: BodyKey) -> Option<&RigidBody2D> {
        self.bodies.get(key)
    }

    /// Get a mutable reference to a body by key
    pub fn get_body_mut(&mut self, key: BodyKey) -> Option<&mut RigidBody2D> {
        self.bodies.get_mut(key)
    }

    /// Get the number of bodies in the world
    pub fn body_count(&self) -> usize {
        self.order.len()
    }

    /// Iterate over all body keys in insertion order
    pub fn body_keys(&self) -> impl Iterator<Item = BodyKey> + '_ {
        self.order.iter().copied()
    }

    /// Iterate over all bodies in insertion order
    pub fn bodies(&self) -> impl Iterator<Item = (BodyKey, &RigidBody2D)> + '_ {
        self.order
            .iter()
            .filter_map(move |&key| self.bodies.get(key).map(|body| (key, body)))
    }

    /// Advance the simulation by `dt` seconds of frame time
    ///
    /// Runs as many fixed steps as the accumulated time allows, up to
    /// `max_steps_per_update`. Past the cap the whole steps still owed are
    /// dropped and only the fractional remainder is kept. Returns the number
    /// of fixed steps run.
    pub fn step(&mut self, dt: f32) -> usize {
        if !dt.is_finite() || dt < 0.0 {
            warn!("Ignoring invalid frame time {}", dt);
            return 0;
        }

        self.accumulator += dt;
        let h = self.config.fixed_timestep;
        let max_steps = self.config.max_steps_per_update as usize;

        let mut steps = 0;
        while self.accumulator >= h {
            if steps == max_steps {
                let dropped = (self.accumulator / h) as usize;
                warn!(
                    "Physics fell behind: ran {} steps this update, dropping {} more",
                    max_steps, dropped
                );
                self.accumulator %= h;
                break;
            }

            self.fixed_step();
            self.accumulator -= h;
            steps += 1;
        }

        steps
    }

    /// Run exactly one fixed step: integrate every body, then resolve contacts
    pub fn fixed_step(&mut self) {
        let gravity = self.config.gravity;
        let h = self.config.fixed_timestep;
        for &key in &self.order {
            if let Some(body) = self.bodies.get_mut(key) {
                integrate(body, gravity, h);
            }
        }
        self.check_all_pairs();
    }

    /// Detect and resolve every unordered pair of bodies once
    ///
    /// Returns the number of contacts found.
    pub fn check_all_pairs(&mut self) -> usize {
        let gravity = self.config.gravity;
        let h = self.config.fixed_timestep;
        let mut contacts = 0;

        for i in 0..self.order.len() {
            for j in (i + 1)..self.order.len() {
                let pair = [self.order[i], self.order[j]];
                let Some([a, b]) = self.bodies.get_disjoint_mut(pair) else {
                    continue;
                };

                let Some(contact) = detect(a, b) else {
                    continue;
                };
                contacts += 1;

                let response = resolve(a, b, &contact, gravity, h);
                match response {
                    ContactResponse::Ignored => trace!(
                        "Contact {} #{} vs {} #{} ignored (kinematic or static pair)",
                        a.kind(),
                        i,
                        b.kind(),
                        j
                    ),
                    ContactResponse::Resolved { impulse } => trace!(
                        "Contact {} #{} vs {} #{}: depth {:.4}, normal ({:.3}, {:.3}), \
                         impulse {:.4}",
                        a.kind(),
                        i,
                        b.kind(),
                        j,
                        contact.penetration,
                        contact.normal.x,
                        contact.normal.y,
                        impulse
                    ),
                }
            }
        }

        contacts
    }

    /// One gizmo per body, in insertion order
    pub fn gizmos(&self) -> impl Iterator<Item = Gizmo> + '_ {
        self.bodies().map(|(_, body)| body.make_gizmo())
    }

    /// Send every body's gizmo to a renderer
    pub fn draw_gizmos<S: GizmoSink + ?Sized>(&self, sink: &mut S) {
        for gizmo in self.gizmos() {
            gizmo.draw(sink);
        }
    }

    /// Log the whole scene at debug level
    pub fn debug_scene(&self) {
        debug!(
            "Scene: {} bodies, gravity ({:.3}, {:.3}), timestep {}",
            self.body_count(),
            self.config.gravity.x,
            self.config.gravity.y,
            self.config.fixed_timestep
        );
        for (index, (_, body)) in self.bodies().enumerate() {
            debug!("  #{} {}", index, body);
        }
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
