//! SceneBuilder - Declarative scene construction
//!
//! Provides a fluent API for filling a physics world with bodies.

use std::collections::HashMap;

use phys2d_math::Vec2;
use phys2d_physics::gizmo::{PROJECTILE_PATH_DURATION, PROJECTILE_PATH_STEP};
use phys2d_physics::{
    projectile_path, BodyKey, Color, Gizmo, PhysicsConfig, PhysicsError, PhysicsMaterial,
    PhysicsWorld, RigidBody2D,
};

/// A built scene: the world, its named bodies and any guide gizmos
pub struct Scene {
    pub world: PhysicsWorld,
    /// Bodies by the name they were added under
    pub names: HashMap<String, BodyKey>,
    /// Overlays drawn alongside the bodies, such as projectile paths
    pub guides: Vec<Gizmo>,
}

impl Scene {
    /// Look up a body added under `name`
    pub fn key(&self, name: &str) -> Option<BodyKey> {
        self.names.get(name).copied()
    }
}

/// Builder for constructing physics scenes
///
/// # Example
/// ```ignore
/// let world = SceneBuilder::with_config(PhysicsConfig::new(Vec2::new(0.0, -9.81)))?
///     .add_floor(0.0, PhysicsMaterial::WOOD)
///     .add_circle("ball", Vec2::new(0.0, 10.0), 1.0, 1.0, PhysicsMaterial::RUBBER)
///     .build();
/// ```
pub struct SceneBuilder {
    world: PhysicsWorld,
    names: HashMap<String, BodyKey>,
    guides: Vec<Gizmo>,
}

impl SceneBuilder {
    /// Create a new scene builder with the default physics config
    pub fn new() -> Self {
        Self {
            world: PhysicsWorld::new(),
            names: HashMap::new(),
            guides: Vec::new(),
        }
    }

    /// Create a scene builder with a custom physics config
    pub fn with_config(config: PhysicsConfig) -> Result<Self, PhysicsError> {
        Ok(Self {
            world: PhysicsWorld::with_config(config)?,
            names: HashMap::new(),
            guides: Vec::new(),
        })
    }

    /// Add a horizontal floor plane at the given height
    pub fn add_floor(mut self, y: f32, material: PhysicsMaterial) -> Self {
        let floor = RigidBody2D::new_inclined_plane(0.0, y).with_material(material);
        self.insert("floor", floor);
        self
    }

    /// Add a slope inclined `inclination` radians, `distance` from the origin
    pub fn add_slope(
        mut self,
        name: &str,
        inclination: f32,
        distance: f32,
        material: PhysicsMaterial,
    ) -> Self {
        let slope = RigidBody2D::new_inclined_plane(inclination, distance).with_material(material);
        self.insert(name, slope);
        self
    }

    /// Add a vertical wall at `x`, facing the origin
    pub fn add_wall(mut self, x: f32, material: PhysicsMaterial) -> Self {
        let facing_left = x > 0.0;
        let inclination = if facing_left {
            std::f32::consts::FRAC_PI_2
        } else {
            -std::f32::consts::FRAC_PI_2
        };
        // The wall's normal is (-1, 0) or (1, 0); distance is measured along it
        let distance = if facing_left { -x } else { x };
        let wall = RigidBody2D::new_inclined_plane(inclination, distance).with_material(material);
        self.insert(if facing_left { "right_wall" } else { "left_wall" }, wall);
        self
    }

    /// Add a dynamic circle
    pub fn add_circle(
        mut self,
        name: &str,
        position: Vec2,
        radius: f32,
        mass: f32,
        material: PhysicsMaterial,
    ) -> Self {
        let circle = RigidBody2D::new_circle(position, radius, mass)
            .with_material(material)
            .with_color(Color::RED);
        self.insert(name, circle);
        self
    }

    /// Add a circle fired from `position` at `angle` radians with the given speed
    ///
    /// Also records the closed-form flight path under the world's current
    /// gravity as a guide.
    pub fn add_projectile(
        mut self,
        name: &str,
        position: Vec2,
        radius: f32,
        angle: f32,
        speed: f32,
    ) -> Self {
        let projectile = RigidBody2D::new_circle(position, radius, 1.0)
            .with_launch(angle, speed)
            .with_material(PhysicsMaterial::STEEL)
            .with_color(Color::YELLOW);
        self.insert(name, projectile);
        self.guides.extend(projectile_path(
            position,
            angle,
            speed,
            self.world.gravity(),
            PROJECTILE_PATH_DURATION,
            PROJECTILE_PATH_STEP,
        ));
        self
    }

    /// Add a dynamic axis-aligned box
    pub fn add_box(
        mut self,
        name: &str,
        position: Vec2,
        size: Vec2,
        mass: f32,
        material: PhysicsMaterial,
    ) -> Self {
        let crate_box = RigidBody2D::new_box(position, size.x, size.y, mass)
            .with_material(material)
            .with_color(Color::GREEN);
        self.insert(name, crate_box);
        self
    }

    /// Add `count` boxes stacked upward from `base`, named `{name}_0`, `{name}_1`, ...
    pub fn add_box_stack(
        mut self,
        name: &str,
        base: Vec2,
        size: f32,
        count: usize,
        material: PhysicsMaterial,
    ) -> Self {
        for i in 0..count {
            let position = base + Vec2::new(0.0, size * 0.5 + size * i as f32);
            let size = Vec2::new(size, size);
            self = self.add_box(&format!("{}_{}", name, i), position, size, 1.0, material);
        }
        self
    }

    /// Add a dynamic polygon from world-space points
    pub fn add_polygon(
        mut self,
        name: &str,
        points: &[Vec2],
        mass: f32,
        material: PhysicsMaterial,
    ) -> Result<Self, PhysicsError> {
        let polygon = RigidBody2D::new_polygon_from_points(points, mass)?
            .with_material(material)
            .with_color(Color::BLUE);
        self.insert(name, polygon);
        Ok(self)
    }

    /// Add an already configured body
    pub fn add_body(mut self, name: &str, body: RigidBody2D) -> Self {
        self.insert(name, body);
        self
    }

    /// Populate the demo sandbox: walls, floor, a ball, a box stack, two
    /// polygons, a projectile and a slope
    pub fn demo(self) -> Result<Self, PhysicsError> {
        let diamond = [
            Vec2::new(6.0, 14.0),
            Vec2::new(7.0, 15.0),
            Vec2::new(6.0, 16.0),
            Vec2::new(5.0, 15.0),
        ];
        let ledge = [
            Vec2::new(3.0, 6.0),
            Vec2::new(9.0, 6.0),
            Vec2::new(9.0, 7.0),
            Vec2::new(3.0, 7.0),
        ];

        let builder = self
            .add_floor(0.0, PhysicsMaterial::WOOD)
            .add_wall(-10.0, PhysicsMaterial::STEEL)
            .add_wall(10.0, PhysicsMaterial::STEEL)
            .add_circle("ball", Vec2::new(-6.0, 10.0), 1.0, 1.0, PhysicsMaterial::RUBBER)
            .add_box_stack("crate", Vec2::new(-2.0, 0.0), 1.0, 3, PhysicsMaterial::WOOD)
            .add_projectile("shot", Vec2::new(-9.0, 1.0), 0.3, 0.6, 12.0)
            .add_polygon("diamond", &diamond, 2.0, PhysicsMaterial::STEEL)?;

        let ledge = RigidBody2D::new_polygon_from_points(&ledge, 1.0)?
            .with_static(true)
            .with_material(PhysicsMaterial::WOOD);

        Ok(builder
            .add_body("ledge", ledge)
            .add_slope("ramp", 0.3, -1.2, PhysicsMaterial::ICE))
    }

    fn insert(&mut self, name: &str, body: RigidBody2D) {
        let key = self.world.add_body(body);
        self.names.insert(name.to_string(), key);
    }

    /// Look up a body added under `name`; a reused name refers to the latest body
    pub fn key(&self, name: &str) -> Option<BodyKey> {
        self.names.get(name).copied()
    }

    /// Guide gizmos recorded so far
    pub fn guides(&self) -> &[Gizmo] {
        &self.guides
    }

    /// Build the scene and return only the configured world
    ///
    /// Names and guides are dropped; use [`build_scene`](Self::build_scene)
    /// to keep them.
    pub fn build(self) -> PhysicsWorld {
        self.world
    }

    /// Build the scene, keeping the name lookup and guide gizmos
    pub fn build_scene(self) -> Scene {
        Scene {
            world: self.world,
            names: self.names,
            guides: self.guides,
        }
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}
