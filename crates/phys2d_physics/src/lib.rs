//! 2D rigid body physics for phys2d
//!
//! This crate provides:
//! - Collision shapes (planes, circles, axis-aligned boxes, convex polygons)
//! - Semi-implicit Euler integration with gravity and drag
//! - Narrow-phase collision detection over every pair of shape kinds
//! - Impulse-based contact resolution with restitution and Coulomb friction
//! - A fixed-timestep world that owns the bodies and steps them
//! - Gizmo primitives for an external debug renderer

pub mod body;
pub mod collision;
pub mod error;
pub mod gizmo;
pub mod integrator;
pub mod material;
pub mod resolver;
pub mod shapes;
pub mod world;

// Re-export commonly used types
pub use body::{BodyFlags, BodyKey, RigidBody2D};
pub use collision::{detect, Contact, Pose};
pub use error::PhysicsError;
pub use gizmo::{projectile_path, Color, Gizmo, GizmoSink};
pub use material::PhysicsMaterial;
pub use resolver::{resolve, ContactResponse};
pub use shapes::{Aabb, Circle, Plane, Polygon, Shape, ShapeKind};
pub use world::{PhysicsConfig, PhysicsWorld};
