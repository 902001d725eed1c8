//! phys2d - 2D rigid body physics sandbox
//!
//! Library side of the `phys2d` binary: configuration loading, scene
//! construction and the frame systems that drive a [`phys2d_physics::PhysicsWorld`].

pub mod config;
pub mod scene;
pub mod systems;
