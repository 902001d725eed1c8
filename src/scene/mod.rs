//! Scene construction utilities
//!
//! This module provides a fluent API for populating a physics world.

mod scene_builder;

pub use scene_builder::{Scene, SceneBuilder};
