//! 2D Mathematics Library
//!
//! This crate provides the vector type shared by the phys2d physics core and
//! its harness.
//!
//! ## Core Types
//!
//! - [`Vec2`] - 2D vector with x, y components

mod vec2;

pub use vec2::Vec2;
