//! Application systems
//!
//! Frame-level pieces of the headless harness, kept out of main.rs so they can be tested.

mod gizmo_log;
mod simulation;

pub use gizmo_log::{GizmoLogger, GizmoStats};
pub use simulation::{SimulationResult, SimulationSystem};
