//! Physics error types
//!
//! The step loop never fails; these cover invalid construction and configuration.

use std::fmt;

/// Error type for body construction and world configuration
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Polygon with fewer than three vertices or zero enclosed area
    DegeneratePolygon {
        /// Number of vertices supplied
        vertices: usize,
    },
    /// Plane normal with zero length
    ZeroNormal,
    /// Fixed timestep that is not a positive finite number
    InvalidTimestep(f32),
    /// Step clamp of zero iterations
    InvalidMaxSteps,
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::DegeneratePolygon { vertices } => {
                write!(f, "Degenerate polygon: {} vertices with no enclosed area", vertices)
            }
            PhysicsError::ZeroNormal => write!(f, "Plane normal must not be zero"),
            PhysicsError::InvalidTimestep(ts) => {
                write!(f, "Fixed timestep must be positive and finite, got {}", ts)
            }
            PhysicsError::InvalidMaxSteps => {
                write!(f, "Max steps per update must be at least 1")
            }
        }
    }
}

impl std::error::Error for PhysicsError {}
