//! Physical material properties for collision response and drag

use serde::{Deserialize, Serialize};

/// Physical material properties of a body
///
/// Materials define how a body responds to contacts (elasticity and friction)
/// and how quickly it loses speed on its own (drag). Coefficients are not
/// clamped; values outside the conventional ranges are the caller's choice.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsMaterial {
    /// Coefficient of restitution (0.0 = no bounce, 1.0 = perfectly elastic)
    pub elasticity: f32,
    /// Friction coefficient used when the body starts the step at rest
    pub static_friction: f32,
    /// Friction coefficient used when the body is already sliding
    pub kinetic_friction: f32,
    /// Fraction of linear velocity removed per second
    pub linear_drag: f32,
    /// Fraction of angular velocity removed per second
    pub angular_drag: f32,
}

impl Default for PhysicsMaterial {
    fn default() -> Self {
        Self {
            elasticity: 1.0,
            static_friction: 0.0,
            kinetic_friction: 0.0,
            linear_drag: 0.0,
            angular_drag: 0.0,
        }
    }
}

impl PhysicsMaterial {
    /// Bouncy, grippy
    pub const RUBBER: Self = Self {
        elasticity: 0.8,
        static_friction: 0.9,
        kinetic_friction: 0.7,
        linear_drag: 0.0,
        angular_drag: 0.0,
    };

    /// Slippery, barely bounces
    pub const ICE: Self = Self {
        elasticity: 0.1,
        static_friction: 0.1,
        kinetic_friction: 0.03,
        linear_drag: 0.0,
        angular_drag: 0.0,
    };

    /// Moderate friction, low bounce
    pub const WOOD: Self = Self {
        elasticity: 0.3,
        static_friction: 0.5,
        kinetic_friction: 0.3,
        linear_drag: 0.0,
        angular_drag: 0.0,
    };

    /// Low friction, moderate bounce
    pub const STEEL: Self = Self {
        elasticity: 0.5,
        static_friction: 0.6,
        kinetic_friction: 0.4,
        linear_drag: 0.0,
        angular_drag: 0.0,
    };

    /// Create a material with the given elasticity and the default (zero) friction and drag
    pub fn new(elasticity: f32) -> Self {
        Self {
            elasticity,
            ..Self::default()
        }
    }

    /// Set both friction coefficients
    pub fn with_friction(mut self, static_friction: f32, kinetic_friction: f32) -> Self {
        self.static_friction = static_friction;
        self.kinetic_friction = kinetic_friction;
        self
    }

    /// Set linear and angular drag
    pub fn with_drag(mut self, linear_drag: f32, angular_drag: f32) -> Self {
        self.linear_drag = linear_drag;
        self.angular_drag = angular_drag;
        self
    }

    /// Average static friction of a contact pair
    pub fn combined_static_friction(&self, other: &Self) -> f32 {
        (self.static_friction + other.static_friction) * 0.5
    }

    /// Average kinetic friction of a contact pair
    pub fn combined_kinetic_friction(&self, other: &Self) -> f32 {
        (self.kinetic_friction + other.kinetic_friction) * 0.5
    }

    /// Average elasticity of a contact pair
    pub fn combined_elasticity(&self, other: &Self) -> f32 {
        (self.elasticity + other.elasticity) * 0.5
    }
}
