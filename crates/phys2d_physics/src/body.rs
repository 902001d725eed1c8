//! Rigid body types for 2D physics simulation

use std::fmt;

use bitflags::bitflags;
use slotmap::new_key_type;

use crate::error::PhysicsError;
use crate::gizmo::{Color, Gizmo, CIRCLE_GIZMO_SEGMENTS, PLANE_GIZMO_HALF_LENGTH};
use crate::material::PhysicsMaterial;
use crate::shapes::{Aabb, Circle, Plane, Polygon, Shape, ShapeKind};
use phys2d_math::Vec2;

// Define generational key type for rigid bodies
new_key_type! {
    /// Key to a rigid body in the physics world
    ///
    /// Uses generational indexing so a key to a removed body never resolves to
    /// whatever body later reuses its slot.
    pub struct BodyKey;
}

bitflags! {
    /// How a body takes part in collision response
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct BodyFlags: u8 {
        /// Integrates normally but collisions never move or stop it
        const KINEMATIC = 1 << 0;
        /// Infinite mass: never integrates and never receives collision response
        const STATIC = 1 << 1;
    }
}

/// A 2D rigid body with position, velocity, mass properties and a collision shape
#[derive(Clone, Debug)]
pub struct RigidBody2D {
    /// Position of the centroid (world coordinates)
    pub position: Vec2,
    /// Linear velocity (units per second)
    pub velocity: Vec2,
    /// Orientation in radians
    pub rotation: f32,
    /// Angular velocity (radians per second)
    pub angular_velocity: f32,
    /// Elasticity, friction and drag
    pub material: PhysicsMaterial,
    /// Kinematic/static flags
    pub flags: BodyFlags,
    /// Colour used by gizmo drawing
    pub color: Color,
    shape: Shape,
    mass: f32,
    moment: f32,
}

impl RigidBody2D {
    fn with_shape(shape: Shape, position: Vec2, mass: f32) -> Self {
        let moment = shape.moment(mass);
        Self {
            position,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            angular_velocity: 0.0,
            material: PhysicsMaterial::default(),
            flags: BodyFlags::empty(),
            color: Color::WHITE,
            shape,
            mass,
            moment,
        }
    }

    /// Create a static plane from a normal and distance from origin
    pub fn new_plane(normal: Vec2, distance: f32) -> Result<Self, PhysicsError> {
        Ok(Self::from_plane(Plane::new(normal, distance)?))
    }

    /// Create a static plane inclined `inclination` radians from horizontal
    pub fn new_inclined_plane(inclination: f32, distance: f32) -> Self {
        Self::from_plane(Plane::from_inclination(inclination, distance))
    }

    fn from_plane(plane: Plane) -> Self {
        let mut body = Self::with_shape(Shape::Plane(plane), plane.origin_point(), 0.0);
        body.flags = BodyFlags::STATIC;
        body
    }

    /// Create a dynamic circle
    pub fn new_circle(position: Vec2, radius: f32, mass: f32) -> Self {
        Self::with_shape(Shape::Circle(Circle::new(radius)), position, mass)
    }

    /// Create a dynamic axis-aligned box from full width and height
    pub fn new_box(position: Vec2, width: f32, height: f32, mass: f32) -> Self {
        Self::with_shape(Shape::Box(Aabb::new(width, height)), position, mass)
    }

    /// Create a dynamic polygon from vertices relative to `position`
    pub fn new_polygon(
        position: Vec2,
        vertices: Vec<Vec2>,
        mass: f32,
    ) -> Result<Self, PhysicsError> {
        Ok(Self::with_shape(Shape::Polygon(Polygon::new(vertices)?), position, mass))
    }

    /// Create a dynamic polygon from world points, positioned at their centroid
    pub fn new_polygon_from_points(points: &[Vec2], mass: f32) -> Result<Self, PhysicsError> {
        let (centroid, polygon) = Polygon::from_world_points(points)?;
        Ok(Self::with_shape(Shape::Polygon(polygon), centroid, mass))
    }

    /// Set the velocity of this body
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the velocity from a launch angle (radians from +X) and speed
    pub fn with_launch(mut self, inclination: f32, speed: f32) -> Self {
        self.velocity = Vec2::from_angle(inclination) * speed;
        self
    }

    /// Set the initial orientation
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_angular_velocity(mut self, angular_velocity: f32) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    /// Replace the whole material
    pub fn with_material(mut self, material: PhysicsMaterial) -> Self {
        self.material = material;
        self
    }

    pub fn with_elasticity(mut self, elasticity: f32) -> Self {
        self.material.elasticity = elasticity;
        self
    }

    pub fn with_friction(mut self, static_friction: f32, kinetic_friction: f32) -> Self {
        self.material = self.material.with_friction(static_friction, kinetic_friction);
        self
    }

    pub fn with_drag(mut self, linear_drag: f32, angular_drag: f32) -> Self {
        self.material = self.material.with_drag(linear_drag, angular_drag);
        self
    }

    /// Override the moment of inertia (polygons have none by default)
    pub fn with_moment(mut self, moment: f32) -> Self {
        self.moment = moment;
        self
    }

    /// Set whether this body is kinematic
    pub fn with_kinematic(mut self, kinematic: bool) -> Self {
        self.flags.set(BodyFlags::KINEMATIC, kinematic);
        self
    }

    /// Set whether this body is static
    ///
    /// Static bodies also lose any velocity they had.
    pub fn with_static(mut self, is_static: bool) -> Self {
        self.flags.set(BodyFlags::STATIC, is_static);
        if is_static {
            self.velocity = Vec2::ZERO;
            self.angular_velocity = 0.0;
        }
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Change the mass, e.g. a rocket burning fuel
    ///
    /// Circles and boxes recompute their moment; an overridden polygon moment
    /// scales with the mass.
    pub fn set_mass(&mut self, mass: f32) {
        self.moment = match &self.shape {
            Shape::Polygon(_) if self.mass > 0.0 => self.moment * mass / self.mass,
            Shape::Polygon(_) => 0.0,
            shape => shape.moment(mass),
        };
        self.mass = mass;
    }

    pub fn moment(&self) -> f32 {
        self.moment
    }

    pub fn is_static(&self) -> bool {
        self.flags.contains(BodyFlags::STATIC)
    }

    pub fn is_kinematic(&self) -> bool {
        self.flags.contains(BodyFlags::KINEMATIC)
    }

    /// Neither static nor kinematic
    pub fn is_dynamic(&self) -> bool {
        self.flags.is_empty()
    }

    /// 1/mass, or zero for static, kinematic and massless bodies
    pub fn inverse_mass(&self) -> f32 {
        if !self.is_dynamic() || self.mass <= 0.0 {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    /// Linear momentum magnitude, mass·|velocity|
    pub fn momentum(&self) -> f32 {
        self.mass * self.velocity.length()
    }

    /// Apply an instantaneous force (impulse) at `lever_arm` from the centroid
    ///
    /// Velocity changes by force/mass. When the body has a moment of inertia,
    /// angular velocity changes by cross(lever_arm, force)/moment.
    pub fn apply_force(&mut self, force: Vec2, lever_arm: Vec2) {
        let inverse_mass = self.inverse_mass();
        if inverse_mass == 0.0 {
            return;
        }
        self.velocity += force * inverse_mass;
        if self.moment > 0.0 {
            self.angular_velocity += lever_arm.cross(force) / self.moment;
        }
    }

    /// Newton's third law: `other` receives `force` at `point`, this body receives `-force`
    pub fn apply_force_to_body(&mut self, other: &mut RigidBody2D, force: Vec2, point: Vec2) {
        other.apply_force(force, point - other.position);
        self.apply_force(-force, point - self.position);
    }

    /// Describe this body as a drawable primitive for the current frame
    pub fn make_gizmo(&self) -> Gizmo {
        match &self.shape {
            Shape::Plane(plane) => {
                let center = plane.origin_point();
                let along = plane.tangent() * PLANE_GIZMO_HALF_LENGTH;
                Gizmo::Line {
                    start: center + along,
                    end: center - along,
                    color: self.color,
                }
            }
            Shape::Circle(circle) => Gizmo::Circle {
                center: self.position,
                radius: circle.radius,
                segments: CIRCLE_GIZMO_SEGMENTS,
                tick: Some(self.position + Vec2::from_angle(self.rotation) * circle.radius),
                color: self.color,
            },
            Shape::Box(aabb) => Gizmo::Polygon {
                points: aabb.corners(self.position).to_vec(),
                color: self.color,
            },
            Shape::Polygon(polygon) => Gizmo::Polygon {
                points: polygon.world_vertices(self.position, self.rotation).collect(),
                color: self.color,
            },
        }
    }

    /// Report this body's state to the log
    pub fn debug(&self) {
        log::debug!("{}", self);
    }
}

impl fmt::Display for RigidBody2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.shape {
            Shape::Plane(plane) => {
                return write!(
                    f,
                    "Plane normal ({:.3}, {:.3}) distance {:.3}",
                    plane.normal.x, plane.normal.y, plane.distance
                );
            }
            Shape::Circle(circle) => write!(f, "Circle r={:.3}", circle.radius)?,
            Shape::Box(aabb) => write!(f, "Box {:.3}x{:.3}", aabb.width(), aabb.height())?,
            Shape::Polygon(polygon) => write!(f, "Polygon {} verts", polygon.vertex_count())?,
        }
        write!(
            f,
            " pos ({:.3}, {:.3}) vel ({:.3}, {:.3}) rot {:.3} ang {:.3} mass {:.3}",
            self.position.x,
            self.position.y,
            self.velocity.x,
            self.velocity.y,
            self.rotation,
            self.angular_velocity,
            self.mass
        )?;
        if self.is_static() {
            write!(f, " [static]")?;
        }
        if self.is_kinematic() {
            write!(f, " [kinematic]")?;
        }
        Ok(())
    }
}
