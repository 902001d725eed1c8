//! Fixed-step integration of body state under gravity and drag

use crate::body::RigidBody2D;
use crate::shapes::Shape;
use phys2d_math::Vec2;

/// Linear speed below which velocity snaps to zero
pub const LINEAR_REST_THRESHOLD: f32 = 1e-4;

/// Angular speed below which angular velocity snaps to zero
pub const ANGULAR_REST_THRESHOLD: f32 = 1e-5;

/// Advance one body by a single fixed step `h` under uniform gravity `g`
///
/// Semi-implicit Euler: velocity first, then position from the new velocity.
/// Drag removes `drag * h` of the current velocity. Planes and static bodies
/// are left untouched; kinematic bodies integrate like any other.
pub fn integrate(body: &mut RigidBody2D, gravity: Vec2, h: f32) {
    if body.is_static() || matches!(body.shape(), Shape::Plane(_)) {
        return;
    }

    body.velocity += gravity * h;
    body.position += body.velocity * h;
    body.rotation += body.angular_velocity * h;

    let linear_drag = body.material.linear_drag;
    let angular_drag = body.material.angular_drag;
    body.velocity -= body.velocity * linear_drag * h;
    body.angular_velocity -= body.angular_velocity * angular_drag * h;

    if body.velocity.length() < LINEAR_REST_THRESHOLD {
        body.velocity = Vec2::ZERO;
    }
    if body.angular_velocity.abs() < ANGULAR_REST_THRESHOLD {
        body.angular_velocity = 0.0;
    }
}
