//! Contact resolution: positional correction, restitution impulse and friction
//!
//! Each contact is resolved once, on its own, in the order the stepper finds
//! it. There is no iterative solver, so deep multi-body stacks can stay
//! partially overlapped for a few steps.

use crate::body::RigidBody2D;
use crate::collision::Contact;
use crate::integrator::LINEAR_REST_THRESHOLD;
use crate::material::PhysicsMaterial;
use phys2d_math::Vec2;

/// Smallest cosine between the reverse velocity and the escape direction for
/// which a body is backed out along its own path
///
/// Shallower angles would need an unbounded push-back distance, so they fall
/// back to pushing straight along the contact normal.
pub const MIN_PUSHBACK_COSINE: f32 = 0.25;

/// Below this combined momentum both bodies share the correction evenly
const MOMENTUM_EPSILON: f32 = 1e-6;

/// What the resolver did with a contact
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContactResponse {
    /// A kinematic body or two static bodies: detected, but nothing moves
    Ignored,
    /// Bodies were separated; `impulse` is zero when they were already moving apart
    Resolved { impulse: f32 },
}

/// Resolve a contact between `a` and `b`
///
/// `contact.normal` must point from `b` toward `a`, as returned by
/// [`detect`](crate::collision::detect). `gravity` and `h` are this step's
/// gravity and fixed timestep; friction uses them to tell whether a body was
/// resting before the step.
pub fn resolve(
    a: &mut RigidBody2D,
    b: &mut RigidBody2D,
    contact: &Contact,
    gravity: Vec2,
    h: f32,
) -> ContactResponse {
    if a.is_kinematic() || b.is_kinematic() || (a.is_static() && b.is_static()) {
        return ContactResponse::Ignored;
    }

    let a_was_resting = was_resting(a, gravity, h);
    let b_was_resting = was_resting(b, gravity, h);

    separate(a, b, contact);

    let inverse_mass_sum = a.inverse_mass() + b.inverse_mass();
    if inverse_mass_sum <= f32::EPSILON {
        return ContactResponse::Resolved { impulse: 0.0 };
    }

    let normal = contact.normal;
    let elasticity = if a.is_static() {
        b.material.elasticity
    } else if b.is_static() {
        a.material.elasticity
    } else {
        a.material.combined_elasticity(&b.material)
    };

    let relative_velocity = a.velocity - b.velocity;
    let impulse = (-(1.0 + elasticity) * relative_velocity).dot(normal)
        / normal.dot(normal * inverse_mass_sum);

    // Already separating along the normal
    if impulse <= 0.0 {
        return ContactResponse::Resolved { impulse: 0.0 };
    }

    // Equal and opposite: a is pushed along the normal, b against it
    b.apply_force_to_body(a, normal * impulse, contact.point);

    let material_b = b.material;
    apply_friction(a, &material_b, contact, impulse, a_was_resting, gravity, h);
    let material_a = a.material;
    apply_friction(b, &material_a, contact, impulse, b_was_resting, gravity, h);

    ContactResponse::Resolved { impulse }
}

/// Whether the body was at rest before this step's gravity was applied
fn was_resting(body: &RigidBody2D, gravity: Vec2, h: f32) -> bool {
    (body.velocity - gravity * h).length() <= LINEAR_REST_THRESHOLD
}

/// Move both bodies out of penetration
///
/// Each body takes a share of the depth proportional to its own momentum, so
/// a slow or light body yields less ground than a fast or heavy one. A static
/// partner leaves the whole depth to the other body.
fn separate(a: &mut RigidBody2D, b: &mut RigidBody2D, contact: &Contact) {
    let depth = contact.penetration;
    if depth <= 0.0 {
        return;
    }

    let share_a = if a.is_static() {
        0.0
    } else if b.is_static() {
        1.0
    } else {
        let momentum_a = a.momentum();
        let total = momentum_a + b.momentum();
        if total <= MOMENTUM_EPSILON {
            0.5
        } else {
            momentum_a / total
        }
    };

    if share_a > 0.0 {
        push_out(a, contact.normal, depth * share_a);
    }
    if share_a < 1.0 {
        push_out(b, -contact.normal, depth * (1.0 - share_a));
    }
}

/// Back a body out by `depth` measured along `escape`
///
/// A moving body retreats along its own reversed velocity, far enough that the
/// escape-direction component equals `depth`. A body at rest, or one whose
/// reversed velocity barely points out of the contact, goes straight along
/// `escape`.
fn push_out(body: &mut RigidBody2D, escape: Vec2, depth: f32) {
    let back = (-body.velocity).try_normalized();
    match back {
        Some(back) if back.dot(escape) >= MIN_PUSHBACK_COSINE => {
            body.position += back * (depth / back.dot(escape));
        }
        _ => body.position += escape * depth,
    }
}

/// Coulomb friction against the sliding direction
///
/// The coefficient is static when the body was resting before the step and
/// kinetic otherwise. Friction is applied only while it does not exceed the
/// body's post-impulse speed. Past that the body is arrested: its velocity is
/// zeroed, bounce included, and it gets an impulse that cancels the next
/// step's gravity.
fn apply_friction(
    body: &mut RigidBody2D,
    other: &PhysicsMaterial,
    contact: &Contact,
    impulse: f32,
    was_resting: bool,
    gravity: Vec2,
    h: f32,
) {
    if !body.is_dynamic() {
        return;
    }

    let mut tangent = contact.normal.perp();
    let sliding = body.velocity.dot(tangent);
    if sliding == 0.0 {
        return;
    }
    if sliding > 0.0 {
        tangent = -tangent;
    }

    let coefficient = if was_resting {
        body.material.combined_static_friction(other)
    } else {
        body.material.combined_kinetic_friction(other)
    };
    let magnitude = coefficient * impulse;

    if magnitude <= body.velocity.length() {
        let lever_arm = contact.point - body.position;
        body.apply_force(tangent * magnitude, lever_arm);
    } else {
        body.velocity = Vec2::ZERO;
        let counter_gravity = -gravity * body.mass() * h;
        body.apply_force(counter_gravity, Vec2::ZERO);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::detect;

    const H: f32 = 0.01;

    fn resolve_pair(a: &mut RigidBody2D, b: &mut RigidBody2D, gravity: Vec2) -> ContactResponse {
        let contact = detect(a, b).expect("bodies should be in contact");
        resolve(a, b, &contact, gravity, H)
    }

    fn kinetic_energy(body: &RigidBody2D) -> f32 {
        0.5 * body.mass() * body.velocity.length_squared()
    }

    #[test]
    fn test_elastic_collision_conserves_momentum_and_energy() {
        let mut a =
            RigidBody2D::new_circle(Vec2::ZERO, 1.0, 1.0).with_velocity(Vec2::new(1.0, 0.0));
        let mut b = RigidBody2D::new_circle(Vec2::new(1.9, 0.0), 1.0, 2.0)
            .with_velocity(Vec2::new(-1.0, 0.0));

        let momentum_before = a.velocity * a.mass() + b.velocity * b.mass();
        let energy_before = kinetic_energy(&a) + kinetic_energy(&b);

        let response = resolve_pair(&mut a, &mut b, Vec2::ZERO);
        assert!(matches!(response, ContactResponse::Resolved { impulse } if impulse > 0.0));

        let momentum_after = a.velocity * a.mass() + b.velocity * b.mass();
        let energy_after = kinetic_energy(&a) + kinetic_energy(&b);

        assert!((momentum_after - momentum_before).length() < 1e-5);
        assert!((energy_after - energy_before).abs() < 1e-4);
        assert!((a.velocity.x + 5.0 / 3.0).abs() < 1e-4);
        assert!((b.velocity.x - 1.0 / 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_separating_bodies_get_no_impulse() {
        let mut a =
            RigidBody2D::new_circle(Vec2::ZERO, 1.0, 1.0).with_velocity(Vec2::new(-1.0, 0.0));
        let mut b = RigidBody2D::new_circle(Vec2::new(1.9, 0.0), 1.0, 1.0)
            .with_velocity(Vec2::new(1.0, 0.0));

        let response = resolve_pair(&mut a, &mut b, Vec2::ZERO);
        assert_eq!(response, ContactResponse::Resolved { impulse: 0.0 });
        assert_eq!(a.velocity, Vec2::new(-1.0, 0.0));
        assert_eq!(b.velocity, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_kinematic_pair_is_ignored() {
        let mut a = RigidBody2D::new_circle(Vec2::ZERO, 1.0, 1.0).with_kinematic(true);
        let mut b = RigidBody2D::new_circle(Vec2::new(1.0, 0.0), 1.0, 1.0)
            .with_velocity(Vec2::new(-3.0, 0.0));
        let position_b = b.position;

        assert_eq!(resolve_pair(&mut a, &mut b, Vec2::ZERO), ContactResponse::Ignored);
        assert_eq!(b.position, position_b);
        assert_eq!(b.velocity, Vec2::new(-3.0, 0.0));
    }

    #[test]
    fn test_two_static_bodies_are_ignored() {
        let mut a = RigidBody2D::new_box(Vec2::ZERO, 2.0, 2.0, 1.0).with_static(true);
        let mut b = RigidBody2D::new_box(Vec2::new(1.0, 0.0), 2.0, 2.0, 1.0).with_static(true);
        assert_eq!(resolve_pair(&mut a, &mut b, Vec2::ZERO), ContactResponse::Ignored);
    }

    #[test]
    fn test_static_box_never_moves() {
        for mass in [0.1, 1.0, 1000.0] {
            let mut circle = RigidBody2D::new_circle(Vec2::new(0.0, 1.8), 1.0, mass)
                .with_velocity(Vec2::new(3.0, -50.0))
                .with_friction(0.5, 0.4);
            let mut wall = RigidBody2D::new_box(Vec2::ZERO, 2.0, 2.0, 1.0).with_static(true);

            resolve_pair(&mut circle, &mut wall, Vec2::new(0.0, -10.0));

            assert_eq!(wall.position, Vec2::ZERO);
            assert_eq!(wall.velocity, Vec2::ZERO);
            assert_eq!(wall.angular_velocity, 0.0);
            assert!(circle.velocity.y > 0.0);
        }
    }

    #[test]
    fn test_box_circle_order_symmetry() {
        let make = || {
            let aabb = RigidBody2D::new_box(Vec2::ZERO, 2.0, 2.0, 3.0)
                .with_velocity(Vec2::new(0.5, 0.2))
                .with_elasticity(0.6);
            let circle = RigidBody2D::new_circle(Vec2::new(1.7, 0.4), 1.0, 1.0)
                .with_velocity(Vec2::new(-2.0, 0.1))
                .with_elasticity(0.8);
            (aabb, circle)
        };

        let (mut box_first, mut circle_second) = make();
        let forward = resolve_pair(&mut box_first, &mut circle_second, Vec2::ZERO);

        let (mut box_second, mut circle_first) = make();
        let reverse = resolve_pair(&mut circle_first, &mut box_second, Vec2::ZERO);

        let (ContactResponse::Resolved { impulse: j1 }, ContactResponse::Resolved { impulse: j2 }) =
            (forward, reverse)
        else {
            panic!("both orders should resolve");
        };
        assert!((j1 - j2).abs() < 1e-5);
        assert!((box_first.velocity - box_second.velocity).length() < 1e-5);
        assert!((circle_second.velocity - circle_first.velocity).length() < 1e-5);
        assert!((box_first.angular_velocity - box_second.angular_velocity).abs() < 1e-5);
        assert!((circle_second.angular_velocity - circle_first.angular_velocity).abs() < 1e-5);
    }

    #[test]
    fn test_circle_rebounds_from_plane() {
        let mut circle = RigidBody2D::new_circle(Vec2::new(0.0, 0.9), 1.0, 1.0)
            .with_velocity(Vec2::new(0.0, -2.0))
            .with_elasticity(0.5);
        let mut floor = RigidBody2D::new_plane(Vec2::Y, 0.0).unwrap();

        resolve_pair(&mut circle, &mut floor, Vec2::ZERO);

        // Uses the circle's own elasticity against a static plane
        assert!((circle.velocity.y - 1.0).abs() < 1e-5);
        assert!((circle.position.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_pushback_follows_reverse_velocity() {
        let mut circle = RigidBody2D::new_circle(Vec2::new(0.0, 0.9), 1.0, 1.0)
            .with_velocity(Vec2::new(1.0, -1.0));
        let mut floor = RigidBody2D::new_plane(Vec2::Y, 0.0).unwrap();

        resolve_pair(&mut circle, &mut floor, Vec2::ZERO);

        // Backed out along (-1, 1) until clear of the plane
        assert!((circle.position.y - 1.0).abs() < 1e-5);
        assert!((circle.position.x + 0.1).abs() < 1e-5);
    }

    #[test]
    fn test_grazing_pushback_goes_along_normal() {
        let mut circle = RigidBody2D::new_circle(Vec2::new(0.0, 0.9), 1.0, 1.0)
            .with_velocity(Vec2::new(10.0, -0.1));
        let mut floor = RigidBody2D::new_plane(Vec2::Y, 0.0).unwrap();

        resolve_pair(&mut circle, &mut floor, Vec2::ZERO);

        assert_eq!(circle.position.x, 0.0);
        assert!((circle.position.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_momentum_weighted_separation() {
        // Only `a` is moving, so it takes the whole correction
        let mut a =
            RigidBody2D::new_circle(Vec2::ZERO, 1.0, 1.0).with_velocity(Vec2::new(1.0, 0.0));
        let mut b = RigidBody2D::new_circle(Vec2::new(1.8, 0.0), 1.0, 1.0);

        resolve_pair(&mut a, &mut b, Vec2::ZERO);

        assert!((a.position.x + 0.2).abs() < 1e-5);
        assert_eq!(b.position, Vec2::new(1.8, 0.0));
    }

    #[test]
    fn test_resting_bodies_split_evenly() {
        let mut a = RigidBody2D::new_circle(Vec2::ZERO, 1.0, 1.0);
        let mut b = RigidBody2D::new_circle(Vec2::new(1.8, 0.0), 1.0, 1.0);

        resolve_pair(&mut a, &mut b, Vec2::ZERO);

        assert!((a.position.x + 0.1).abs() < 1e-5);
        assert!((b.position.x - 1.9).abs() < 1e-5);
    }

    #[test]
    fn test_kinetic_friction_slows_sliding() {
        let mut slider = RigidBody2D::new_box(Vec2::new(0.0, 0.99), 2.0, 2.0, 1.0)
            .with_velocity(Vec2::new(5.0, -1.0))
            .with_elasticity(0.0)
            .with_material(PhysicsMaterial::new(0.0).with_friction(0.5, 0.5));
        let mut floor = RigidBody2D::new_plane(Vec2::Y, 0.0).unwrap();

        resolve_pair(&mut slider, &mut floor, Vec2::ZERO);

        // Impulse 1, friction (0.5 + 0) / 2 · 1 = 0.25 against the slide
        assert!((slider.velocity.x - 4.75).abs() < 1e-4);
        assert!(slider.velocity.y.abs() < 1e-5);
    }

    #[test]
    fn test_friction_stops_slow_slider() {
        let gravity = Vec2::new(0.0, -10.0);
        let mut slider = RigidBody2D::new_box(Vec2::new(0.0, 0.99), 2.0, 2.0, 1.0)
            .with_velocity(Vec2::new(0.01, -0.1))
            .with_material(PhysicsMaterial::new(0.0).with_friction(1.0, 1.0));
        let mut floor = RigidBody2D::new_plane(Vec2::Y, 0.0)
            .unwrap()
            .with_friction(1.0, 1.0);

        resolve_pair(&mut slider, &mut floor, gravity);

        // Stopped, then lifted by exactly one step of gravity
        assert_eq!(slider.velocity.x, 0.0);
        assert!((slider.velocity.y - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_friction_arrest_cancels_bounce() {
        let gravity = Vec2::new(0.0, -10.0);
        let mut ball = RigidBody2D::new_circle(Vec2::new(0.0, 0.95), 1.0, 1.0)
            .with_velocity(Vec2::new(0.001, -5.0))
            .with_material(PhysicsMaterial::new(1.0).with_friction(1.0, 1.0));
        let mut floor = RigidBody2D::new_plane(Vec2::Y, 0.0)
            .unwrap()
            .with_friction(1.0, 1.0);

        let response = resolve_pair(&mut ball, &mut floor, gravity);

        // The rebound would be 5 up, but friction 1 · 10 outweighs it
        assert_eq!(response, ContactResponse::Resolved { impulse: 10.0 });
        assert_eq!(ball.velocity.x, 0.0);
        assert!((ball.velocity.y - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_weak_friction_keeps_bounce() {
        let mut ball = RigidBody2D::new_circle(Vec2::new(0.0, 0.95), 1.0, 1.0)
            .with_velocity(Vec2::new(1.0, -5.0))
            .with_material(PhysicsMaterial::new(1.0).with_friction(0.1, 0.1));
        let mut floor = RigidBody2D::new_plane(Vec2::Y, 0.0)
            .unwrap()
            .with_friction(0.1, 0.1);

        resolve_pair(&mut ball, &mut floor, Vec2::new(0.0, -10.0));

        // Friction 0.1 · 10 = 1 is within the post-bounce speed
        assert!((ball.velocity.y - 5.0).abs() < 1e-5);
        assert!(ball.velocity.x.abs() < 1e-5);
    }

    #[test]
    fn test_moving_body_uses_kinetic_friction() {
        let material = PhysicsMaterial::new(0.0).with_friction(1.0, 0.2);
        let mut slider = RigidBody2D::new_box(Vec2::new(0.0, 0.99), 2.0, 2.0, 1.0)
            .with_velocity(Vec2::new(0.5, -0.1))
            .with_material(material);
        let mut floor = RigidBody2D::new_plane(Vec2::Y, 0.0)
            .unwrap()
            .with_material(material);

        resolve_pair(&mut slider, &mut floor, Vec2::new(0.0, -10.0));

        // Impulse 0.1; kinetic 0.2 · 0.1 slows it, static would take 0.1
        assert!((slider.velocity.x - 0.48).abs() < 1e-5);
        assert!(slider.velocity.y.abs() < 1e-5);
    }

    #[test]
    fn test_resting_body_uses_static_friction() {
        // Tilted gravity drags a resting box sideways along the floor
        let gravity = Vec2::new(3.0, -10.0);
        let material = PhysicsMaterial::new(0.0).with_friction(1.0, 0.2);
        let mut slider = RigidBody2D::new_box(Vec2::new(0.0, 0.99), 2.0, 2.0, 1.0)
            .with_velocity(gravity * H)
            .with_material(material);
        let mut floor = RigidBody2D::new_plane(Vec2::Y, 0.0)
            .unwrap()
            .with_material(material);

        resolve_pair(&mut slider, &mut floor, gravity);

        // Static 1.0 · 0.1 exceeds the 0.03 slide, so the box is held in
        // place; kinetic 0.2 · 0.1 would only have slowed it to 0.01
        assert!((slider.velocity.x + 0.03).abs() < 1e-5);
        assert!((slider.velocity.y - 0.1).abs() < 1e-5);
    }
}
