//! Narrow-phase collision detection
//!
//! Every pair function reports its [`Contact`] with the normal pointing from
//! the second shape toward the first. [`detect`] dispatches on the pair of
//! shape kinds and keeps that convention for whichever order the bodies
//! arrive in, swapping arguments and flipping the normal for reversed pairs.

mod aabb;
mod circle;
mod plane;
mod polygon;

pub use aabb::box_vs_box;
pub use circle::{circle_vs_box, circle_vs_circle};
pub use plane::{box_vs_plane, circle_vs_plane, polygon_vs_plane};
pub use polygon::polygon_vs_polygon;

use crate::body::RigidBody2D;
use crate::shapes::{Shape, ShapeKind};
use phys2d_math::Vec2;

/// Contact information from a collision
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    /// World-space point where the shapes touch
    ///
    /// For polygon pairs this is the average of the clipped contact points.
    pub point: Vec2,
    /// Unit normal pointing from the second shape toward the first
    pub normal: Vec2,
    /// Penetration depth (zero when just touching)
    pub penetration: f32,
}

impl Contact {
    /// Create a new contact
    pub fn new(point: Vec2, normal: Vec2, penetration: f32) -> Self {
        Self {
            point,
            normal,
            penetration,
        }
    }

    /// The same contact seen with the two shapes swapped
    pub fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            ..self
        }
    }

    /// Check if this represents an actual overlap (positive penetration)
    pub fn is_colliding(&self) -> bool {
        self.penetration > 0.0
    }
}

/// Position and orientation of a shape in the world
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec2,
    pub rotation: f32,
}

impl Pose {
    pub fn new(position: Vec2, rotation: f32) -> Self {
        Self { position, rotation }
    }

    fn of(body: &RigidBody2D) -> Self {
        Self::new(body.position, body.rotation)
    }
}

/// Whether the narrow phase has a test for this pair of shape kinds
///
/// Plane pairs and polygon pairs against circles or boxes always report no
/// contact.
pub fn is_supported(a: ShapeKind, b: ShapeKind) -> bool {
    use ShapeKind::*;
    !matches!(
        (a, b),
        (Plane, Plane) | (Polygon, Circle) | (Polygon, Box) | (Circle, Polygon) | (Box, Polygon)
    )
}

/// Test two bodies for contact
///
/// The returned normal points from `b` toward `a`.
pub fn detect(a: &RigidBody2D, b: &RigidBody2D) -> Option<Contact> {
    match (a.shape(), b.shape()) {
        // Planes are infinite and immovable; they never collide with each other
        (Shape::Plane(_), Shape::Plane(_)) => None,

        (Shape::Circle(circle), Shape::Plane(plane)) => circle_vs_plane(a.position, circle, plane),
        // Canonical normal points from the plane to the circle, we need circle to plane
        (Shape::Plane(plane), Shape::Circle(circle)) => {
            circle_vs_plane(b.position, circle, plane).map(Contact::flipped)
        }

        (Shape::Box(aabb), Shape::Plane(plane)) => box_vs_plane(a.position, aabb, plane),
        (Shape::Plane(plane), Shape::Box(aabb)) => {
            box_vs_plane(b.position, aabb, plane).map(Contact::flipped)
        }

        (Shape::Polygon(polygon), Shape::Plane(plane)) => {
            polygon_vs_plane(Pose::of(a), polygon, plane)
        }
        (Shape::Plane(plane), Shape::Polygon(polygon)) => {
            polygon_vs_plane(Pose::of(b), polygon, plane).map(Contact::flipped)
        }

        (Shape::Circle(ca), Shape::Circle(cb)) => circle_vs_circle(a.position, ca, b.position, cb),

        (Shape::Circle(circle), Shape::Box(aabb)) => {
            circle_vs_box(a.position, circle, b.position, aabb)
        }
        // Canonical normal points from the box to the circle, we need circle to box
        (Shape::Box(aabb), Shape::Circle(circle)) => {
            circle_vs_box(b.position, circle, a.position, aabb).map(Contact::flipped)
        }

        (Shape::Box(ba), Shape::Box(bb)) => box_vs_box(a.position, ba, b.position, bb),

        (Shape::Polygon(pa), Shape::Polygon(pb)) => {
            polygon_vs_polygon(Pose::of(a), pa, Pose::of(b), pb)
        }

        // No narrow-phase test for polygons against circles or boxes
        (Shape::Polygon(_), Shape::Circle(_) | Shape::Box(_))
        | (Shape::Circle(_) | Shape::Box(_), Shape::Polygon(_)) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_polygon(position: Vec2) -> RigidBody2D {
        RigidBody2D::new_polygon(
            position,
            vec![
                Vec2::new(-1.0, -1.0),
                Vec2::new(1.0, -1.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(-1.0, 1.0),
            ],
            1.0,
        )
        .unwrap()
    }

    #[test]
    fn test_contact_flipped() {
        let contact = Contact::new(Vec2::new(1.0, 2.0), Vec2::Y, 0.5);
        let flipped = contact.flipped();
        assert_eq!(flipped.normal, -Vec2::Y);
        assert_eq!(flipped.point, contact.point);
        assert_eq!(flipped.penetration, contact.penetration);
    }

    #[test]
    fn test_plane_pair_never_collides() {
        let a = RigidBody2D::new_plane(Vec2::Y, 0.0).unwrap();
        let b = RigidBody2D::new_plane(Vec2::X, 0.0).unwrap();
        assert!(detect(&a, &b).is_none());
        assert!(!is_supported(ShapeKind::Plane, ShapeKind::Plane));
    }

    #[test]
    fn test_reversed_circle_plane_flips_normal() {
        let circle = RigidBody2D::new_circle(Vec2::new(0.0, 0.5), 1.0, 1.0);
        let plane = RigidBody2D::new_plane(Vec2::Y, 0.0).unwrap();

        let forward = detect(&circle, &plane).unwrap();
        let reverse = detect(&plane, &circle).unwrap();

        assert_eq!(forward.normal, Vec2::Y);
        assert_eq!(reverse.normal, -Vec2::Y);
        assert_eq!(forward.penetration, reverse.penetration);
    }

    #[test]
    fn test_reversed_circle_box_is_symmetric() {
        let circle = RigidBody2D::new_circle(Vec2::new(1.8, 0.3), 1.0, 1.0);
        let aabb = RigidBody2D::new_box(Vec2::ZERO, 2.0, 2.0, 1.0);

        let forward = detect(&circle, &aabb).unwrap();
        let reverse = detect(&aabb, &circle).unwrap();

        assert!((forward.normal + reverse.normal).length() < 1e-6);
        assert!((forward.penetration - reverse.penetration).abs() < 1e-6);
        // From the box toward the circle
        assert!(forward.normal.x > 0.0);
    }

    #[test]
    fn test_polygon_vs_circle_reports_nothing() {
        let polygon = square_polygon(Vec2::ZERO);
        let circle = RigidBody2D::new_circle(Vec2::ZERO, 1.0, 1.0);
        let aabb = RigidBody2D::new_box(Vec2::ZERO, 1.0, 1.0, 1.0);

        assert!(detect(&polygon, &circle).is_none());
        assert!(detect(&circle, &polygon).is_none());
        assert!(detect(&polygon, &aabb).is_none());
        assert!(detect(&aabb, &polygon).is_none());
        assert!(!is_supported(ShapeKind::Box, ShapeKind::Polygon));
    }

    #[test]
    fn test_every_other_pair_is_supported() {
        use ShapeKind::*;
        assert!(is_supported(Circle, Plane));
        assert!(is_supported(Plane, Box));
        assert!(is_supported(Polygon, Polygon));
        assert!(is_supported(Plane, Polygon));
        assert!(is_supported(Box, Box));
    }

    #[test]
    fn test_polygon_plane_dispatch() {
        let polygon = square_polygon(Vec2::new(0.0, 0.8));
        let plane = RigidBody2D::new_plane(Vec2::Y, 0.0).unwrap();

        let contact = detect(&polygon, &plane).unwrap();
        assert!((contact.penetration - 0.2).abs() < 1e-5);
        assert_eq!(contact.normal, Vec2::Y);

        let reverse = detect(&plane, &polygon).unwrap();
        assert_eq!(reverse.normal, -Vec2::Y);
    }
}
