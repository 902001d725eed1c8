//! Circle vs circle and circle vs box tests

use super::Contact;
use crate::shapes::{Aabb, Circle};
use phys2d_math::Vec2;

/// Below this distance the circle center is treated as inside the box
const INSIDE_EPSILON: f32 = 1e-4;

/// Test circle vs circle collision
///
/// The normal points from `b` toward `a`. Coincident centers have no defined
/// direction, so they separate along +Y.
pub fn circle_vs_circle(center_a: Vec2, a: &Circle, center_b: Vec2, b: &Circle) -> Option<Contact> {
    let delta = center_a - center_b;
    let radii = a.radius + b.radius;
    let distance = delta.length();
    if distance > radii {
        return None;
    }

    let normal = delta.try_normalized().unwrap_or(Vec2::Y);
    let point = center_a - normal * a.radius;
    Some(Contact::new(point, normal, radii - distance))
}

/// Test circle vs box collision
///
/// The normal points from the box toward the circle. With the center outside
/// the box it follows the exact clamp-to-center direction; with the center
/// inside it takes the face of least overlap.
pub fn circle_vs_box(
    center: Vec2,
    circle: &Circle,
    box_center: Vec2,
    aabb: &Aabb,
) -> Option<Contact> {
    let closest = aabb.closest_point(box_center, center);
    let delta = center - closest;
    let distance = delta.length();

    if distance > INSIDE_EPSILON {
        if distance >= circle.radius {
            return None;
        }
        let normal = delta / distance;
        return Some(Contact::new(closest, normal, circle.radius - distance));
    }

    // Center is inside the box: leave through the nearest face
    let to_min = center - aabb.min(box_center);
    let to_max = aabb.max(box_center) - center;

    let mut face_distance = to_min.x;
    let mut normal = -Vec2::X;
    if to_max.x < face_distance {
        face_distance = to_max.x;
        normal = Vec2::X;
    }
    if to_min.y < face_distance {
        face_distance = to_min.y;
        normal = -Vec2::Y;
    }
    if to_max.y < face_distance {
        face_distance = to_max.y;
        normal = Vec2::Y;
    }

    let point = center + normal * face_distance;
    Some(Contact::new(point, normal, circle.radius + face_distance))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circles_overlapping() {
        let unit = Circle::new(1.0);
        let contact = circle_vs_circle(Vec2::ZERO, &unit, Vec2::new(1.5, 0.0), &unit).unwrap();
        assert!((contact.penetration - 0.5).abs() < 1e-6);
        // From b toward a
        assert_eq!(contact.normal, -Vec2::X);
        assert_eq!(contact.point, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_circles_touching() {
        let (small, large) = (Circle::new(1.0), Circle::new(2.0));
        let contact = circle_vs_circle(Vec2::ZERO, &small, Vec2::new(0.0, 3.0), &large).unwrap();
        assert_eq!(contact.penetration, 0.0);
    }

    #[test]
    fn test_circles_apart() {
        let unit = Circle::new(1.0);
        assert!(circle_vs_circle(Vec2::ZERO, &unit, Vec2::new(3.0, 0.0), &unit).is_none());
    }

    #[test]
    fn test_coincident_circles_have_finite_normal() {
        let unit = Circle::new(1.0);
        let contact = circle_vs_circle(Vec2::ZERO, &unit, Vec2::ZERO, &unit).unwrap();
        assert!(contact.normal.is_finite());
        assert_eq!(contact.normal, Vec2::Y);
        assert!((contact.penetration - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_circle_beside_box() {
        let aabb = Aabb::new(2.0, 2.0);
        let contact =
            circle_vs_box(Vec2::new(1.5, 0.0), &Circle::new(1.0), Vec2::ZERO, &aabb).unwrap();
        assert_eq!(contact.normal, Vec2::X);
        assert!((contact.penetration - 0.5).abs() < 1e-6);
        assert_eq!(contact.point, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_circle_near_box_corner() {
        let aabb = Aabb::new(2.0, 2.0);
        let center = Vec2::new(1.5, 1.5);
        let contact = circle_vs_box(center, &Circle::new(1.0), Vec2::ZERO, &aabb).unwrap();

        let expected = Vec2::new(1.0, 1.0).normalized();
        assert!((contact.normal - expected).length() < 1e-6);
        let gap = 0.5 * 2.0_f32.sqrt();
        assert!((contact.penetration - (1.0 - gap)).abs() < 1e-5);
    }

    #[test]
    fn test_circle_missing_box_corner() {
        let aabb = Aabb::new(2.0, 2.0);
        assert!(circle_vs_box(Vec2::new(1.8, 1.8), &Circle::new(1.0), Vec2::ZERO, &aabb).is_none());
    }

    #[test]
    fn test_circle_center_inside_box() {
        let aabb = Aabb::new(4.0, 2.0);
        // 0.2 from the top face, 1.8 from the bottom, 1.5 and 2.5 from the sides
        let center = Vec2::new(-0.5, 0.8);
        let contact = circle_vs_box(center, &Circle::new(0.5), Vec2::ZERO, &aabb).unwrap();

        assert_eq!(contact.normal, Vec2::Y);
        assert!((contact.penetration - 0.7).abs() < 1e-5);
        assert!((contact.point - Vec2::new(-0.5, 1.0)).length() < 1e-5);
    }
}
