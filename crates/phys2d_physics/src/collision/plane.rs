//! Shape vs plane tests
//!
//! All three are orientation-independent: a shape behind the plane is pushed
//! out the back, so the reported normal is the plane normal flipped toward
//! whichever side the shape's center is on.

use super::{Contact, Pose};
use crate::shapes::{Aabb, Circle, Plane, Polygon};
use phys2d_math::Vec2;

/// Vertices this close to the deepest one count as touching the plane together
const VERTEX_TIE_TOLERANCE: f32 = 1e-4;

/// Plane normal and signed distance of `center`, flipped so the distance is non-negative
fn facing(plane: &Plane, center: Vec2) -> (Vec2, f32) {
    let distance = plane.signed_distance(center);
    if distance < 0.0 {
        (-plane.normal, -distance)
    } else {
        (plane.normal, distance)
    }
}

/// Test circle vs plane collision
///
/// Touching counts as contact (zero penetration). The contact point is on the
/// circle surface, toward the plane.
pub fn circle_vs_plane(center: Vec2, circle: &Circle, plane: &Plane) -> Option<Contact> {
    let (normal, distance) = facing(plane, center);

    let penetration = circle.radius - distance;
    if penetration < 0.0 {
        return None;
    }

    let point = center - normal * circle.radius;
    Some(Contact::new(point, normal, penetration))
}

/// Test box vs plane collision
///
/// Penetration is the deepest corner's distance behind the plane; the contact
/// point is the average of every corner behind it.
pub fn box_vs_plane(center: Vec2, aabb: &Aabb, plane: &Plane) -> Option<Contact> {
    let (normal, center_distance) = facing(plane, center);

    let mut deepest = 0.0_f32;
    let mut sum = Vec2::ZERO;
    let mut count = 0;
    for corner in aabb.corners(center) {
        // Distance along the flipped normal, measured from the plane
        let depth = center_distance + normal.dot(corner - center);
        if depth < 0.0 {
            deepest = deepest.min(depth);
            sum += corner;
            count += 1;
        }
    }

    if count == 0 {
        return None;
    }

    Some(Contact::new(sum / count as f32, normal, -deepest))
}

/// Test polygon vs plane collision
///
/// The bounding radius rejects polygons whose center is too far from the plane
/// before any vertex is projected.
pub fn polygon_vs_plane(pose: Pose, polygon: &Polygon, plane: &Plane) -> Option<Contact> {
    let (normal, center_distance) = facing(plane, pose.position);
    if center_distance > polygon.bounding_radius() {
        return None;
    }

    let min_offset = polygon
        .world_vertices(pose.position, pose.rotation)
        .map(|v| normal.dot(v - pose.position))
        .fold(f32::INFINITY, f32::min);
    let deepest = center_distance + min_offset;
    if deepest >= 0.0 {
        return None;
    }

    let mut sum = Vec2::ZERO;
    let mut count = 0;
    for v in polygon.world_vertices(pose.position, pose.rotation) {
        if normal.dot(v - pose.position) - min_offset <= VERTEX_TIE_TOLERANCE {
            sum += v;
            count += 1;
        }
    }

    Some(Contact::new(sum / count as f32, normal, -deepest))
}
