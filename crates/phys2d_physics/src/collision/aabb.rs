//! Box vs box test

use super::Contact;
use crate::shapes::Aabb;
use phys2d_math::Vec2;

/// Test box vs box collision
///
/// Any axis with a gap rejects the pair. Otherwise both world axes are
/// candidate separating axes; the one with the least overlap
/// `min(maxA - minB, maxB - minA)` gives the penetration, and the normal is
/// that axis signed to point from `b` toward `a`. The contact point is the
/// center of the overlap region.
///
/// Deep overlaps resolve along the shallower axis even when the centers are
/// further apart along the other one. Snapping the center-to-center direction
/// to its dominant axis instead was tried before and pushes thin boxes out
/// through their long side.
pub fn box_vs_box(center_a: Vec2, a: &Aabb, center_b: Vec2, b: &Aabb) -> Option<Contact> {
    let (min_a, max_a) = (a.min(center_a), a.max(center_a));
    let (min_b, max_b) = (b.min(center_b), b.max(center_b));

    // Check for separation on each axis
    if min_a.x > max_b.x || min_b.x > max_a.x {
        return None;
    }
    if min_a.y > max_b.y || min_b.y > max_a.y {
        return None;
    }

    let overlap_x = (max_a.x - min_b.x).min(max_b.x - min_a.x);
    let overlap_y = (max_a.y - min_b.y).min(max_b.y - min_a.y);

    let (normal, penetration) = if overlap_x <= overlap_y {
        let sign = if center_a.x < center_b.x { -1.0 } else { 1.0 };
        (Vec2::X * sign, overlap_x)
    } else {
        let sign = if center_a.y < center_b.y { -1.0 } else { 1.0 };
        (Vec2::Y * sign, overlap_y)
    };

    let overlap_min = min_a.max_components(min_b);
    let overlap_max = max_a.min_components(max_b);
    let point = (overlap_min + overlap_max) * 0.5;

    Some(Contact::new(point, normal, penetration))
}
