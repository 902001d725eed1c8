//! Convex polygon vs polygon test
//!
//! Separating Axis Theorem over the edge normals of both polygons, followed by
//! reference/incident edge clipping to find where the polygons touch. Nothing
//! here allocates: vertices are read by index and clip results are fixed-size.

use super::{Contact, Pose};
use crate::shapes::Polygon;
use phys2d_math::Vec2;

/// Tolerance for keeping a clipped point that sits on the reference face
const CLIP_TOLERANCE: f32 = 1e-5;

/// The edge of a polygon that faces a given direction
#[derive(Clone, Copy, Debug)]
struct Edge {
    /// Vertex furthest along the direction
    extreme: Vec2,
    start: Vec2,
    end: Vec2,
}

impl Edge {
    fn direction(&self) -> Vec2 {
        self.end - self.start
    }
}

/// Test polygon vs polygon collision
///
/// The normal is the axis of least overlap, pointing from `b` toward `a`. The
/// contact point is the average of the clipped contact points.
pub fn polygon_vs_polygon(pose_a: Pose, a: &Polygon, pose_b: Pose, b: &Polygon) -> Option<Contact> {
    let reach = a.bounding_radius() + b.bounding_radius();
    if (pose_a.position - pose_b.position).length_squared() > reach * reach {
        return None;
    }

    let mut penetration = f32::INFINITY;
    let mut axis = Vec2::ZERO;
    for (polygon, pose) in [(a, pose_a), (b, pose_b)] {
        for i in 0..polygon.vertex_count() {
            let candidate = polygon.edge_normal(i, pose.rotation);
            let (min_a, max_a) = a.project(candidate, pose_a.position, pose_a.rotation);
            let (min_b, max_b) = b.project(candidate, pose_b.position, pose_b.rotation);

            let overlap = (max_a - min_b).min(max_b - min_a);
            if overlap < 0.0 {
                return None;
            }
            if overlap < penetration {
                penetration = overlap;
                axis = candidate;
            }
        }
    }

    // Orient from b toward a
    let normal = if axis.dot(pose_a.position - pose_b.position) < 0.0 {
        -axis
    } else {
        axis
    };

    let point = clip_contact(pose_a, a, pose_b, b, normal)
        .unwrap_or_else(|| deepest_vertex(pose_b, b, normal));

    Some(Contact::new(point, normal, penetration))
}

/// Average of the clipped contact points, or `None` when clipping leaves nothing
///
/// `normal` points from `b` toward `a`.
fn clip_contact(
    pose_a: Pose,
    a: &Polygon,
    pose_b: Pose,
    b: &Polygon,
    normal: Vec2,
) -> Option<Vec2> {
    let toward_b = -normal;
    let edge_a = best_edge(pose_a, a, toward_b);
    let edge_b = best_edge(pose_b, b, normal);

    // The edge more perpendicular to the normal is the reference face
    let (reference, incident, toward_incident) =
        if edge_a.direction().dot(normal).abs() <= edge_b.direction().dot(normal).abs() {
            (edge_a, edge_b, toward_b)
        } else {
            (edge_b, edge_a, normal)
        };

    let ref_dir = reference.direction().try_normalized()?;

    // Clip the incident edge against both side planes of the reference edge
    let offset_start = ref_dir.dot(reference.start);
    let (points, count) = clip(incident.start, incident.end, ref_dir, offset_start);
    if count < 2 {
        return None;
    }

    let offset_end = ref_dir.dot(reference.end);
    let (points, count) = clip(points[0], points[1], -ref_dir, -offset_end);
    if count < 2 {
        return None;
    }

    // Keep only points at or behind the reference face
    let mut face_normal = ref_dir.perp();
    if face_normal.dot(toward_incident) < 0.0 {
        face_normal = -face_normal;
    }
    let face_depth = face_normal.dot(reference.extreme);

    let mut sum = Vec2::ZERO;
    let mut kept = 0;
    for point in &points[..count] {
        if face_normal.dot(*point) - face_depth <= CLIP_TOLERANCE {
            sum += *point;
            kept += 1;
        }
    }

    if kept == 0 {
        None
    } else {
        Some(sum / kept as f32)
    }
}

/// The edge adjacent to the vertex furthest along `direction` that is most
/// perpendicular to it
fn best_edge(pose: Pose, polygon: &Polygon, direction: Vec2) -> Edge {
    let count = polygon.vertex_count();
    let vertex = |i: usize| polygon.world_vertex(i, pose.position, pose.rotation);

    let mut index = 0;
    let mut best = f32::NEG_INFINITY;
    for i in 0..count {
        let projection = direction.dot(vertex(i));
        if projection > best {
            best = projection;
            index = i;
        }
    }

    let extreme = vertex(index);
    let next = vertex(index + 1);
    let prev = vertex(index + count - 1);

    let left = (extreme - next).normalized();
    let right = (extreme - prev).normalized();

    if right.dot(direction) <= left.dot(direction) {
        Edge {
            extreme,
            start: prev,
            end: extreme,
        }
    } else {
        Edge {
            extreme,
            start: extreme,
            end: next,
        }
    }
}

/// Keep the part of segment `v1 -> v2` with `n · p >= offset`
fn clip(v1: Vec2, v2: Vec2, n: Vec2, offset: f32) -> ([Vec2; 2], usize) {
    let mut points = [Vec2::ZERO; 2];
    let mut count = 0;

    let d1 = n.dot(v1) - offset;
    let d2 = n.dot(v2) - offset;
    if d1 >= 0.0 {
        points[count] = v1;
        count += 1;
    }
    if d2 >= 0.0 {
        points[count] = v2;
        count += 1;
    }

    // Endpoints on opposite sides: add the crossing point
    if d1 * d2 < 0.0 {
        let t = d1 / (d1 - d2);
        points[count] = v1 + (v2 - v1) * t;
        count += 1;
    }

    (points, count)
}

/// Vertex of `polygon` furthest along `normal`, i.e. deepest into the other shape
fn deepest_vertex(pose: Pose, polygon: &Polygon, normal: Vec2) -> Vec2 {
    polygon
        .world_vertices(pose.position, pose.rotation)
        .fold((f32::NEG_INFINITY, pose.position), |(best, point), v| {
            let projection = normal.dot(v);
            if projection > best {
                (projection, v)
            } else {
                (best, point)
            }
        })
        .1
}
