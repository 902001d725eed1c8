//! Collision shapes for 2D physics
//!
//! Shapes hold geometry only. Position and orientation live on the owning
//! [`RigidBody2D`](crate::RigidBody2D); helpers here take them as arguments.

use std::fmt;

use crate::error::PhysicsError;
use phys2d_math::Vec2;

/// Padding added to a polygon's bounding radius
pub const POLYGON_RADIUS_PADDING: f32 = 0.1;

/// An infinite plane (a line in 2D) defined by normal and distance from origin
///
/// The plane equation is: normal · point = distance
/// Points with normal · point > distance are in front of the plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    /// Unit normal vector pointing to the front side
    pub normal: Vec2,
    /// Signed distance from origin along the normal
    pub distance: f32,
}

impl Plane {
    /// Create a new plane from a normal and distance
    ///
    /// The normal is normalized; a zero normal is rejected.
    pub fn new(normal: Vec2, distance: f32) -> Result<Self, PhysicsError> {
        let normal = normal.try_normalized().ok_or(PhysicsError::ZeroNormal)?;
        Ok(Self { normal, distance })
    }

    /// Create a plane whose surface is inclined `inclination` radians from horizontal
    ///
    /// An inclination of zero gives a floor with normal +Y.
    pub fn from_inclination(inclination: f32, distance: f32) -> Self {
        let (sin, cos) = inclination.sin_cos();
        Self {
            normal: Vec2::new(-sin, cos),
            distance,
        }
    }

    /// Horizontal floor at the given height
    pub fn floor(y: f32) -> Self {
        Self {
            normal: Vec2::Y,
            distance: y,
        }
    }

    /// Signed distance from a point to the plane
    ///
    /// Positive = in front, negative = behind, zero = on the plane.
    pub fn signed_distance(&self, point: Vec2) -> f32 {
        self.normal.dot(point) - self.distance
    }

    /// The point on the plane closest to the origin
    pub fn origin_point(&self) -> Vec2 {
        self.normal * self.distance
    }

    /// Direction along the plane surface (normal rotated clockwise)
    pub fn tangent(&self) -> Vec2 {
        Vec2::new(self.normal.y, -self.normal.x)
    }
}

/// A circle defined by its radius
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub radius: f32,
}

impl Circle {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    /// Moment of inertia of a solid disc: ½·m·r²
    pub fn moment(&self, mass: f32) -> f32 {
        0.5 * mass * self.radius * self.radius
    }
}

/// An axis-aligned box defined by its half-extents
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub half_extents: Vec2,
}

impl Aabb {
    /// Create a box from full width and height
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            half_extents: Vec2::new(width * 0.5, height * 0.5),
        }
    }

    pub fn width(&self) -> f32 {
        self.half_extents.x * 2.0
    }

    pub fn height(&self) -> f32 {
        self.half_extents.y * 2.0
    }

    /// Minimum corner when centered at `center`
    pub fn min(&self, center: Vec2) -> Vec2 {
        center - self.half_extents
    }

    /// Maximum corner when centered at `center`
    pub fn max(&self, center: Vec2) -> Vec2 {
        center + self.half_extents
    }

    /// Corners in counter-clockwise order starting at the minimum corner
    pub fn corners(&self, center: Vec2) -> [Vec2; 4] {
        let min = self.min(center);
        let max = self.max(center);
        [
            min,
            Vec2::new(max.x, min.y),
            max,
            Vec2::new(min.x, max.y),
        ]
    }

    /// Closest point inside or on the box to a given point
    pub fn closest_point(&self, center: Vec2, point: Vec2) -> Vec2 {
        point.clamp_components(self.min(center), self.max(center))
    }

    /// Moment of inertia of a solid rectangle: m·(w²+h²)/12
    pub fn moment(&self, mass: f32) -> f32 {
        let w = self.width();
        let h = self.height();
        mass * (w * w + h * h) / 12.0
    }
}

/// A convex polygon with vertices stored relative to its centroid
///
/// Vertices are wound counter-clockwise, so the outward normal of edge
/// `v[i] -> v[i+1]` is the edge direction rotated clockwise.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vec2>,
    radius: f32,
}

impl Polygon {
    /// Create a polygon from vertices already relative to the body position
    ///
    /// Clockwise input is reversed. Fewer than three vertices, or vertices that
    /// enclose no area, are rejected.
    pub fn new(mut vertices: Vec<Vec2>) -> Result<Self, PhysicsError> {
        let count = vertices.len();
        if count < 3 {
            return Err(PhysicsError::DegeneratePolygon { vertices: count });
        }

        let area = signed_area(&vertices);
        if area.abs() <= f32::EPSILON {
            return Err(PhysicsError::DegeneratePolygon { vertices: count });
        }
        if area < 0.0 {
            vertices.reverse();
        }

        let radius = vertices
            .iter()
            .map(|v| v.length())
            .fold(0.0_f32, f32::max)
            + POLYGON_RADIUS_PADDING;

        Ok(Self { vertices, radius })
    }

    /// Create a polygon from world-space points
    ///
    /// Returns the centroid (vertex average) to use as the body position, and
    /// the polygon with its vertices expressed relative to that centroid.
    pub fn from_world_points(points: &[Vec2]) -> Result<(Vec2, Self), PhysicsError> {
        if points.len() < 3 {
            return Err(PhysicsError::DegeneratePolygon { vertices: points.len() });
        }
        let sum = points.iter().fold(Vec2::ZERO, |acc, &p| acc + p);
        let centroid = sum / points.len() as f32;
        let local = points.iter().map(|&p| p - centroid).collect();
        Ok((centroid, Self::new(local)?))
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Conservative bound on the distance from the centroid to any vertex
    pub fn bounding_radius(&self) -> f32 {
        self.radius
    }

    /// World-space position of vertex `index`
    pub fn world_vertex(&self, index: usize, position: Vec2, rotation: f32) -> Vec2 {
        position + self.vertices[index % self.vertices.len()].rotated(rotation)
    }

    /// All vertices in world space
    pub fn world_vertices(&self, position: Vec2, rotation: f32) -> impl Iterator<Item = Vec2> + '_ {
        self.vertices.iter().map(move |v| position + v.rotated(rotation))
    }

    /// Outward unit normal of the edge starting at vertex `index`, in world orientation
    pub fn edge_normal(&self, index: usize, rotation: f32) -> Vec2 {
        let count = self.vertices.len();
        let edge = self.vertices[(index + 1) % count] - self.vertices[index % count];
        Vec2::new(edge.y, -edge.x).normalized().rotated(rotation)
    }

    /// Project the polygon onto an axis, returning `(min, max)`
    pub fn project(&self, axis: Vec2, position: Vec2, rotation: f32) -> (f32, f32) {
        self.world_vertices(position, rotation)
            .map(|v| axis.dot(v))
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), p| (min.min(p), max.max(p)))
    }
}

/// Shoelace area, positive for counter-clockwise winding
fn signed_area(vertices: &[Vec2]) -> f32 {
    let count = vertices.len();
    (0..count)
        .map(|i| vertices[i].cross(vertices[(i + 1) % count]))
        .sum::<f32>()
        * 0.5
}

/// The four shape kinds the narrow phase understands
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Plane,
    Circle,
    Box,
    Polygon,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeKind::Plane => "Plane",
            ShapeKind::Circle => "Circle",
            ShapeKind::Box => "Box",
            ShapeKind::Polygon => "Polygon",
        };
        f.write_str(name)
    }
}

/// Shape enum for storing the geometry of a body
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Plane(Plane),
    Circle(Circle),
    Box(Aabb),
    Polygon(Polygon),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Plane(_) => ShapeKind::Plane,
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Box(_) => ShapeKind::Box,
            Shape::Polygon(_) => ShapeKind::Polygon,
        }
    }

    /// Moment of inertia for the given mass
    ///
    /// Planes never rotate and polygons leave it unset, so both return zero.
    pub fn moment(&self, mass: f32) -> f32 {
        match self {
            Shape::Circle(c) => c.moment(mass),
            Shape::Box(b) => b.moment(mass),
            Shape::Plane(_) | Shape::Polygon(_) => 0.0,
        }
    }
}
