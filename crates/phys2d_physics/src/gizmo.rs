//! Debug drawing primitives
//!
//! Bodies describe themselves as [`Gizmo`]s; an external renderer implements
//! [`GizmoSink`] to draw them. The physics core never draws anything itself.

use phys2d_math::Vec2;
use serde::{Deserialize, Serialize};

/// Half-length of the segment drawn for an infinite plane
pub const PLANE_GIZMO_HALF_LENGTH: f32 = 300.0;

/// Segment count hint for circle gizmos
pub const CIRCLE_GIZMO_SEGMENTS: u32 = 24;

/// Seconds between markers on a projectile guide path
pub const PROJECTILE_PATH_STEP: f32 = 0.5;

/// How far ahead a projectile guide path reaches, in seconds
pub const PROJECTILE_PATH_DURATION: f32 = 5.0;

const PROJECTILE_MARKER_RADIUS: f32 = 0.2;
const PROJECTILE_MARKER_SEGMENTS: u32 = 12;

/// RGBA colour, components in [0, 1]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const YELLOW: Self = Self::rgb(1.0, 1.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// A shape-appropriate primitive describing one body for one frame
#[derive(Clone, Debug, PartialEq)]
pub enum Gizmo {
    /// Line segment (planes)
    Line { start: Vec2, end: Vec2, color: Color },
    /// Circle outline with an orientation tick from the center to `tick`
    Circle {
        center: Vec2,
        radius: f32,
        segments: u32,
        tick: Option<Vec2>,
        color: Color,
    },
    /// Filled convex polygon, drawn as a fan around the first point
    Polygon { points: Vec<Vec2>, color: Color },
}

impl Gizmo {
    /// Forward this primitive to a renderer
    pub fn draw<S: GizmoSink + ?Sized>(&self, sink: &mut S) {
        match self {
            Gizmo::Line { start, end, color } => sink.add_line(*start, *end, *color),
            Gizmo::Circle { center, radius, segments, tick, color } => {
                sink.add_circle(*center, *radius, *segments, *color);
                if let Some(tick) = tick {
                    sink.add_line(*center, *tick, *color);
                }
            }
            Gizmo::Polygon { points, color } => {
                if points.len() < 3 {
                    return;
                }
                for i in 1..points.len() - 1 {
                    sink.add_triangle(points[0], points[i], points[i + 1], *color);
                }
            }
        }
    }
}

/// Closed-form position after `t` seconds of free flight under constant gravity
pub fn projectile_position(start: Vec2, velocity: Vec2, gravity: Vec2, t: f32) -> Vec2 {
    start + velocity * t + gravity * (0.5 * t * t)
}

/// Circle markers along the analytic path of a body launched from `start`
///
/// One marker every `step` seconds from launch up to and including
/// `duration`, so a simulated launch can be compared against the exact
/// trajectory by eye. Returns nothing for a non-positive step or a negative
/// duration.
pub fn projectile_path(
    start: Vec2,
    angle: f32,
    speed: f32,
    gravity: Vec2,
    duration: f32,
    step: f32,
) -> Vec<Gizmo> {
    if !(step > 0.0 && duration >= 0.0 && duration.is_finite()) {
        return Vec::new();
    }

    let velocity = Vec2::from_angle(angle) * speed;
    // Tolerate rounding so a duration that is a whole number of steps keeps its last marker
    let markers = (duration / step + 1e-4).floor() as usize;
    (0..=markers)
        .map(|i| Gizmo::Circle {
            center: projectile_position(start, velocity, gravity, i as f32 * step),
            radius: PROJECTILE_MARKER_RADIUS,
            segments: PROJECTILE_MARKER_SEGMENTS,
            tick: None,
            color: Color::YELLOW,
        })
        .collect()
}

/// Receiver for gizmo primitives, implemented by the external renderer
pub trait GizmoSink {
    fn add_line(&mut self, start: Vec2, end: Vec2, color: Color);
    fn add_circle(&mut self, center: Vec2, radius: f32, segments: u32, color: Color);
    fn add_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color);
}
