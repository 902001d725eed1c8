//! Logging gizmo renderer
//!
//! Headless stand-in for a debug renderer: counts the primitives it receives
//! each frame and traces them through `log`.

use log::{debug, trace};
use phys2d_math::Vec2;
use phys2d_physics::{Color, Gizmo, GizmoSink, PhysicsWorld};

/// Primitive counts for one drawn frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GizmoStats {
    pub lines: usize,
    pub circles: usize,
    pub triangles: usize,
}

impl GizmoStats {
    pub fn total(&self) -> usize {
        self.lines + self.circles + self.triangles
    }
}

/// A [`GizmoSink`] that logs every primitive
#[derive(Default)]
pub struct GizmoLogger {
    frame: GizmoStats,
    frames_drawn: u64,
}

impl GizmoLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw every body in `world` plus `overlays` as one frame and return its
    /// primitive counts
    pub fn draw_frame(&mut self, world: &PhysicsWorld, overlays: &[Gizmo]) -> GizmoStats {
        self.frame = GizmoStats::default();
        world.draw_gizmos(self);
        for overlay in overlays {
            overlay.draw(self);
        }
        self.frames_drawn += 1;
        debug!(
            "Gizmo frame {}: {} lines, {} circles, {} triangles",
            self.frames_drawn, self.frame.lines, self.frame.circles, self.frame.triangles
        );
        self.frame
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }
}

impl GizmoSink for GizmoLogger {
    fn add_line(&mut self, start: Vec2, end: Vec2, color: Color) {
        self.frame.lines += 1;
        trace!("line {:?} -> {:?} {:?}", start, end, color);
    }

    fn add_circle(&mut self, center: Vec2, radius: f32, segments: u32, color: Color) {
        self.frame.circles += 1;
        trace!("circle {:?} r={} ({} segments) {:?}", center, radius, segments, color);
    }

    fn add_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color) {
        self.frame.triangles += 1;
        trace!("triangle {:?} {:?} {:?} {:?}", a, b, c, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phys2d_physics::RigidBody2D;

    #[test]
    fn test_empty_world_draws_nothing() {
        let mut logger = GizmoLogger::new();
        let stats = logger.draw_frame(&PhysicsWorld::new(), &[]);
        assert_eq!(stats.total(), 0);
        assert_eq!(logger.frames_drawn(), 1);
    }

    #[test]
    fn test_primitive_counts_per_shape() {
        let mut world = PhysicsWorld::new();
        world.add_body(RigidBody2D::new_inclined_plane(0.0, 0.0));
        world.add_body(RigidBody2D::new_circle(Vec2::new(0.0, 2.0), 1.0, 1.0));
        world.add_body(RigidBody2D::new_box(Vec2::new(3.0, 2.0), 1.0, 1.0, 1.0));

        let mut logger = GizmoLogger::new();
        let stats = logger.draw_frame(&world, &[]);

        // Plane line plus the circle's orientation tick
        assert_eq!(stats.lines, 2);
        assert_eq!(stats.circles, 1);
        // A box fans into two triangles
        assert_eq!(stats.triangles, 2);
    }

    #[test]
    fn test_counts_reset_between_frames() {
        let mut world = PhysicsWorld::new();
        world.add_body(RigidBody2D::new_circle(Vec2::ZERO, 1.0, 1.0));

        let mut logger = GizmoLogger::new();
        let first = logger.draw_frame(&world, &[]);
        let second = logger.draw_frame(&world, &[]);
        assert_eq!(first, second);
        assert_eq!(logger.frames_drawn(), 2);
    }

    #[test]
    fn test_overlays_are_drawn() {
        let path = phys2d_physics::projectile_path(
            Vec2::ZERO,
            0.5,
            10.0,
            Vec2::new(0.0, -9.81),
            1.0,
            0.5,
        );

        let mut logger = GizmoLogger::new();
        let stats = logger.draw_frame(&PhysicsWorld::new(), &path);

        // Markers at 0, 0.5 and 1 seconds, without orientation ticks
        assert_eq!(stats.circles, 3);
        assert_eq!(stats.lines, 0);
    }
}
