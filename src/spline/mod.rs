//! Hermite spline module
//!
//! Piecewise-cubic curves from control points and tangents, used both for
//! authored paths and for procedurally generated build trajectories.

pub mod hermite;

pub use hermite::{ArcLengthTable, HermiteSpline};

use glam::Vec3;

/// The authored figure-eight path: two stacked loops around `center`,
/// sized by `radius`, traced top loop first. Drives the demo target.
pub fn figure_eight(center: Vec3, radius: f32) -> HermiteSpline {
    let (cx, cy, z) = (center.x, center.y, center.z);
    let r = radius;
    let mut path = HermiteSpline::new();

    path.add_point(Vec3::new(cx - r, cy, z), Vec3::new(0.0, 10.0, 0.0));
    path.add_point(Vec3::new(cx, cy + r, z), Vec3::new(10.0, 0.0, 0.0));
    path.add_point(Vec3::new(cx + r, cy, z), Vec3::new(0.0, -10.0, 0.0));
    path.add_point(Vec3::new(cx, cy - r, z), Vec3::new(-10.0, 0.0, 0.0));
    path.add_point(Vec3::new(cx - r, cy - 1.9 * r, z), Vec3::new(0.0, -10.0, 0.0));
    path.add_point(Vec3::new(cx, cy - 3.0 * r, z), Vec3::new(10.0, 0.0, 0.0));
    path.add_point(Vec3::new(cx + r, cy - 1.9 * r, z), Vec3::new(0.0, 10.0, 0.0));
    path.add_point(Vec3::new(cx, cy - r, z), Vec3::new(-10.0, 0.0, 0.0));
    path.add_point(Vec3::new(cx - r, cy, z), Vec3::new(0.0, 10.0, 0.0));
    path.add_point(Vec3::new(cx - r, cy, z), Vec3::new(0.0, 10.0, 0.0));

    path
}
