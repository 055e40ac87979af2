use glam::{Mat4, Vec3};

use crate::handles::{DrawableHandle, MaterialHandle};
use crate::spline::HermiteSpline;

/// One rigid piece of a buildable object.
///
/// The authored rest transform places the piece in its final assembled
/// position; the animator generates a start transform and a flight path at
/// construction. The build fraction tracks progress along that path,
/// clamped to [0, 1].
#[derive(Debug, Clone)]
pub struct BuildPiece {
    name: String,
    drawable: DrawableHandle,
    material: MaterialHandle,
    rest: Mat4,
    pub(crate) start: Mat4,
    pub(crate) path: HermiteSpline,
    pub(crate) fraction: f32,
    pub(crate) stagger_start: f32,
}

impl BuildPiece {
    pub fn new(
        name: impl Into<String>,
        drawable: DrawableHandle,
        material: MaterialHandle,
        rest: Mat4,
    ) -> Self {
        Self {
            name: name.into(),
            drawable,
            material,
            rest,
            start: rest,
            path: HermiteSpline::new(),
            fraction: 0.0,
            stagger_start: 0.0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn drawable(&self) -> DrawableHandle {
        self.drawable
    }

    pub fn material(&self) -> MaterialHandle {
        self.material
    }

    pub fn set_material(&mut self, material: MaterialHandle) {
        self.material = material;
    }

    /// The authored final (assembled) transform.
    pub fn rest_transform(&self) -> Mat4 {
        self.rest
    }

    /// The generated start transform (piece at its flight-path origin).
    pub fn start_transform(&self) -> Mat4 {
        self.start
    }

    pub fn path(&self) -> &HermiteSpline {
        &self.path
    }

    /// Progress along the flight path: 0 at the start position, 1 fully
    /// assembled.
    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    /// Absolute time at which this piece begins moving once a build starts.
    pub fn stagger_start(&self) -> f32 {
        self.stagger_start
    }

    /// Translation component of the rest transform; the path's end point.
    pub fn end_position(&self) -> Vec3 {
        self.rest.w_axis.truncate()
    }

    /// World transform at the current fraction: an absolute offset from the
    /// rest transform, recomposed fresh each call. Nothing accumulates
    /// across frames.
    pub fn current_transform(&self) -> Mat4 {
        if self.path.len() < 2 {
            return self.rest;
        }
        let offset = self.path.position(self.fraction) - self.end_position();
        Mat4::from_translation(offset) * self.rest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_position_is_the_rest_translation() {
        let rest = Mat4::from_translation(Vec3::new(2.0, 1.0, -3.0))
            * Mat4::from_scale(Vec3::splat(2.0));
        let piece = BuildPiece::new("p", DrawableHandle(0), MaterialHandle(0), rest);
        assert_eq!(piece.end_position(), Vec3::new(2.0, 1.0, -3.0));
    }

    #[test]
    fn without_a_path_the_rest_transform_is_used() {
        let rest = Mat4::from_translation(Vec3::ONE);
        let piece = BuildPiece::new("p", DrawableHandle(0), MaterialHandle(0), rest);
        assert_eq!(piece.current_transform(), rest);
    }

    #[test]
    fn full_fraction_recovers_the_rest_transform() {
        let rest = Mat4::from_translation(Vec3::new(4.0, 2.0, 0.0));
        let mut piece = BuildPiece::new("p", DrawableHandle(0), MaterialHandle(0), rest);
        piece.path.add_point(Vec3::new(-3.0, 0.0, 1.0), Vec3::Y * 4.0);
        piece.path.add_point(piece.end_position(), Vec3::Y * 4.0);

        piece.fraction = 1.0;
        assert!(piece.current_transform().abs_diff_eq(rest, 1e-5));

        piece.fraction = 0.0;
        let at_start = piece.current_transform().w_axis.truncate();
        assert!(at_start.abs_diff_eq(Vec3::new(-3.0, 0.0, 1.0), 1e-5));
    }
}
