use glam::Vec3;
use rand::Rng;

/// Axis-aligned rectangle in the ground (XZ) plane.
///
/// Used as the spatial gate for the build animation and as the sampling
/// region for piece start positions. Containment is an explicit per-axis
/// test on x and z; the y coordinate is ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundRect {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl GroundRect {
    /// Bounds are normalized so a swapped min/max pair still forms a
    /// valid rectangle.
    pub fn new(min_x: f32, max_x: f32, min_z: f32, max_z: f32) -> Self {
        Self {
            min_x: min_x.min(max_x),
            max_x: min_x.max(max_x),
            min_z: min_z.min(max_z),
            max_z: min_z.max(max_z),
        }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        self.min_x <= point.x
            && point.x <= self.max_x
            && self.min_z <= point.z
            && point.z <= self.max_z
    }

    /// Center of the rectangle, on the ground plane.
    pub fn center(&self) -> Vec3 {
        Vec3::new(
            (self.min_x + self.max_x) * 0.5,
            0.0,
            (self.min_z + self.max_z) * 0.5,
        )
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn depth(&self) -> f32 {
        self.max_z - self.min_z
    }

    /// Uniform sample of an interior point, on the ground plane.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Vec3 {
        Vec3::new(
            rng.gen_range(self.min_x..=self.max_x),
            0.0,
            rng.gen_range(self.min_z..=self.max_z),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn contains_is_a_full_rectangle_test() {
        let rect = GroundRect::new(-2.0, 2.0, -3.0, 3.0);

        assert!(rect.contains(Vec3::new(0.0, 5.0, 0.0)));
        assert!(rect.contains(Vec3::new(-2.0, 0.0, 3.0)));

        // each side must be able to reject on its own
        assert!(!rect.contains(Vec3::new(-2.1, 0.0, 0.0)));
        assert!(!rect.contains(Vec3::new(2.1, 0.0, 0.0)));
        assert!(!rect.contains(Vec3::new(0.0, 0.0, -3.1)));
        assert!(!rect.contains(Vec3::new(0.0, 0.0, 3.1)));
    }

    #[test]
    fn swapped_bounds_are_normalized() {
        let rect = GroundRect::new(2.0, -2.0, 3.0, -3.0);
        assert!(rect.contains(Vec3::ZERO));
        assert_eq!(rect.width(), 4.0);
        assert_eq!(rect.depth(), 6.0);
    }

    #[test]
    fn samples_stay_inside_on_the_ground() {
        let rect = GroundRect::new(-5.0, 5.0, 1.0, 4.0);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            let p = rect.sample(&mut rng);
            assert!(rect.contains(p));
            assert_eq!(p.y, 0.0);
        }
    }

    #[test]
    fn center_is_on_the_ground() {
        let rect = GroundRect::new(0.0, 4.0, -2.0, 2.0);
        assert_eq!(rect.center(), Vec3::new(2.0, 0.0, 0.0));
    }
}
