use glam::{Mat4, Vec3};
use rand::Rng;

use super::piece::BuildPiece;
use crate::handles::{DrawableHandle, MaterialHandle};
use crate::math::GroundRect;
use crate::spline::HermiteSpline;

/// Lifecycle of a buildable object.
///
/// `Built` is terminal: a fully assembled object never un-builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    Unbuilt,
    Building,
    Built,
}

/// Construction-time animation parameters.
#[derive(Debug, Clone, Copy)]
pub struct BuildConfig {
    /// Total build time in seconds, first piece launch to last piece
    /// landing.
    pub duration: f32,
    /// Fraction of `duration` spread across the piece start times.
    pub stagger_fraction: f32,
    /// Scales the path tangents derived from the displaced midpoint.
    pub bend_factor: f32,
    /// Minimum pairwise distance between sampled start positions.
    pub min_start_distance: f32,
    /// Rejection-sampling attempt budget per piece.
    pub max_sample_attempts: u32,
    /// Containment rectangle: gates the build and bounds start sampling.
    pub bounds: GroundRect,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            duration: 1.5,
            stagger_fraction: 0.7,
            bend_factor: 1.5,
            min_start_distance: 1.0,
            max_sample_attempts: 32,
            bounds: GroundRect::new(-10.0, 10.0, -10.0, 10.0),
        }
    }
}

/// Staggers a collection of pieces along individually generated spline
/// paths from scattered start positions to their authored rest positions.
///
/// Paths are generated once at construction. Per frame, `update` runs the
/// state transition first, then the fraction update; transforms are read
/// afterwards through [`draw_list`](Self::draw_list).
#[derive(Debug, Clone)]
pub struct BuildAnimator {
    config: BuildConfig,
    pieces: Vec<BuildPiece>,
    state: BuildState,
    rate: f32,
    last_time: Option<f32>,
    fallback_count: u32,
}

impl BuildAnimator {
    pub fn new(config: BuildConfig, pieces: Vec<BuildPiece>) -> Self {
        Self::with_rng(config, pieces, &mut rand::thread_rng())
    }

    /// Builds the animator with a caller-supplied generator, so start
    /// sampling and path shapes are reproducible.
    pub fn with_rng<R: Rng>(config: BuildConfig, mut pieces: Vec<BuildPiece>, rng: &mut R) -> Self {
        let mut fallback_count = 0;
        let mut starts: Vec<Vec3> = Vec::with_capacity(pieces.len());

        for piece in &mut pieces {
            let end = piece.end_position();
            let start = sample_start(&config, &starts, rng, &mut fallback_count, piece.name());
            starts.push(start);

            piece.path = flight_path(start, end, config.bend_factor, rng);
            piece.start = Mat4::from_translation(start - end) * piece.rest_transform();
            piece.fraction = 0.0;
        }

        // the last-starting piece still gets its full travel time inside
        // the configured duration
        let travel = config.duration * (1.0 - config.stagger_fraction);
        let rate = 1.0 / travel.max(1e-4);

        Self {
            config,
            pieces,
            state: BuildState::Unbuilt,
            rate,
            last_time: None,
            fallback_count,
        }
    }

    pub fn state(&self) -> BuildState {
        self.state
    }

    pub fn pieces(&self) -> &[BuildPiece] {
        &self.pieces
    }

    pub fn fractions(&self) -> impl Iterator<Item = f32> + '_ {
        self.pieces.iter().map(|p| p.fraction())
    }

    /// How many pieces fell back to the rectangle center because rejection
    /// sampling exhausted its attempt budget. Non-zero means start
    /// positions may overlap.
    pub fn fallback_count(&self) -> u32 {
        self.fallback_count
    }

    /// Advances the state machine and every piece's build fraction.
    ///
    /// `now_seconds` is the external wall-clock animation time;
    /// `query_position` is the position tested against the containment
    /// rectangle (typically the controllable character).
    pub fn update(&mut self, now_seconds: f32, build_requested: bool, query_position: Vec3) {
        let dt = match self.last_time {
            Some(previous) => (now_seconds - previous).max(0.0),
            None => 0.0,
        };
        self.last_time = Some(now_seconds);

        let gated = self.config.bounds.contains(query_position) && build_requested;

        // transitions run before the fraction update
        match self.state {
            BuildState::Unbuilt => {
                if gated {
                    self.begin_building(now_seconds);
                }
            }
            BuildState::Building => {
                if !gated {
                    log::debug!("build aborted, pieces retreating");
                    self.state = BuildState::Unbuilt;
                } else if self.pieces.iter().all(|p| p.fraction >= 1.0) {
                    log::debug!("build complete");
                    self.state = BuildState::Built;
                }
            }
            BuildState::Built => {}
        }

        if self.state == BuildState::Built {
            return;
        }

        let direction = if self.state == BuildState::Building {
            1.0
        } else {
            -1.0
        };
        for piece in &mut self.pieces {
            if now_seconds >= piece.stagger_start {
                piece.fraction = (piece.fraction + direction * dt * self.rate).clamp(0.0, 1.0);
            }
        }
    }

    fn begin_building(&mut self, now_seconds: f32) {
        log::debug!("build started with {} pieces", self.pieces.len());
        self.state = BuildState::Building;

        let spacing = self.config.stagger_fraction * self.config.duration;
        let count = self.pieces.len();
        for (i, piece) in self.pieces.iter_mut().enumerate() {
            let offset = if count > 1 {
                i as f32 / (count - 1) as f32
            } else {
                0.0
            };
            piece.stagger_start = now_seconds + offset * spacing;
        }
    }

    /// Per-piece draw triples at the current fractions.
    pub fn draw_list(
        &self,
    ) -> impl Iterator<Item = (DrawableHandle, MaterialHandle, Mat4)> + '_ {
        self.pieces
            .iter()
            .map(|p| (p.drawable(), p.material(), p.current_transform()))
    }
}

/// Rejection-samples a start position inside the bounds, keeping at least
/// `min_start_distance` from all previously chosen starts. Falls back to
/// the rectangle center when the attempt budget runs out; the fallback is
/// logged and counted since overlapping pieces degrade the visual.
fn sample_start<R: Rng>(
    config: &BuildConfig,
    taken: &[Vec3],
    rng: &mut R,
    fallback_count: &mut u32,
    piece_name: &str,
) -> Vec3 {
    for _ in 0..config.max_sample_attempts {
        let candidate = config.bounds.sample(rng);
        let clear = taken
            .iter()
            .all(|p| p.distance(candidate) >= config.min_start_distance);
        if clear {
            return candidate;
        }
    }

    *fallback_count += 1;
    log::warn!(
        "start sampling exhausted {} attempts for piece '{}', using rectangle center",
        config.max_sample_attempts,
        piece_name
    );
    config.bounds.center()
}

/// Two-point Hermite path from start to end. The control point is the
/// midpoint with one randomly chosen axis pushed further negative, which
/// arcs the flight up and off to the side; tangents aim through it, scaled
/// by the bend factor.
fn flight_path<R: Rng>(start: Vec3, end: Vec3, bend_factor: f32, rng: &mut R) -> HermiteSpline {
    let mut control = (start + end) * 0.5;
    let span = start.distance(end).max(1.0);
    let axis = rng.gen_range(0..3);
    control[axis] -= rng.gen_range(0.25..0.75) * span;

    let mut path = HermiteSpline::new();
    path.add_point(start, (control - start) * bend_factor);
    path.add_point(end, (end - control) * bend_factor);
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pieces(n: usize) -> Vec<BuildPiece> {
        (0..n)
            .map(|i| {
                BuildPiece::new(
                    format!("piece_{i}"),
                    DrawableHandle(i as u32),
                    MaterialHandle(0),
                    Mat4::from_translation(Vec3::new(i as f32, 3.0, 0.0)),
                )
            })
            .collect()
    }

    fn animator(n: usize, seed: u64) -> BuildAnimator {
        let mut rng = StdRng::seed_from_u64(seed);
        BuildAnimator::with_rng(BuildConfig::default(), pieces(n), &mut rng)
    }

    const INSIDE: Vec3 = Vec3::ZERO;
    const OUTSIDE: Vec3 = Vec3::new(100.0, 0.0, 0.0);

    #[test]
    fn unbuilt_stays_put_without_the_gate() {
        let mut anim = animator(3, 1);

        anim.update(0.0, true, OUTSIDE);
        anim.update(0.1, false, INSIDE);
        anim.update(0.2, false, OUTSIDE);

        assert_eq!(anim.state(), BuildState::Unbuilt);
        assert!(anim.fractions().all(|f| f == 0.0));
    }

    #[test]
    fn gate_and_request_start_a_build() {
        let mut anim = animator(3, 2);

        anim.update(0.0, true, INSIDE);
        assert_eq!(anim.state(), BuildState::Building);
        assert!(anim.fractions().all(|f| f == 0.0));
    }

    #[test]
    fn stagger_schedule_matches_the_spacing() {
        // duration 1.5s, stagger fraction 0.7 => 1.05s of spacing
        let mut anim = animator(3, 3);
        anim.update(0.0, true, INSIDE);

        let starts: Vec<f32> = anim.pieces().iter().map(|p| p.stagger_start()).collect();
        assert_eq!(starts, vec![0.0, 0.525, 1.05]);
    }

    #[test]
    fn single_piece_starts_immediately() {
        let mut anim = animator(1, 4);
        anim.update(2.0, true, INSIDE);
        assert_eq!(anim.pieces()[0].stagger_start(), 2.0);
    }

    #[test]
    fn fractions_rise_monotonically_until_built() {
        let mut anim = animator(3, 5);
        let mut previous = vec![0.0; 3];

        let mut t = 0.0;
        for _ in 0..80 {
            anim.update(t, true, INSIDE);
            let current: Vec<f32> = anim.fractions().collect();
            for (new, old) in current.iter().zip(&previous) {
                assert!(new >= old);
                assert!((0.0..=1.0).contains(new));
            }
            previous = current;
            t += 0.05;
        }

        assert_eq!(anim.state(), BuildState::Built);
        assert!(anim.fractions().all(|f| f == 1.0));
    }

    #[test]
    fn built_is_terminal() {
        let mut anim = animator(2, 6);
        let mut t = 0.0;
        while anim.state() != BuildState::Built && t < 10.0 {
            anim.update(t, true, INSIDE);
            t += 0.05;
        }
        assert_eq!(anim.state(), BuildState::Built);

        anim.update(t + 1.0, false, OUTSIDE);
        assert_eq!(anim.state(), BuildState::Built);
        assert!(anim.fractions().all(|f| f == 1.0));
    }

    #[test]
    fn dropping_the_gate_retreats_the_pieces() {
        let mut anim = animator(2, 7);
        anim.update(0.0, true, INSIDE);
        anim.update(0.2, true, INSIDE);
        let mid: Vec<f32> = anim.fractions().collect();
        assert!(mid[0] > 0.0);

        anim.update(0.3, false, INSIDE);
        assert_eq!(anim.state(), BuildState::Unbuilt);
        anim.update(0.4, false, INSIDE);
        let after: Vec<f32> = anim.fractions().collect();
        assert!(after[0] < mid[0]);
        assert!(after.iter().all(|f| *f >= 0.0));
    }

    #[test]
    fn start_positions_keep_their_distance() {
        let config = BuildConfig {
            min_start_distance: 0.5,
            bounds: GroundRect::new(-10.0, 10.0, -10.0, 10.0),
            ..BuildConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(8);
        let anim = BuildAnimator::with_rng(config, pieces(8), &mut rng);

        assert_eq!(anim.fallback_count(), 0);
        let starts: Vec<Vec3> = anim
            .pieces()
            .iter()
            .map(|p| p.start_transform().w_axis.truncate())
            .collect();
        for i in 0..starts.len() {
            for j in (i + 1)..starts.len() {
                assert!(starts[i].distance(starts[j]) >= 0.5);
            }
        }
    }

    #[test]
    fn exhausted_sampling_falls_back_to_the_center() {
        // rectangle far too small for the requested spacing
        let config = BuildConfig {
            min_start_distance: 5.0,
            max_sample_attempts: 8,
            bounds: GroundRect::new(-0.5, 0.5, -0.5, 0.5),
            ..BuildConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(9);
        let anim = BuildAnimator::with_rng(config, pieces(4), &mut rng);

        assert!(anim.fallback_count() > 0);
        let center = config.bounds.center();
        let fell_back = anim.pieces().iter().any(|p| {
            p.path().points()[0].abs_diff_eq(center, 1e-6)
        });
        assert!(fell_back);
    }

    #[test]
    fn paths_run_from_start_to_rest_position() {
        let anim = animator(3, 10);
        for piece in anim.pieces() {
            let path_start = piece.path().position(0.0);
            let path_end = piece.path().position(1.0);
            assert!(path_start.abs_diff_eq(piece.start_transform().w_axis.truncate(), 1e-5));
            assert!(path_end.abs_diff_eq(piece.end_position(), 1e-5));
        }
    }

    #[test]
    fn draw_list_recomputes_absolute_offsets() {
        let mut anim = animator(2, 11);
        let mut t = 0.0;
        while anim.state() != BuildState::Built && t < 10.0 {
            anim.update(t, true, INSIDE);
            t += 0.05;
        }

        for ((_, _, world), piece) in anim.draw_list().zip(anim.pieces()) {
            assert!(world.abs_diff_eq(piece.rest_transform(), 1e-4));
        }
    }
}
