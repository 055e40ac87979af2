//! Headless demo: the humanoid's right hand traces a figure-eight path via
//! IK while a small set of car pieces assembles once the avatar walks into
//! the build area and requests a build.
//!
//! Run with `RUST_LOG=debug cargo run --example figure_eight` to see state
//! transitions and sampling fallbacks.

use glam::{Mat4, Vec3};
use rigkit::build::{BuildAnimator, BuildConfig, BuildPiece};
use rigkit::ik::{IkConfig, IkSolver};
use rigkit::math::GroundRect;
use rigkit::rig::humanoid;
use rigkit::spline::figure_eight;
use rigkit::{DrawableHandle, MaterialHandle};

fn car_pieces() -> Vec<BuildPiece> {
    // handles 10.. are minted by the (absent) renderer for the car shapes
    let material = MaterialHandle(1);
    [
        ("base", Vec3::new(0.0, 1.0, -4.0)),
        ("windshield", Vec3::new(0.0, 1.6, -4.3)),
        ("top_back", Vec3::new(0.0, 1.6, -3.6)),
        ("front_wheels", Vec3::new(0.0, 0.5, -4.6)),
        ("back_wheels", Vec3::new(0.0, 0.5, -3.4)),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (name, position))| {
        BuildPiece::new(
            name,
            DrawableHandle(10 + i as u32),
            material,
            Mat4::from_translation(position),
        )
    })
    .collect()
}

fn main() {
    env_logger::init();

    let mut rig = humanoid(DrawableHandle(0), DrawableHandle(1), MaterialHandle(0));
    let path = figure_eight(Vec3::new(3.0, 7.0, -0.8), 1.0);
    let solver = IkSolver::new(IkConfig::default());

    let config = BuildConfig {
        bounds: GroundRect::new(-8.0, 8.0, -8.0, 8.0),
        ..BuildConfig::default()
    };
    let mut animator = BuildAnimator::new(config, car_pieces());
    if animator.fallback_count() > 0 {
        log::warn!(
            "{} piece(s) share the fallback start position",
            animator.fallback_count()
        );
    }

    let dt = 1.0 / 60.0;
    for frame in 0..600u32 {
        let t = frame as f32 * dt;

        // the hand chases the figure-eight, one lap every five seconds
        let target = path.position((t / 5.0) % 1.0);
        let report = solver.solve(&mut rig, target);

        // the avatar wanders into the build area after a second and holds
        // the build button
        let avatar = if t < 1.0 {
            Vec3::new(50.0, 0.0, 0.0)
        } else {
            Vec3::ZERO
        };
        animator.update(t, t >= 1.0, avatar);

        let pose = rig.evaluate();
        let draw_calls = rig.draw_list(&pose).count() + animator.draw_list().count();

        if frame % 60 == 0 {
            println!(
                "t={t:5.2}s ik_residual={:.4} ik_iters={:3} build={:?} fractions={:?} draws={draw_calls}",
                report.residual,
                report.iterations,
                animator.state(),
                animator.fractions().map(|f| (f * 100.0).round() / 100.0).collect::<Vec<_>>(),
            );
        }
    }
}
