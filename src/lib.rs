//! # rigkit
//!
//! An animation core for articulated rigs: a kinematic tree of rigid
//! segments connected by parametrized joints, a damped-least-squares IK
//! solver, Hermite spline paths, and a staggered multi-piece build animator.
//!
//! The crate never renders anything. It consumes opaque drawable and
//! material handles from an external scene layer, plus a wall-clock
//! animation time, and hands back world transforms ready for draw calls.
//!
//! ## Features
//! - Kinematic tree with per-joint DOF masks and end effectors
//! - Damped-least-squares IK (finite-difference Jacobian, Tikhonov damping)
//! - Cubic Hermite splines with an approximate arc-length table
//! - Build animator: staggered, spline-driven piece assembly gated by a
//!   containment rectangle and a build-request signal
//!
//! ## Example
//! ```rust,ignore
//! use glam::Vec3;
//! use rigkit::ik::IkSolver;
//! use rigkit::rig::humanoid;
//! use rigkit::{DrawableHandle, MaterialHandle};
//!
//! let mut rig = humanoid(DrawableHandle(0), DrawableHandle(1), MaterialHandle(0));
//! let solver = IkSolver::default();
//! let report = solver.solve(&mut rig, Vec3::new(3.0, 7.0, -0.8));
//! println!("converged: {}, residual: {}", report.converged, report.residual);
//!
//! let pose = rig.evaluate();
//! for (drawable, material, world) in rig.draw_list(&pose) {
//!     // hand the triple to the renderer
//! }
//! ```

pub mod build;
pub mod handles;
pub mod ik;
pub mod math;
pub mod rig;
pub mod spline;

pub use build::{BuildAnimator, BuildConfig, BuildPiece, BuildState};
pub use handles::{DrawableHandle, MaterialHandle};
pub use ik::{IkConfig, IkSolver, SolveReport};
pub use math::GroundRect;
pub use rig::{humanoid, DofMask, Joint, KinematicTree, RigBuilder, RigPose, Segment};
pub use spline::{figure_eight, ArcLengthTable, HermiteSpline};
