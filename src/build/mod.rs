//! Build animation module
//!
//! A state machine that staggers many independent pieces along
//! procedurally generated, non-overlapping spline paths, gated by a
//! ground-plane containment rectangle and a build-request signal.

pub mod animator;
pub mod piece;

pub use animator::{BuildAnimator, BuildConfig, BuildState};
pub use piece::BuildPiece;
