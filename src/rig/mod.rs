//! Kinematic tree module
//!
//! Rigid segments connected by parametrized joints, arena-stored and
//! addressed by stable ids. The tree is built once, articulated through a
//! flat angle vector, and evaluated depth-first every frame.

pub mod humanoid;
pub mod joint;
pub mod segment;
pub mod tree;

pub use humanoid::humanoid;
pub use joint::{DofMask, Joint, JointId};
pub use segment::{Segment, SegmentId};
pub use tree::{KinematicTree, RigBuilder, RigPose};
