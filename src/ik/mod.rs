//! Inverse kinematics module
//!
//! Damped-least-squares solver driving a kinematic tree's end effector
//! toward a world-space target.

pub mod solver;

pub use solver::{IkConfig, IkSolver, SolveReport};
