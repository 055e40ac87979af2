//! Math utilities module
//!
//! Provides convenient re-exports from glam and the ground-plane
//! containment rectangle used to gate the build animation.

mod rect;

pub use rect::GroundRect;

// Re-export commonly used glam types
pub use glam::{Mat3, Mat4, Quat, Vec3, Vec4};
