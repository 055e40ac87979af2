//! Opaque handles into the external scene layer.
//!
//! The renderer owns the actual shape and material data; the animation core
//! only associates handles with transforms and hands them back at draw time.

/// Identifies a drawable shape owned by the external renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawableHandle(pub u32);

/// Identifies a material owned by the external renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialHandle(pub u32);
