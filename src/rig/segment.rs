use glam::Mat4;

use super::joint::JointId;
use crate::handles::{DrawableHandle, MaterialHandle};

/// Stable index of a segment inside its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentId(pub(crate) usize);

impl SegmentId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A rigid body part: a drawable shape with a local transform relative to
/// its parent joint's frame.
///
/// Child joint order is significant: it is the traversal and draw order.
#[derive(Debug, Clone)]
pub struct Segment {
    name: String,
    drawable: DrawableHandle,
    material: MaterialHandle,
    local: Mat4,
    pub(crate) children: Vec<JointId>,
}

impl Segment {
    pub fn new(
        name: impl Into<String>,
        drawable: DrawableHandle,
        material: MaterialHandle,
        local: Mat4,
    ) -> Self {
        Self {
            name: name.into(),
            drawable,
            material,
            local,
            children: Vec::new(),
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

    pub fn local(&self) -> Mat4 {
        self.local
    }

    pub fn child_joints(&self) -> &[JointId] {
        &self.children
    }
}
