use glam::{Mat4, Vec4};

use super::segment::SegmentId;

/// Stable index of a joint inside its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JointId(pub(crate) usize);

impl JointId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Enabled rotational axes of a joint.
///
/// Each enabled axis contributes one scalar to the tree's global angle
/// vector, in x, y, z order within the joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DofMask {
    pub rx: bool,
    pub ry: bool,
    pub rz: bool,
}

impl DofMask {
    pub const NONE: Self = Self {
        rx: false,
        ry: false,
        rz: false,
    };

    pub const ALL: Self = Self {
        rx: true,
        ry: true,
        rz: true,
    };

    pub fn new(rx: bool, ry: bool, rz: bool) -> Self {
        Self { rx, ry, rz }
    }

    pub fn count(&self) -> usize {
        self.rx as usize + self.ry as usize + self.rz as usize
    }
}

/// A directed edge from a parent segment to a child segment.
///
/// `location` is the fixed rest offset from the parent segment's frame;
/// `articulation` is rebuilt from the joint's angles and is identity when
/// unposed. A joint may carry one end effector, a fixed point in its local
/// frame whose world position is recomputed on every tree evaluation.
#[derive(Debug, Clone)]
pub struct Joint {
    name: String,
    location: Mat4,
    pub(crate) articulation: Mat4,
    dof: DofMask,
    pub(crate) dof_offset: usize,
    end_effector: Option<Vec4>,
    pub(crate) parent: Option<SegmentId>,
    pub(crate) child: SegmentId,
}

impl Joint {
    pub fn new(name: impl Into<String>, location: Mat4) -> Self {
        Self {
            name: name.into(),
            location,
            articulation: Mat4::IDENTITY,
            dof: DofMask::NONE,
            dof_offset: 0,
            end_effector: None,
            parent: None,
            child: SegmentId(0),
        }
    }

    pub fn with_dof(mut self, dof: DofMask) -> Self {
        self.dof = dof;
        self
    }

    pub fn with_end_effector(mut self, local: Vec4) -> Self {
        self.end_effector = Some(local);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> Mat4 {
        self.location
    }

    pub fn articulation(&self) -> Mat4 {
        self.articulation
    }

    pub fn dof(&self) -> DofMask {
        self.dof
    }

    /// Start of this joint's range in the tree's global angle vector.
    pub fn dof_offset(&self) -> usize {
        self.dof_offset
    }

    pub fn end_effector(&self) -> Option<Vec4> {
        self.end_effector
    }

    pub fn parent(&self) -> Option<SegmentId> {
        self.parent
    }

    pub fn child(&self) -> SegmentId {
        self.child
    }

    /// Rebuilds the articulation matrix from this joint's angle slice.
    ///
    /// Enabled axes are pre-multiplied in x, then y, then z order, so the
    /// composed matrix is Rz * Ry * Rx.
    pub(crate) fn apply_angles(&mut self, angles: &[f32]) {
        let mut m = Mat4::IDENTITY;
        let mut idx = 0;
        if self.dof.rx {
            m = Mat4::from_rotation_x(angles[idx]) * m;
            idx += 1;
        }
        if self.dof.ry {
            m = Mat4::from_rotation_y(angles[idx]) * m;
            idx += 1;
        }
        if self.dof.rz {
            m = Mat4::from_rotation_z(angles[idx]) * m;
        }
        self.articulation = m;
    }
}
