use glam::{Mat4, Vec3};

use super::joint::{Joint, JointId};
use super::segment::{Segment, SegmentId};
use crate::handles::{DrawableHandle, MaterialHandle};

/// World-space result of one tree evaluation.
///
/// Transforms are indexed by the ids handed out at build time; the draw
/// order is the depth-first traversal order of the tree.
#[derive(Debug, Clone, Default)]
pub struct RigPose {
    pub(crate) joint_world: Vec<Mat4>,
    pub(crate) segment_world: Vec<Mat4>,
    pub(crate) draw_order: Vec<SegmentId>,
    pub(crate) end_effectors: Vec<(JointId, Vec3)>,
}

impl RigPose {
    pub fn joint_world(&self, id: JointId) -> Mat4 {
        self.joint_world.get(id.0).copied().unwrap_or(Mat4::IDENTITY)
    }

    pub fn segment_world(&self, id: SegmentId) -> Mat4 {
        self.segment_world
            .get(id.0)
            .copied()
            .unwrap_or(Mat4::IDENTITY)
    }

    pub fn draw_order(&self) -> &[SegmentId] {
        &self.draw_order
    }

    pub fn end_effectors(&self) -> &[(JointId, Vec3)] {
        &self.end_effectors
    }
}

/// Builds a [`KinematicTree`] one joint/segment pair at a time.
///
/// The structure is frozen by [`build`](RigBuilder::build): DOF offsets are
/// assigned in joint insertion order and the zero pose is applied. Cycles
/// are impossible by construction since every attachment names an existing
/// parent segment.
#[derive(Debug, Default)]
pub struct RigBuilder {
    segments: Vec<Segment>,
    joints: Vec<Joint>,
}

impl RigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the root joint and its child segment. Must be the first call.
    pub fn root(&mut self, joint: Joint, segment: Segment) -> SegmentId {
        debug_assert!(self.joints.is_empty(), "root must be added first");
        self.push(None, joint, segment)
    }

    /// Attaches a new joint/segment pair under `parent`, appending the
    /// joint to the parent's child list (traversal and draw order).
    pub fn attach(&mut self, parent: SegmentId, joint: Joint, segment: Segment) -> SegmentId {
        let id = self.push(Some(parent), joint, segment);
        let joint_id = JointId(self.joints.len() - 1);
        if let Some(parent_segment) = self.segments.get_mut(parent.0) {
            parent_segment.children.push(joint_id);
        }
        id
    }

    fn push(&mut self, parent: Option<SegmentId>, mut joint: Joint, segment: Segment) -> SegmentId {
        let segment_id = SegmentId(self.segments.len());
        joint.parent = parent;
        joint.child = segment_id;
        self.joints.push(joint);
        self.segments.push(segment);
        segment_id
    }

    pub fn build(mut self) -> KinematicTree {
        let mut offset = 0;
        for joint in &mut self.joints {
            joint.dof_offset = offset;
            offset += joint.dof().count();
        }

        let mut tree = KinematicTree {
            segments: self.segments,
            joints: self.joints,
            root: JointId(0),
            angles: vec![0.0; offset],
        };
        tree.apply_angles();
        tree
    }
}

/// A rooted, acyclic hierarchy of segments and joints with a flat global
/// angle vector.
///
/// Built once, articulated every frame; never structurally modified at
/// runtime.
#[derive(Debug, Clone)]
pub struct KinematicTree {
    segments: Vec<Segment>,
    joints: Vec<Joint>,
    root: JointId,
    angles: Vec<f32>,
}

impl KinematicTree {
    pub fn builder() -> RigBuilder {
        RigBuilder::new()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn segment(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.get(id.0)
    }

    pub fn joint(&self, id: JointId) -> Option<&Joint> {
        self.joints.get(id.0)
    }

    pub fn segment_id(&self, name: &str) -> Option<SegmentId> {
        self.segments
            .iter()
            .position(|s| s.name() == name)
            .map(SegmentId)
    }

    pub fn joint_id(&self, name: &str) -> Option<JointId> {
        self.joints
            .iter()
            .position(|j| j.name() == name)
            .map(JointId)
    }

    pub fn set_material(&mut self, id: SegmentId, material: MaterialHandle) {
        if let Some(segment) = self.segments.get_mut(id.0) {
            segment.set_material(material);
        }
    }

    /// Total number of scalar degrees of freedom across all joints.
    pub fn dof_count(&self) -> usize {
        self.angles.len()
    }

    pub fn angles(&self) -> &[f32] {
        &self.angles
    }

    /// Mutable access to the global angle vector. Callers must follow up
    /// with [`apply_angles`](Self::apply_angles) before the next
    /// evaluation.
    pub fn angles_mut(&mut self) -> &mut [f32] {
        &mut self.angles
    }

    pub fn set_angles(&mut self, angles: &[f32]) {
        let n = self.angles.len().min(angles.len());
        self.angles[..n].copy_from_slice(&angles[..n]);
        self.apply_angles();
    }

    /// Rebuilds every joint's articulation matrix from the angle vector.
    pub fn apply_angles(&mut self) {
        let angles = &self.angles;
        for joint in &mut self.joints {
            let start = joint.dof_offset;
            let end = start + joint.dof().count();
            joint.apply_angles(&angles[start..end]);
        }
    }

    /// Evaluates the full tree: world transforms for every joint and
    /// segment plus end-effector positions, in traversal order.
    ///
    /// Pure with respect to tree state; calling it twice without mutating
    /// angles in between yields identical results.
    pub fn evaluate(&self) -> RigPose {
        let mut pose = RigPose {
            joint_world: vec![Mat4::IDENTITY; self.joints.len()],
            segment_world: vec![Mat4::IDENTITY; self.segments.len()],
            draw_order: Vec::with_capacity(self.segments.len()),
            end_effectors: Vec::new(),
        };

        if self.joints.is_empty() {
            return pose;
        }

        self.walk(
            self.root,
            Mat4::IDENTITY,
            &mut |joint_id, joint_world, segment_id, segment_world, effector| {
                pose.joint_world[joint_id.0] = joint_world;
                pose.segment_world[segment_id.0] = segment_world;
                pose.draw_order.push(segment_id);
                if let Some(p) = effector {
                    pose.end_effectors.push((joint_id, p));
                }
            },
        );
        pose
    }

    /// World position of the tree's end effector, or `None` when no joint
    /// declares one. When several exist, the last in traversal order wins.
    pub fn end_effector_position(&self) -> Option<Vec3> {
        if self.joints.is_empty() {
            return None;
        }
        let mut found = None;
        self.walk(self.root, Mat4::IDENTITY, &mut |_, _, _, _, effector| {
            if let Some(p) = effector {
                found = Some(p);
            }
        });
        found
    }

    /// Per-segment draw triples for the external renderer, in draw order.
    pub fn draw_list<'a>(
        &'a self,
        pose: &'a RigPose,
    ) -> impl Iterator<Item = (DrawableHandle, MaterialHandle, Mat4)> + 'a {
        pose.draw_order.iter().map(move |&id| {
            let segment = &self.segments[id.0];
            (segment.drawable(), segment.material(), pose.segment_world(id))
        })
    }

    // Depth-first pre-order walk. Each joint's world pose is the running
    // transform times location times articulation; the child segment's
    // local transform applies to the segment only. Child joints restart
    // from the joint pose, so sibling subtrees never see each other's
    // segment-local offset.
    fn walk<F>(&self, joint_id: JointId, parent_world: Mat4, visit: &mut F)
    where
        F: FnMut(JointId, Mat4, SegmentId, Mat4, Option<Vec3>),
    {
        let joint = &self.joints[joint_id.0];
        let joint_world = parent_world * joint.location() * joint.articulation();
        let effector = joint
            .end_effector()
            .map(|local| (joint_world * local).truncate());

        let segment_id = joint.child();
        let segment = &self.segments[segment_id.0];
        let segment_world = joint_world * segment.local();

        visit(joint_id, joint_world, segment_id, segment_world, effector);

        for &child in segment.child_joints() {
            self.walk(child, joint_world, visit);
        }
    }
}
