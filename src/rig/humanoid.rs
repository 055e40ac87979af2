//! The articulated humanoid figure.
//!
//! Topology and rest transforms for the IK-driven character: a torso root
//! with head, two arm chains, two legs, and a two-piece hat. Only the right
//! arm chain carries degrees of freedom (shoulder x/y/z, elbow x/y, wrist
//! y/z — seven angles total), with the end effector one unit out from the
//! wrist along the hand.

use glam::{Mat4, Vec3, Vec4};

use super::joint::{DofMask, Joint};
use super::segment::Segment;
use super::tree::KinematicTree;
use crate::handles::{DrawableHandle, MaterialHandle};

fn place(translation: Vec3, scale: Vec3) -> Mat4 {
    Mat4::from_translation(translation) * Mat4::from_scale(scale)
}

/// Builds the humanoid rig. `sphere` is used for all body parts, `cube`
/// for the hat pieces; the caller supplies both handles and the material.
pub fn humanoid(
    sphere: DrawableHandle,
    cube: DrawableHandle,
    material: MaterialHandle,
) -> KinematicTree {
    let mut b = KinematicTree::builder();

    let torso = b.root(
        Joint::new("root", Mat4::from_translation(Vec3::new(1.0, 5.6, 2.0))),
        Segment::new("torso", sphere, material, Mat4::from_scale(Vec3::new(0.75, 1.5, 0.75))),
    );

    let head = b.attach(
        torso,
        Joint::new("neck", Mat4::from_translation(Vec3::new(0.0, 2.5, 0.0))),
        Segment::new(
            "head",
            sphere,
            material,
            place(Vec3::new(0.0, -0.5, 0.0), Vec3::splat(0.5)),
        ),
    );

    // right arm: the IK-driven chain
    let r_upper_arm = b.attach(
        torso,
        Joint::new("r_shoulder", Mat4::from_translation(Vec3::new(0.45, 1.25, 0.0)))
            .with_dof(DofMask::ALL),
        Segment::new(
            "r_upper_arm",
            sphere,
            material,
            place(Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 0.25, 0.25)),
        ),
    );
    let r_lower_arm = b.attach(
        r_upper_arm,
        Joint::new("r_elbow", Mat4::from_translation(Vec3::new(2.0, 0.0, 0.0)))
            .with_dof(DofMask::new(true, true, false)),
        Segment::new(
            "r_lower_arm",
            sphere,
            material,
            place(Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 0.25, 0.25)),
        ),
    );
    b.attach(
        r_lower_arm,
        Joint::new("r_wrist", Mat4::from_translation(Vec3::new(2.0, 0.0, 0.0)))
            .with_dof(DofMask::new(false, true, true))
            .with_end_effector(Vec4::new(1.0, 0.0, 0.0, 1.0)),
        Segment::new(
            "r_hand",
            sphere,
            material,
            place(Vec3::new(0.5, 0.0, 0.0), Vec3::new(0.5, 0.3, 0.3)),
        ),
    );

    // left arm, posed but not articulated
    let l_upper_arm = b.attach(
        torso,
        Joint::new("l_shoulder", Mat4::from_translation(Vec3::new(-0.45, 1.25, 0.0))),
        Segment::new(
            "l_upper_arm",
            sphere,
            material,
            place(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.25, 0.25)),
        ),
    );
    let l_lower_arm = b.attach(
        l_upper_arm,
        Joint::new("l_elbow", Mat4::from_translation(Vec3::new(-2.0, 0.0, 0.0))),
        Segment::new(
            "l_lower_arm",
            sphere,
            material,
            place(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.25, 0.25)),
        ),
    );
    b.attach(
        l_lower_arm,
        Joint::new("l_wrist", Mat4::from_translation(Vec3::new(-2.0, 0.0, 0.0))),
        Segment::new(
            "l_hand",
            sphere,
            material,
            place(Vec3::new(-0.5, 0.0, 0.0), Vec3::new(0.5, 0.3, 0.3)),
        ),
    );

    // legs
    let l_upper_leg = b.attach(
        torso,
        Joint::new("l_hip", Mat4::IDENTITY),
        Segment::new(
            "l_upper_leg",
            sphere,
            material,
            place(Vec3::new(-0.3, -2.4, 0.0), Vec3::new(0.25, 1.0, 0.25)),
        ),
    );
    let l_lower_leg = b.attach(
        l_upper_leg,
        Joint::new("l_knee", Mat4::IDENTITY),
        Segment::new(
            "l_lower_leg",
            sphere,
            material,
            place(Vec3::new(-0.3, -4.4, 0.0), Vec3::new(0.25, 1.0, 0.25)),
        ),
    );
    b.attach(
        l_lower_leg,
        Joint::new("l_ankle", Mat4::from_translation(Vec3::new(0.0, 2.5, 0.0))),
        Segment::new(
            "l_foot",
            sphere,
            material,
            place(Vec3::new(-0.3, -8.0, 0.0), Vec3::new(0.3, 0.125, 0.125)),
        ),
    );

    let r_upper_leg = b.attach(
        torso,
        Joint::new("r_hip", Mat4::IDENTITY),
        Segment::new(
            "r_upper_leg",
            sphere,
            material,
            place(Vec3::new(0.3, -2.4, 0.0), Vec3::new(0.25, 1.0, 0.25)),
        ),
    );
    let r_lower_leg = b.attach(
        r_upper_leg,
        Joint::new("r_knee", Mat4::IDENTITY),
        Segment::new(
            "r_lower_leg",
            sphere,
            material,
            place(Vec3::new(0.3, -4.4, 0.0), Vec3::new(0.25, 1.0, 0.25)),
        ),
    );
    b.attach(
        r_lower_leg,
        Joint::new("r_ankle", Mat4::from_translation(Vec3::new(1.0, 2.5, 0.0))),
        Segment::new(
            "r_foot",
            sphere,
            material,
            place(Vec3::new(-0.7, -8.0, 0.0), Vec3::new(0.3, 0.125, 0.125)),
        ),
    );

    // hat
    let hat_brim = b.attach(
        head,
        Joint::new("hat_brim_joint", Mat4::IDENTITY),
        Segment::new(
            "hat_brim",
            cube,
            material,
            place(Vec3::new(0.0, -0.1, 0.0), Vec3::new(0.7, 0.1, 0.7)),
        ),
    );
    b.attach(
        hat_brim,
        Joint::new("hat_top_joint", Mat4::IDENTITY),
        Segment::new(
            "hat_top",
            cube,
            material,
            place(Vec3::new(0.0, 0.3, 0.0), Vec3::splat(0.5)),
        ),
    );

    b.build()
}
