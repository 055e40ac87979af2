use glam::{Mat3, Vec3};

use crate::rig::KinematicTree;

/// Construction-time solver parameters.
#[derive(Debug, Clone, Copy)]
pub struct IkConfig {
    pub max_iterations: u32,
    pub tolerance: f32,
    /// Fraction of the remaining error taken as the per-iteration step.
    pub step_gain: f32,
    /// Tikhonov damping added to the diagonal of J Jᵗ. Keeps the 3x3
    /// system invertible near singular and gimbal configurations.
    pub damping: f32,
    /// Finite-difference step for the numeric Jacobian, in radians.
    pub fd_step: f32,
}

impl Default for IkConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 0.01,
            step_gain: 0.05,
            damping: 0.01,
            fd_step: 1e-3,
        }
    }
}

/// Outcome of one solve call.
///
/// `residual` is the error the iteration loop converged against (the
/// tracked position, advanced by each applied step). Callers that need a
/// hard guarantee should re-evaluate the tree and measure the effector
/// distance themselves.
#[derive(Debug, Clone, Copy)]
pub struct SolveReport {
    pub converged: bool,
    pub iterations: u32,
    pub residual: f32,
}

/// Damped-least-squares IK over a tree's global angle vector.
///
/// Each iteration builds a 3xDOF Jacobian by forward finite differences
/// (one tree evaluation per DOF) and solves `Δθ = Jᵗ (J Jᵗ + λI)⁻¹ dx`.
/// Non-convergence is silent: the tree is left at whatever pose the final
/// iteration produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct IkSolver {
    config: IkConfig,
}

impl IkSolver {
    pub fn new(config: IkConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IkConfig {
        &self.config
    }

    /// Poses `tree` so its end effector approaches `target`, mutating the
    /// global angle vector in place.
    pub fn solve(&self, tree: &mut KinematicTree, target: Vec3) -> SolveReport {
        let Some(start) = tree.end_effector_position() else {
            // nothing to drive; a tree without an effector is a no-op
            return SolveReport {
                converged: true,
                iterations: 0,
                residual: 0.0,
            };
        };

        let mut current = start;
        for iteration in 0..self.config.max_iterations {
            let error = target - current;
            let residual = error.length();
            if residual < self.config.tolerance {
                return SolveReport {
                    converged: true,
                    iterations: iteration,
                    residual,
                };
            }

            let dx = error * self.config.step_gain;
            let jacobian = self.jacobian(tree);
            if let Some(delta) = self.angle_step(&jacobian, dx) {
                let angles = tree.angles_mut();
                for (angle, d) in angles.iter_mut().zip(delta) {
                    *angle += d;
                }
                tree.apply_angles();
            }

            // track the step actually taken, not a fresh evaluation, so
            // the convergence check stays consistent with dx
            current += dx;
        }

        let residual = (target - current).length();
        SolveReport {
            converged: residual < self.config.tolerance,
            iterations: self.config.max_iterations,
            residual,
        }
    }

    /// 3xDOF Jacobian by forward differences, one column per DOF.
    fn jacobian(&self, tree: &mut KinematicTree) -> Vec<Vec3> {
        let h = self.config.fd_step;
        let base = tree.end_effector_position().unwrap_or(Vec3::ZERO);
        let dof = tree.dof_count();

        let mut columns = Vec::with_capacity(dof);
        for i in 0..dof {
            tree.angles_mut()[i] += h;
            tree.apply_angles();
            let bumped = tree.end_effector_position().unwrap_or(base);
            tree.angles_mut()[i] -= h;
            tree.apply_angles();

            columns.push((bumped - base) / h);
        }
        columns
    }

    /// `Δθ = Jᵗ (J Jᵗ + λI)⁻¹ dx`. Returns `None` when the damped system
    /// still fails to invert cleanly (degenerate angles); the iteration
    /// skips the step rather than propagating non-finite values.
    fn angle_step(&self, jacobian: &[Vec3], dx: Vec3) -> Option<Vec<f32>> {
        let mut jjt = Mat3::from_diagonal(Vec3::splat(self.config.damping));
        for col in jacobian {
            jjt += Mat3::from_cols(*col * col.x, *col * col.y, *col * col.z);
        }

        let inv = jjt.inverse();
        if !inv.is_finite() {
            return None;
        }

        let v = inv * dx;
        let delta: Vec<f32> = jacobian.iter().map(|col| col.dot(v)).collect();
        if delta.iter().any(|d| !d.is_finite()) {
            return None;
        }
        Some(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handles::{DrawableHandle, MaterialHandle};
    use crate::rig::{DofMask, Joint, Segment};
    use glam::{Mat4, Vec4};
    use std::f32::consts::FRAC_PI_2;

    /// One hinge at the origin rotating about z, effector one unit out.
    fn hinge() -> KinematicTree {
        let mut builder = KinematicTree::builder();
        builder.root(
            Joint::new("hinge", Mat4::IDENTITY)
                .with_dof(DofMask::new(false, false, true))
                .with_end_effector(Vec4::new(1.0, 0.0, 0.0, 1.0)),
            Segment::new("link", DrawableHandle(0), MaterialHandle(0), Mat4::IDENTITY),
        );
        builder.build()
    }

    #[test]
    fn hinge_reaches_a_quarter_turn() {
        let mut tree = hinge();
        let solver = IkSolver::new(IkConfig {
            max_iterations: 100,
            tolerance: 0.01,
            step_gain: 0.3,
            damping: 0.01,
            fd_step: 1e-3,
        });

        let report = solver.solve(&mut tree, Vec3::new(0.0, 1.0, 0.0));

        assert!(report.converged);
        assert!(report.residual < 0.01);
        assert!(report.iterations < 100);
        // the hinge angle lands at ~90 degrees; the damping term leaves a
        // small bias, well inside a twentieth of a radian
        assert!((tree.angles()[0] - FRAC_PI_2).abs() < 0.05);
        let effector = tree.end_effector_position().unwrap();
        assert!(effector.distance(Vec3::new(0.0, 1.0, 0.0)) < 0.05);
    }

    #[test]
    fn unreachable_target_terminates_without_nan() {
        let mut tree = hinge();
        let solver = IkSolver::default();

        let report = solver.solve(&mut tree, Vec3::new(50.0, 50.0, 50.0));

        assert!(report.iterations <= solver.config().max_iterations);
        assert!(tree.angles().iter().all(|a| a.is_finite()));
        let effector = tree.end_effector_position().unwrap();
        assert!(effector.is_finite());
    }

    #[test]
    fn error_decreases_on_a_two_link_chain() {
        let mut builder = KinematicTree::builder();
        let base = builder.root(
            Joint::new("base", Mat4::IDENTITY).with_dof(DofMask::new(false, false, true)),
            Segment::new("upper", DrawableHandle(0), MaterialHandle(0), Mat4::IDENTITY),
        );
        builder.attach(
            base,
            Joint::new("elbow", Mat4::from_translation(Vec3::X))
                .with_dof(DofMask::new(false, false, true))
                .with_end_effector(Vec4::new(1.0, 0.0, 0.0, 1.0)),
            Segment::new("lower", DrawableHandle(0), MaterialHandle(0), Mat4::IDENTITY),
        );
        let mut tree = builder.build();

        // inside the annulus of reachability for two unit links
        let target = Vec3::new(1.0, 1.0, 0.0);
        let before = tree.end_effector_position().unwrap().distance(target);

        let solver = IkSolver::new(IkConfig {
            step_gain: 0.2,
            ..IkConfig::default()
        });
        let report = solver.solve(&mut tree, target);

        let after = tree.end_effector_position().unwrap().distance(target);
        assert!(report.converged);
        assert!(after < before);
        assert!(after < 0.1);
    }

    #[test]
    fn tree_without_effector_is_a_no_op() {
        let mut builder = KinematicTree::builder();
        builder.root(
            Joint::new("root", Mat4::IDENTITY).with_dof(DofMask::ALL),
            Segment::new("seg", DrawableHandle(0), MaterialHandle(0), Mat4::IDENTITY),
        );
        let mut tree = builder.build();

        let report = IkSolver::default().solve(&mut tree, Vec3::ONE);
        assert!(report.converged);
        assert_eq!(report.iterations, 0);
        assert!(tree.angles().iter().all(|&a| a == 0.0));
    }
}
