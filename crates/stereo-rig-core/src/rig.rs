//! The two-camera stereo rig and its virtual central camera.

use glam::DVec3;

use crate::camera::{MonoCamera, RenderTarget};
use crate::error::Result;
use crate::pose::Pose;

/// One consistent reading of the rig's central camera.
///
/// Repositioning the rig is a read-modify-write of the central pose, and the
/// focal magnitudes measured during the read must be the ones reused during
/// the write. Carrying them inside the snapshot value ties the pair together
/// by data flow instead of call-order convention: [`StereoCamera::set_central_pose`]
/// takes the snapshot it must match.
#[derive(Debug, Clone, Copy)]
pub struct CentralSnapshot {
    /// Central position: midpoint of the left and right camera positions.
    pub position: DVec3,
    /// Central pose. The rotation is the shared camera basis; the
    /// translation is the left camera's position, not the midpoint.
    pub pose: Pose,
    /// Left camera's focal magnitude at snapshot time.
    pub magnitude_left: f64,
    /// Right camera's focal magnitude at snapshot time.
    pub magnitude_right: f64,
}

/// The paired left/right camera assembly, controlled as one unit through a
/// virtual central camera that is never directly rendered.
#[derive(Debug)]
pub struct StereoCamera {
    left: MonoCamera,
    right: MonoCamera,
}

impl StereoCamera {
    /// Creates a rig publishing to the given left/right render targets.
    #[must_use]
    pub fn new(left_target: Box<dyn RenderTarget>, right_target: Box<dyn RenderTarget>) -> Self {
        Self {
            left: MonoCamera::new(left_target),
            right: MonoCamera::new(right_target),
        }
    }

    /// Sets the total inter-camera separation, split symmetrically: the left
    /// camera sits at `-baseline / 2`, the right at `+baseline / 2` along the
    /// rig's local X axis.
    pub fn set_baseline(&mut self, baseline: f64) {
        self.left.set_baseline_offset(-baseline / 2.0);
        self.right.set_baseline_offset(baseline / 2.0);
    }

    /// Reads the current central camera state from both cameras.
    ///
    /// The central position is the midpoint of the two camera positions; the
    /// central rotation is the left camera's basis (both cameras share their
    /// orientation by construction, so the left is representative).
    ///
    /// # Errors
    ///
    /// Propagates [`StereoRigError::DegenerateBasis`] from either camera; the
    /// rig state is untouched in that case.
    ///
    /// [`StereoRigError::DegenerateBasis`]: crate::StereoRigError::DegenerateBasis
    pub fn central_snapshot(&mut self) -> Result<CentralSnapshot> {
        let (pose_left, magnitude_left) = self.left.snapshot()?;
        let (pose_right, magnitude_right) = self.right.snapshot()?;

        Ok(CentralSnapshot {
            position: (pose_left.translation + pose_right.translation) / 2.0,
            pose: pose_left,
            magnitude_left,
            magnitude_right,
        })
    }

    /// Repositions both cameras around a new central pose, reusing the focal
    /// magnitudes measured by the matching snapshot.
    pub fn set_central_pose(&mut self, central: &Pose, snapshot: &CentralSnapshot) {
        self.left.set_from_central(central, snapshot.magnitude_left);
        self.right.set_from_central(central, snapshot.magnitude_right);
    }

    /// Places the rig absolutely, bypassing displacement geometry; each
    /// camera lands at `(x + its offset, y, z)` looking at the origin with
    /// view-up `(0, 0, 1)`.
    pub fn set_absolute_position(&mut self, x: f64, y: f64, z: f64) {
        self.left.set_absolute_position(x, y, z);
        self.right.set_absolute_position(x, y, z);
    }

    /// The left camera.
    #[must_use]
    pub fn left(&self) -> &MonoCamera {
        &self.left
    }

    /// The right camera.
    #[must_use]
    pub fn right(&self) -> &MonoCamera {
        &self.right
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::HeadlessTarget;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn observed_rig() -> (
        StereoCamera,
        Rc<RefCell<HeadlessTarget>>,
        Rc<RefCell<HeadlessTarget>>,
    ) {
        let left = Rc::new(RefCell::new(HeadlessTarget::new()));
        let right = Rc::new(RefCell::new(HeadlessTarget::new()));
        let rig = StereoCamera::new(
            Box::new(Rc::clone(&left)),
            Box::new(Rc::clone(&right)),
        );
        (rig, left, right)
    }

    #[test]
    fn test_placement_scenario_splits_baseline() {
        let (mut rig, left, right) = observed_rig();
        rig.set_baseline(20.0);
        rig.set_absolute_position(0.0, -200.0, 0.0);

        assert_eq!(left.borrow().position, DVec3::new(-10.0, -200.0, 0.0));
        assert_eq!(right.borrow().position, DVec3::new(10.0, -200.0, 0.0));
        for side in [&left, &right] {
            assert_eq!(side.borrow().focal_point, DVec3::ZERO);
            assert_eq!(side.borrow().view_up, DVec3::Z);
        }
    }

    #[test]
    fn test_snapshot_midpoint_and_magnitudes() {
        let (mut rig, _left, _right) = observed_rig();
        rig.set_baseline(20.0);
        rig.set_absolute_position(0.0, -200.0, 0.0);

        let snapshot = rig.central_snapshot().unwrap();
        assert!(snapshot.position.abs_diff_eq(DVec3::new(0.0, -200.0, 0.0), 1e-9));
        // Each camera looks at the origin from (+-10, -200, 0).
        let expected = (200.0f64 * 200.0 + 10.0 * 10.0).sqrt();
        assert!((snapshot.magnitude_left - expected).abs() < 1e-9);
        assert!((snapshot.magnitude_right - expected).abs() < 1e-9);
    }

    #[test]
    fn test_set_central_pose_round_trips_the_midpoint() {
        let (mut rig, left, right) = observed_rig();
        rig.set_baseline(14.0);
        rig.set_absolute_position(0.0, -200.0, 0.0);

        let snapshot = rig.central_snapshot().unwrap();
        let central = Pose::from_parts(snapshot.pose.rotation, snapshot.position);
        rig.set_central_pose(&central, &snapshot);

        let midpoint = (left.borrow().position + right.borrow().position) / 2.0;
        assert!(midpoint.abs_diff_eq(central.translation, 1e-9));

        let resnap = rig.central_snapshot().unwrap();
        assert!(resnap.position.abs_diff_eq(central.translation, 1e-9));
    }

    #[test]
    fn test_degenerate_camera_leaves_rig_untouched() {
        let (mut rig, left, right) = observed_rig();
        rig.set_baseline(20.0);
        rig.set_absolute_position(0.0, -200.0, 0.0);

        // Corrupt the left target so its basis is degenerate.
        left.borrow_mut().set_camera(DVec3::ZERO, DVec3::Z, DVec3::Z);
        let before = right.borrow().clone();

        assert!(rig.central_snapshot().is_err());
        assert_eq!(*right.borrow(), before);
    }

    mod properties {
        use super::*;
        use glam::{DMat3, DQuat, EulerRot};
        use proptest::prelude::*;

        fn arbitrary_central_pose() -> impl Strategy<Value = Pose> {
            (
                -std::f64::consts::PI..std::f64::consts::PI,
                -1.4f64..1.4,
                -std::f64::consts::PI..std::f64::consts::PI,
                (-500.0f64..500.0, -500.0f64..500.0, -500.0f64..500.0),
            )
                .prop_map(|(yaw, pitch, roll, (x, y, z))| {
                    Pose::from_parts(
                        DMat3::from_quat(DQuat::from_euler(EulerRot::ZYX, yaw, pitch, roll)),
                        DVec3::new(x, y, z),
                    )
                })
        }

        proptest! {
            #[test]
            fn midpoint_round_trips_for_any_baseline_and_central_pose(
                baseline in 0.1f64..100.0,
                central in arbitrary_central_pose(),
            ) {
                let (mut rig, left, right) = observed_rig();
                rig.set_baseline(baseline);
                rig.set_absolute_position(0.0, -200.0, 0.0);

                let snapshot = rig.central_snapshot().unwrap();
                rig.set_central_pose(&central, &snapshot);

                let midpoint = (left.borrow().position + right.borrow().position) / 2.0;
                prop_assert!(midpoint.abs_diff_eq(central.translation, 1e-9));

                let resnap = rig.central_snapshot().unwrap();
                prop_assert!(resnap.position.abs_diff_eq(central.translation, 1e-9));
            }
        }
    }
}
