//! Single-camera state and the render-target capability interface.

use glam::DVec3;

use crate::error::Result;
use crate::pose::Pose;

/// Capability interface to the hosting render environment.
///
/// A render target exposes one camera's live render parameters and accepts
/// updates to them, decoupling the rig geometry from whatever scene-graph or
/// viewer actually draws the picture. Injected into [`MonoCamera`] at
/// construction.
pub trait RenderTarget {
    /// The camera's current world-space position.
    fn position(&self) -> DVec3;

    /// The point the camera is looking at.
    fn focal_point(&self) -> DVec3;

    /// The camera's up vector.
    fn view_up(&self) -> DVec3;

    /// Publishes new render parameters to the host.
    fn set_camera(&mut self, position: DVec3, focal_point: DVec3, view_up: DVec3);

    /// Publishes the camera's full pose as an in-scene overlay (the
    /// "sitting transform"), for visualizing the rig position.
    fn set_overlay_pose(&mut self, pose: &Pose);
}

/// An in-memory [`RenderTarget`] with no attached viewer.
///
/// Useful for integration tests, batch processing, and hosts that poll the
/// computed camera state instead of observing it.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessTarget {
    /// Camera position.
    pub position: DVec3,
    /// Focal point.
    pub focal_point: DVec3,
    /// Up vector.
    pub view_up: DVec3,
    /// Last published overlay pose, if any.
    pub overlay_pose: Option<Pose>,
}

impl Default for HeadlessTarget {
    fn default() -> Self {
        Self {
            position: DVec3::new(0.0, -1.0, 0.0),
            focal_point: DVec3::ZERO,
            view_up: DVec3::Z,
            overlay_pose: None,
        }
    }
}

impl HeadlessTarget {
    /// Creates a headless target with the default (non-degenerate) camera.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderTarget for HeadlessTarget {
    fn position(&self) -> DVec3 {
        self.position
    }

    fn focal_point(&self) -> DVec3 {
        self.focal_point
    }

    fn view_up(&self) -> DVec3 {
        self.view_up
    }

    fn set_camera(&mut self, position: DVec3, focal_point: DVec3, view_up: DVec3) {
        self.position = position;
        self.focal_point = focal_point;
        self.view_up = view_up;
    }

    fn set_overlay_pose(&mut self, pose: &Pose) {
        self.overlay_pose = Some(*pose);
    }
}

// Dispatch is single-threaded (one event at a time), so a host may keep an
// observing handle to a shared headless target.
impl RenderTarget for std::rc::Rc<std::cell::RefCell<HeadlessTarget>> {
    fn position(&self) -> DVec3 {
        self.borrow().position
    }

    fn focal_point(&self) -> DVec3 {
        self.borrow().focal_point
    }

    fn view_up(&self) -> DVec3 {
        self.borrow().view_up
    }

    fn set_camera(&mut self, position: DVec3, focal_point: DVec3, view_up: DVec3) {
        self.borrow_mut().set_camera(position, focal_point, view_up);
    }

    fn set_overlay_pose(&mut self, pose: &Pose) {
        self.borrow_mut().set_overlay_pose(pose);
    }
}

/// One camera of the stereo pair.
///
/// Holds the signed baseline offset along the rig's local X axis and the
/// cached focal magnitude, and translates between rig-relative pose and the
/// absolute render parameters published to its [`RenderTarget`].
pub struct MonoCamera {
    target: Box<dyn RenderTarget>,
    baseline_offset: f64,
    focal_magnitude: f64,
}

impl std::fmt::Debug for MonoCamera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonoCamera")
            .field("baseline_offset", &self.baseline_offset)
            .field("focal_magnitude", &self.focal_magnitude)
            .finish_non_exhaustive()
    }
}

impl MonoCamera {
    /// Creates a camera bound to the given render target.
    #[must_use]
    pub fn new(target: Box<dyn RenderTarget>) -> Self {
        Self {
            target,
            baseline_offset: 0.0,
            focal_magnitude: 0.0,
        }
    }

    /// Sets the signed offset from the rig center along the local X axis
    /// (negative for the left camera, positive for the right).
    pub fn set_baseline_offset(&mut self, offset: f64) {
        self.baseline_offset = offset;
    }

    /// The signed baseline offset.
    #[must_use]
    pub fn baseline_offset(&self) -> f64 {
        self.baseline_offset
    }

    /// The focal magnitude cached by the last [`MonoCamera::snapshot`].
    #[must_use]
    pub fn focal_magnitude(&self) -> f64 {
        self.focal_magnitude
    }

    /// Read-only access to the render target, for host inspection.
    #[must_use]
    pub fn target(&self) -> &dyn RenderTarget {
        self.target.as_ref()
    }

    /// Derives the camera's pose and focal magnitude from the render
    /// target's live position/focal-point/view-up vectors.
    ///
    /// The magnitude is cached for the paired `set_from_central` call.
    ///
    /// # Errors
    ///
    /// Returns [`StereoRigError::DegenerateBasis`] when the live render
    /// parameters admit no orthonormal basis; the cached magnitude is left
    /// unchanged so the previous valid state survives.
    ///
    /// [`StereoRigError::DegenerateBasis`]: crate::StereoRigError::DegenerateBasis
    pub fn snapshot(&mut self) -> Result<(Pose, f64)> {
        let position = self.target.position();
        let focal_point = self.target.focal_point();
        let pose = Pose::from_look_at(position, focal_point, self.target.view_up())?;
        let magnitude = (focal_point - position).length();
        self.focal_magnitude = magnitude;
        Ok((pose, magnitude))
    }

    /// Repositions this camera from the rig's central pose.
    ///
    /// The camera pose is `central * translate(offset, 0, 0)`; the published
    /// focal point sits `magnitude` along the basis Y axis, the view-up is
    /// the basis Z axis. The full pose is also published as the overlay.
    pub fn set_from_central(&mut self, central: &Pose, magnitude: f64) {
        let camera_pose =
            central.compose(&Pose::from_translation(DVec3::new(self.baseline_offset, 0.0, 0.0)));

        let position = camera_pose.translation;
        let focal_point = position + camera_pose.basis_y() * magnitude;
        let view_up = camera_pose.basis_z();

        self.focal_magnitude = magnitude;
        self.target.set_camera(position, focal_point, view_up);
        self.target.set_overlay_pose(&camera_pose);
    }

    /// Places the camera absolutely, bypassing rig geometry: position
    /// `(x + offset, y, z)`, focal point at the origin, view-up `(0, 0, 1)`.
    pub fn set_absolute_position(&mut self, x: f64, y: f64, z: f64) {
        self.target.set_camera(
            DVec3::new(x + self.baseline_offset, y, z),
            DVec3::ZERO,
            DVec3::Z,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn observed_camera(offset: f64) -> (MonoCamera, Rc<RefCell<HeadlessTarget>>) {
        let target = Rc::new(RefCell::new(HeadlessTarget::new()));
        let mut camera = MonoCamera::new(Box::new(Rc::clone(&target)));
        camera.set_baseline_offset(offset);
        (camera, target)
    }

    #[test]
    fn test_snapshot_derives_basis_and_magnitude() {
        let (mut camera, target) = observed_camera(0.0);
        target.borrow_mut().set_camera(
            DVec3::new(0.0, -200.0, 0.0),
            DVec3::ZERO,
            DVec3::Z,
        );

        let (pose, magnitude) = camera.snapshot().unwrap();
        assert!((magnitude - 200.0).abs() < 1e-9);
        assert_eq!(camera.focal_magnitude(), magnitude);
        assert!(pose.basis_y().abs_diff_eq(DVec3::Y, 1e-9));
        assert!(pose.translation.abs_diff_eq(DVec3::new(0.0, -200.0, 0.0), 1e-9));
    }

    #[test]
    fn test_snapshot_fails_soft_on_degenerate_target() {
        let (mut camera, target) = observed_camera(0.0);
        target.borrow_mut().set_camera(
            DVec3::new(0.0, -200.0, 0.0),
            DVec3::ZERO,
            DVec3::Z,
        );
        camera.snapshot().unwrap();

        // Focal direction parallel to up: no basis, magnitude cache intact.
        target.borrow_mut().set_camera(DVec3::ZERO, DVec3::Z, DVec3::Z);
        assert!(camera.snapshot().is_err());
        assert!((camera.focal_magnitude() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_set_from_central_applies_offset_along_local_x() {
        let (mut camera, target) = observed_camera(-10.0);
        let central = Pose::from_look_at(
            DVec3::new(0.0, -200.0, 0.0),
            DVec3::ZERO,
            DVec3::Z,
        )
        .unwrap();

        camera.set_from_central(&central, 200.0);

        let observed = target.borrow();
        assert!(observed.position.abs_diff_eq(DVec3::new(-10.0, -200.0, 0.0), 1e-9));
        assert!(observed.focal_point.abs_diff_eq(DVec3::new(-10.0, 0.0, 0.0), 1e-9));
        assert!(observed.view_up.abs_diff_eq(DVec3::Z, 1e-9));

        let overlay = observed.overlay_pose.expect("overlay published");
        assert!(overlay.translation.abs_diff_eq(DVec3::new(-10.0, -200.0, 0.0), 1e-9));
        assert_eq!(overlay.rotation, central.rotation);
    }

    #[test]
    fn test_set_absolute_position_includes_offset() {
        let (mut camera, target) = observed_camera(10.0);
        camera.set_absolute_position(0.0, -200.0, 0.0);

        let observed = target.borrow();
        assert_eq!(observed.position, DVec3::new(10.0, -200.0, 0.0));
        assert_eq!(observed.focal_point, DVec3::ZERO);
        assert_eq!(observed.view_up, DVec3::Z);
    }
}
