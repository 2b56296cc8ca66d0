//! The tracking/idle state machine driving the stereo rig.

use stereo_rig_core::{
    estimate, Displacement, Pose, RenderTarget, Result, RigOptions, StereoCamera,
};

/// Whether controller motion is currently applied to the rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackingState {
    /// Pose events are discarded; a button press re-arms tracking.
    #[default]
    Idle,
    /// Pose events produce rig displacements.
    Tracking,
}

/// Successive controller pose snapshots for one displacement per update.
///
/// `current` is empty between arming and the first valid pose event: the
/// transport delivers poses only as events, so the first pose after arming
/// becomes the reference instead of producing a displacement. That keeps the
/// rig from jumping when tracking resumes after a pause.
#[derive(Debug, Default)]
struct ControllerPoseBuffer {
    current: Option<Pose>,
}

/// Consumes controller pose and button events and drives a [`StereoCamera`]
/// through damped incremental displacements.
///
/// All per-event failures are fail-soft: the update is skipped with a
/// warning, and the last good central pose and reference pose survive.
#[derive(Debug)]
pub struct RigController {
    rig: StereoCamera,
    state: TrackingState,
    buffer: ControllerPoseBuffer,
    translation_scale: f64,
    rotation_scale: f64,
    scale_factor: f64,
}

impl RigController {
    /// Creates a controller around an existing rig, applying the baseline,
    /// initial placement, and scale options.
    #[must_use]
    pub fn new(mut rig: StereoCamera, options: &RigOptions) -> Self {
        rig.set_baseline(options.baseline);
        let initial = options.initial_position;
        rig.set_absolute_position(initial.x, initial.y, initial.z);

        Self {
            rig,
            state: TrackingState::Idle,
            buffer: ControllerPoseBuffer::default(),
            translation_scale: options.translation_scale_factor,
            rotation_scale: options.rotation_scale_factor,
            scale_factor: options.scale_factor,
        }
    }

    /// Creates a controller publishing to the given left/right render
    /// targets.
    ///
    /// # Errors
    ///
    /// Returns [`StereoRigError::InvalidOptions`] when `options` fails
    /// validation.
    ///
    /// [`StereoRigError::InvalidOptions`]: stereo_rig_core::StereoRigError::InvalidOptions
    pub fn from_options(
        left_target: Box<dyn RenderTarget>,
        right_target: Box<dyn RenderTarget>,
        options: &RigOptions,
    ) -> Result<Self> {
        options.validate()?;
        Ok(Self::new(
            StereoCamera::new(left_target, right_target),
            options,
        ))
    }

    /// The current tracking state.
    #[must_use]
    pub fn state(&self) -> TrackingState {
        self.state
    }

    /// Whether controller motion is currently applied.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.state == TrackingState::Tracking
    }

    /// The driven rig.
    #[must_use]
    pub fn rig(&self) -> &StereoCamera {
        &self.rig
    }

    /// Mutable access to the driven rig, for host-side repositioning.
    pub fn rig_mut(&mut self) -> &mut StereoCamera {
        &mut self.rig
    }

    /// Handles one controller event to completion.
    pub fn handle_event(&mut self, event: &crate::event::ControllerEvent) {
        match event {
            crate::event::ControllerEvent::Button(button) => self.handle_button(button.value),
            crate::event::ControllerEvent::Pose(pose) => self.handle_pose(&pose.transform),
        }
    }

    fn handle_button(&mut self, value: u8) {
        match (value, self.state) {
            (1, TrackingState::Idle) => {
                // Arm: the next valid pose event becomes the reference.
                self.buffer.current = None;
                self.state = TrackingState::Tracking;
                log::debug!("tracking armed");
            }
            (0, TrackingState::Tracking) => {
                self.state = TrackingState::Idle;
                log::debug!("tracking disarmed");
            }
            (0 | 1, _) => {}
            (other, _) => {
                log::warn!("ignoring unexpected button value {other}");
            }
        }
    }

    fn handle_pose(&mut self, transform: &Pose) {
        if self.state == TrackingState::Idle {
            return;
        }

        if let Err(error) = transform.validate() {
            log::warn!("discarding pose update: {error}");
            return;
        }

        let Some(current) = self.buffer.current else {
            self.buffer.current = Some(*transform);
            return;
        };

        let displacement =
            match estimate(&current, transform, self.translation_scale, self.rotation_scale) {
                Ok(displacement) => displacement,
                Err(error) => {
                    log::warn!("skipping displacement estimate: {error}");
                    return;
                }
            };

        // A no-motion update must leave the rig exactly untouched.
        if displacement != Displacement::IDENTITY {
            if let Err(error) = self.apply_displacement(&displacement) {
                log::warn!("skipping displacement application: {error}");
                return;
            }
        }

        self.buffer.current = Some(*transform);
    }

    /// Applies one damped displacement to the rig's central pose.
    ///
    /// The translation delta is expressed in the rig's local frame; it is
    /// scaled by the overall controller-to-scene factor and rotated into the
    /// world frame before being added to the central position.
    fn apply_displacement(&mut self, displacement: &Displacement) -> Result<()> {
        let snapshot = self.rig.central_snapshot()?;

        let world_translation =
            snapshot.pose.rotation * (displacement.translation * self.scale_factor);
        let central = Pose::from_parts(
            snapshot.pose.rotation * displacement.rotation,
            snapshot.position + world_translation,
        );

        self.rig.set_central_pose(&central, &snapshot);
        Ok(())
    }
}
