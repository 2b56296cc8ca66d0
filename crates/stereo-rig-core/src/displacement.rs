//! Damped incremental displacement between successive controller poses.

use glam::{DMat3, DQuat, DVec3};

use crate::error::Result;
use crate::pose::Pose;

/// An incremental rigid displacement in the controller's local frame.
///
/// The rotation part is strictly translation-free; the translation part is a
/// plain vector, to be rotated into the world frame by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Displacement {
    /// Damped rotation delta.
    pub rotation: DMat3,
    /// Damped translation delta, in the rig's local frame.
    pub translation: DVec3,
}

impl Displacement {
    /// The zero displacement.
    pub const IDENTITY: Self = Self {
        rotation: DMat3::IDENTITY,
        translation: DVec3::ZERO,
    };
}

/// Estimates the damped displacement that carries `start` to `end`.
///
/// The translation delta is the componentwise position difference scaled by
/// `translation_scale`. The rotation delta is the relative rotation
/// `end.R * start.R^-1` interpolated from the identity by spherical linear
/// interpolation at `rotation_scale` (clamped to `[0, 1]`): `0` yields the
/// identity, `1` the raw relative rotation.
///
/// Equal start and end poses produce exactly [`Displacement::IDENTITY`].
///
/// # Errors
///
/// Returns [`StereoRigError::SingularTransform`] when `start` cannot be
/// inverted.
///
/// [`StereoRigError::SingularTransform`]: crate::StereoRigError::SingularTransform
pub fn estimate(
    start: &Pose,
    end: &Pose,
    translation_scale: f64,
    rotation_scale: f64,
) -> Result<Displacement> {
    // Exact early-out keeps a stationary controller exactly stationary; the
    // matrix path below would accumulate round-off.
    if start == end {
        return Ok(Displacement::IDENTITY);
    }

    let translation = (end.translation - start.translation) * translation_scale;

    let start_rotation_inverse = Pose::from_parts(start.rotation, DVec3::ZERO).inverse()?;
    let raw_rotation = end.rotation * start_rotation_inverse.rotation;

    let t = if (0.0..=1.0).contains(&rotation_scale) {
        rotation_scale
    } else {
        log::warn!("rotation scale {rotation_scale} outside [0, 1], clamping");
        rotation_scale.clamp(0.0, 1.0)
    };

    let rotation = if t == 0.0 {
        DMat3::IDENTITY
    } else if t == 1.0 {
        raw_rotation
    } else {
        let raw_quat = DQuat::from_mat3(&raw_rotation).normalize();
        DMat3::from_quat(DQuat::IDENTITY.slerp(raw_quat, t))
    };

    Ok(Displacement {
        rotation,
        translation,
    })
}
