//! Configuration options for the stereo rig.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StereoRigError};

/// Configuration for the rig and its tracking behaviour.
///
/// Defaults match the reference teleoperation setup: a 20 mm baseline viewed
/// from 200 mm out, with the controller workspace scaled 4x into the scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RigOptions {
    /// Total inter-camera separation (mm), split +-baseline/2 per side.
    pub baseline: f64,

    /// Damping multiplier on the raw positional delta per update.
    pub translation_scale_factor: f64,

    /// SLERP interpolation parameter for the rotation delta, in `[0, 1]`.
    pub rotation_scale_factor: f64,

    /// Overall controller-to-scene displacement scale, reconciling the
    /// physical workspace size with the virtual scene's.
    pub scale_factor: f64,

    /// One-time absolute placement of the central camera before tracking.
    pub initial_position: DVec3,
}

impl Default for RigOptions {
    fn default() -> Self {
        Self {
            baseline: 20.0,
            translation_scale_factor: 0.3,
            rotation_scale_factor: 0.4,
            scale_factor: 4.0,
            initial_position: DVec3::new(0.0, -200.0, 0.0),
        }
    }
}

impl RigOptions {
    /// Parses options from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`StereoRigError::Json`] on malformed input, or
    /// [`StereoRigError::InvalidOptions`] when a parsed value is out of
    /// range.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Checks option ranges.
    ///
    /// # Errors
    ///
    /// Returns [`StereoRigError::InvalidOptions`] naming the offending
    /// option.
    pub fn validate(&self) -> Result<()> {
        if !self.baseline.is_finite() || self.baseline < 0.0 {
            return Err(StereoRigError::InvalidOptions {
                option: "baseline",
                reason: format!("must be finite and non-negative, got {}", self.baseline),
            });
        }
        if !(0.0..=1.0).contains(&self.rotation_scale_factor) {
            return Err(StereoRigError::InvalidOptions {
                option: "rotation_scale_factor",
                reason: format!("must be in [0, 1], got {}", self.rotation_scale_factor),
            });
        }
        for (option, value) in [
            ("translation_scale_factor", self.translation_scale_factor),
            ("scale_factor", self.scale_factor),
        ] {
            if !value.is_finite() {
                return Err(StereoRigError::InvalidOptions {
                    option,
                    reason: format!("must be finite, got {value}"),
                });
            }
        }
        Ok(())
    }
}
