//! Error types for stereo-rig-rs.

use thiserror::Error;

/// The main error type for stereo-rig-rs operations.
#[derive(Error, Debug)]
pub enum StereoRigError {
    /// The focal direction is parallel to the view-up vector, so no
    /// orthonormal camera basis can be derived.
    #[error("degenerate camera basis: focal direction parallel to view-up (cross norm {cross_norm:.3e})")]
    DegenerateBasis { cross_norm: f64 },

    /// An incoming pose failed the orthonormality tolerance check.
    #[error("invalid pose: rotation not orthonormal (max deviation {deviation:.3e})")]
    InvalidPose { deviation: f64 },

    /// A pose could not be inverted.
    #[error("singular transform: rotation determinant {determinant:.3e} below tolerance")]
    SingularTransform { determinant: f64 },

    /// A configuration option is out of its valid range.
    #[error("invalid option '{option}': {reason}")]
    InvalidOptions { option: &'static str, reason: String },

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for stereo-rig-rs operations.
pub type Result<T> = std::result::Result<T, StereoRigError>;
