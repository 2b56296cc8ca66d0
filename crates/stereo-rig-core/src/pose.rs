//! Rigid-transform value type and basis construction.
//!
//! A [`Pose`] is a 4x4 homogeneous transform stored as its 3x3 orthonormal
//! rotation plus a translation vector. The basis convention follows the rig's
//! camera frame:
//!
//! - `X` is left-to-right across the baseline,
//! - `Y` is the focal (viewing) direction,
//! - `Z` is the view-up direction.

use glam::{DMat3, DMat4, DVec3};

use crate::error::{Result, StereoRigError};

/// Numeric tolerance for orthonormality, degeneracy, and singularity checks.
pub const ORTHO_TOL: f64 = 1e-6;

/// A rigid transform: orthonormal right-handed rotation + translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Rotation part, columns are the X/Y/Z basis vectors.
    pub rotation: DMat3,
    /// Translation part.
    pub translation: DVec3,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        rotation: DMat3::IDENTITY,
        translation: DVec3::ZERO,
    };

    /// Creates a pose from explicit rotation and translation parts.
    #[must_use]
    pub fn from_parts(rotation: DMat3, translation: DVec3) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Creates a pure translation.
    #[must_use]
    pub fn from_translation(translation: DVec3) -> Self {
        Self {
            rotation: DMat3::IDENTITY,
            translation,
        }
    }

    /// Derives an orthonormal camera basis from look-at parameters.
    ///
    /// `Y` is the normalized focal direction `focal_point - position`, `Z` the
    /// normalized `view_up`, and `X = normalize(Y x Z)`. The translation part
    /// is `position`.
    ///
    /// # Errors
    ///
    /// Returns [`StereoRigError::DegenerateBasis`] when the focal direction is
    /// parallel to `view_up` (cross-product norm below [`ORTHO_TOL`]), or when
    /// either input direction has near-zero length.
    pub fn from_look_at(position: DVec3, focal_point: DVec3, view_up: DVec3) -> Result<Self> {
        let focal_displacement = focal_point - position;
        if focal_displacement.length() < ORTHO_TOL || view_up.length() < ORTHO_TOL {
            return Err(StereoRigError::DegenerateBasis { cross_norm: 0.0 });
        }

        let yy = focal_displacement.normalize();
        let zz = view_up.normalize();

        let cross = yy.cross(zz);
        let cross_norm = cross.length();
        if cross_norm < ORTHO_TOL {
            return Err(StereoRigError::DegenerateBasis { cross_norm });
        }
        let xx = cross / cross_norm;

        Ok(Self {
            rotation: DMat3::from_cols(xx, yy, zz),
            translation: position,
        })
    }

    /// Composes two transforms: `self * other` in homogeneous form.
    #[must_use]
    pub fn compose(&self, other: &Pose) -> Pose {
        Pose {
            rotation: self.rotation * other.rotation,
            translation: self.rotation * other.translation + self.translation,
        }
    }

    /// Inverts the transform.
    ///
    /// # Errors
    ///
    /// Returns [`StereoRigError::SingularTransform`] when the rotation
    /// determinant is below [`ORTHO_TOL`] in magnitude. This cannot happen for
    /// a pose that passes [`Pose::validate`].
    pub fn inverse(&self) -> Result<Pose> {
        let determinant = self.rotation.determinant();
        if determinant.abs() < ORTHO_TOL {
            return Err(StereoRigError::SingularTransform { determinant });
        }
        let rotation_inverse = self.rotation.inverse();
        Ok(Pose {
            rotation: rotation_inverse,
            translation: -(rotation_inverse * self.translation),
        })
    }

    /// Checks that the rotation columns are unit-length and mutually
    /// orthogonal within [`ORTHO_TOL`].
    ///
    /// # Errors
    ///
    /// Returns [`StereoRigError::InvalidPose`] carrying the largest deviation.
    pub fn validate(&self) -> Result<()> {
        let deviation = self.orthonormality_deviation();
        if deviation > ORTHO_TOL {
            return Err(StereoRigError::InvalidPose { deviation });
        }
        Ok(())
    }

    /// Largest deviation of the rotation columns from orthonormality.
    #[must_use]
    pub fn orthonormality_deviation(&self) -> f64 {
        let x = self.rotation.x_axis;
        let y = self.rotation.y_axis;
        let z = self.rotation.z_axis;
        let mut deviation: f64 = 0.0;
        for length in [x.length(), y.length(), z.length()] {
            deviation = deviation.max((length - 1.0).abs());
        }
        for dot in [x.dot(y), y.dot(z), z.dot(x)] {
            deviation = deviation.max(dot.abs());
        }
        deviation
    }

    /// Applies the transform to a point.
    #[must_use]
    pub fn transform_point(&self, point: DVec3) -> DVec3 {
        self.rotation * point + self.translation
    }

    /// The X (left-to-right) basis vector.
    #[must_use]
    pub fn basis_x(&self) -> DVec3 {
        self.rotation.x_axis
    }

    /// The Y (focal direction) basis vector.
    #[must_use]
    pub fn basis_y(&self) -> DVec3 {
        self.rotation.y_axis
    }

    /// The Z (view-up) basis vector.
    #[must_use]
    pub fn basis_z(&self) -> DVec3 {
        self.rotation.z_axis
    }

    /// Expands to a 4x4 homogeneous matrix, for hosts that consume `Mat4`.
    #[must_use]
    pub fn to_mat4(&self) -> DMat4 {
        DMat4::from_cols(
            self.rotation.x_axis.extend(0.0),
            self.rotation.y_axis.extend(0.0),
            self.rotation.z_axis.extend(0.0),
            self.translation.extend(1.0),
        )
    }

    /// Elementwise comparison within a tolerance.
    #[must_use]
    pub fn approx_eq(&self, other: &Pose, tolerance: f64) -> bool {
        self.rotation.abs_diff_eq(other.rotation, tolerance)
            && self.translation.abs_diff_eq(other.translation, tolerance)
    }
}
