//! Core geometry for stereo-rig-rs.
//!
//! This crate provides the geometric control engine for a virtual stereo
//! camera rig driven by an external tracked controller:
//! - [`Pose`] — homogeneous-transform primitives: inversion, composition,
//!   and orthonormal-basis construction from look-at parameters
//! - [`estimate`] — damped incremental displacement between two poses
//! - [`MonoCamera`] / [`StereoCamera`] — rig kinematics around a virtual
//!   central camera with a configurable baseline
//! - [`RenderTarget`] — capability interface to the hosting render
//!   environment, with a [`HeadlessTarget`] in-memory implementation
//! - [`RigOptions`] — configuration

// Documentation lints - internal functions don't need exhaustive panic docs
#![allow(clippy::missing_panics_doc)]
// Geometry code reads naturally with short names like xx/yy/zz
#![allow(clippy::similar_names)]

pub mod camera;
pub mod displacement;
pub mod error;
pub mod options;
pub mod pose;
pub mod rig;

pub use camera::{HeadlessTarget, MonoCamera, RenderTarget};
pub use displacement::{estimate, Displacement};
pub use error::{Result, StereoRigError};
pub use options::RigOptions;
pub use pose::{Pose, ORTHO_TOL};
pub use rig::{CentralSnapshot, StereoCamera};

// Re-export glam types for convenience
pub use glam::{DMat3, DMat4, DQuat, DVec3};
