//! stereo-rig-rs: a controller-tracked virtual stereo camera rig.
//!
//! The rig pairs a left and right camera around a virtual central camera and
//! moves them as one unit, tracking the motion of an external controller (a
//! tracked tool or robotic-arm end-effector) for stereoscopic visualization
//! in teleoperation settings.
//!
//! # Quick Start
//!
//! ```
//! use stereo_rig::*;
//!
//! fn main() -> Result<()> {
//!     let options = RigOptions::default();
//!     let mut controller = RigController::from_options(
//!         Box::new(HeadlessTarget::new()),
//!         Box::new(HeadlessTarget::new()),
//!         &options,
//!     )?;
//!
//!     let mut events = EventQueue::new();
//!     events.push(ButtonEvent { value: 1 });
//!     events.push(PoseEvent {
//!         transform: Pose::IDENTITY,
//!     });
//!     events.pump(&mut controller);
//!
//!     assert!(controller.is_tracking());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - The geometry lives in [`stereo_rig_core`]: [`Pose`] math,
//!   displacement estimation, and the [`StereoCamera`] rig kinematics.
//! - This crate adds the [`RigController`] tracking state machine and the
//!   single-consumer [`EventQueue`] the transport feeds.
//! - Hosts integrate by implementing [`RenderTarget`] for their viewer and
//!   pumping controller events through the queue.

pub mod controller;
pub mod event;

pub use controller::{RigController, TrackingState};
pub use event::{ButtonEvent, ControllerEvent, EventQueue, PoseEvent};

// Re-export the core geometry API
pub use stereo_rig_core::{
    estimate, CentralSnapshot, Displacement, HeadlessTarget, MonoCamera, Pose, RenderTarget,
    Result, RigOptions, StereoCamera, StereoRigError, ORTHO_TOL,
};

// Re-export glam types for convenience
pub use glam::{DMat3, DMat4, DQuat, DVec3};
