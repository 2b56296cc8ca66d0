//! Controller events and the single-consumer dispatch queue.

use std::collections::VecDeque;

use stereo_rig_core::Pose;

use crate::controller::RigController;

/// A controller pose update from the tracking transport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseEvent {
    /// The controller's pose in its tracking frame.
    pub transform: Pose,
}

/// A controller button state change.
///
/// Value `1` arms tracking, `0` disarms it; any other value is logged and
/// ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEvent {
    /// Raw button value from the transport.
    pub value: u8,
}

/// An event delivered to the rig controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerEvent {
    /// Controller pose update.
    Pose(PoseEvent),
    /// Button state change.
    Button(ButtonEvent),
}

impl From<PoseEvent> for ControllerEvent {
    fn from(event: PoseEvent) -> Self {
        Self::Pose(event)
    }
}

impl From<ButtonEvent> for ControllerEvent {
    fn from(event: ButtonEvent) -> Self {
        Self::Button(event)
    }
}

/// FIFO single-consumer event queue feeding a [`RigController`].
///
/// The transport pushes events as they arrive; the host pumps the queue,
/// delivering one event at a time. Each event is handled to completion
/// before the next is dequeued, so consecutive displacements have a clear
/// happens-before relationship. Producers on other threads must serialize
/// into this queue before events reach the controller.
#[derive(Debug, Default)]
pub struct EventQueue {
    queue: VecDeque<ControllerEvent>,
}

impl EventQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues an event.
    pub fn push(&mut self, event: impl Into<ControllerEvent>) {
        self.queue.push_back(event.into());
    }

    /// Number of pending events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the queue has no pending events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Delivers all pending events to the controller, in arrival order.
    pub fn pump(&mut self, controller: &mut RigController) {
        while let Some(event) = self.queue.pop_front() {
            controller.handle_event(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_preserves_fifo_order() {
        let mut queue = EventQueue::new();
        queue.push(ButtonEvent { value: 1 });
        queue.push(PoseEvent {
            transform: Pose::IDENTITY,
        });
        queue.push(ButtonEvent { value: 0 });

        assert_eq!(queue.len(), 3);
        assert_eq!(
            queue.queue.pop_front(),
            Some(ControllerEvent::Button(ButtonEvent { value: 1 }))
        );
        assert_eq!(
            queue.queue.pop_front(),
            Some(ControllerEvent::Pose(PoseEvent {
                transform: Pose::IDENTITY
            }))
        );
    }
}
