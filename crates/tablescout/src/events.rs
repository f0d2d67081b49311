//! Typed detection events for the overlay and agent collaborators.
//!
//! A fixed set of producers and consumers exchange [`DetectionEvent`] values
//! through the [`EventSink`] trait — direct typed delivery instead of a
//! string-keyed broadcast. [`ChannelSink`] adapts a standard mpsc sender;
//! [`NullSink`] discards everything.

use std::sync::mpsc::Sender;

use crate::strategy::DetectionStrategy;
use tablescout_core::RectBounds;

/// Progress and outcome notifications emitted during a detection run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DetectionEvent {
    /// A detection run began.
    Started,
    /// A strategy is about to run.
    StrategyAttempted(DetectionStrategy),
    /// A strategy completed without a confident result.
    StrategyMissed(DetectionStrategy),
    /// The run produced a confident rectangle in layer coordinates.
    Resolved(RectBounds),
    /// Every strategy missed; the caller should draw nothing.
    Unresolved,
}

/// Consumer of detection events.
pub trait EventSink {
    /// Receive one event. Delivery failures are the sink's concern; the
    /// detector never blocks on a consumer.
    fn emit(&self, event: DetectionEvent);
}

/// Sink that forwards events over a standard mpsc channel.
///
/// A disconnected receiver drops events silently.
pub struct ChannelSink {
    sender: Sender<DetectionEvent>,
}

impl ChannelSink {
    pub fn new(sender: Sender<DetectionEvent>) -> Self {
        Self { sender }
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: DetectionEvent) {
        let _ = self.sender.send(event);
    }
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: DetectionEvent) {}
}
