//! Event types for the MemoryLane event system
//!
//! Provides shared event definitions and the EventBus used to fan events
//! out to SSE clients.
//!
//! # Architecture
//!
//! MemoryLane uses hybrid communication:
//! - **EventBus** (tokio::broadcast): one-to-many event broadcasting
//! - **Shared state** (Arc<RwLock<T>>): read-heavy session access
//!
//! Feedback events (notably [`LaneEvent::FlipSoundRequested`]) are one-way
//! notifications: emission is lossy, carries no return value, and never
//! affects navigation state.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Direction of a completed page flip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipDirection {
    /// Sheet moved from the right (unread) stack to the left (read) stack
    Forward,
    /// Most recently flipped sheet moved back to the right stack
    Backward,
}

/// Overlay kinds shown above the book
///
/// While any overlay other than `None` is open, keyboard navigation is
/// suppressed so the book cannot be flipped underneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Overlay {
    /// No overlay open
    None,
    /// End-of-book memory video player
    MemoryVideo,
    /// About / instructions panel
    Info,
}

/// MemoryLane event types
///
/// Events are broadcast via EventBus and serialized for SSE transmission.
/// All events use this central enum for type safety and exhaustive matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LaneEvent {
    /// Play the short page-flip sound
    ///
    /// Fire-and-forget: emitted before the position change on every
    /// successful navigation step. Clients play it best-effort and
    /// swallow autoplay rejections.
    FlipSoundRequested {
        /// When the flip was requested
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A sheet finished flipping and the position changed
    ///
    /// Triggers:
    /// - SSE: re-render sheet transforms and the position label
    SheetFlipped {
        /// Flip direction
        direction: FlipDirection,
        /// New position after the flip (number of flipped sheets)
        position: usize,
        /// Total sheet count
        sheet_count: usize,
        /// Whether the book is now fully flipped
        at_end: bool,
        /// When the flip happened
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// The last sheet was flipped and the book reached its end state
    ///
    /// Triggers:
    /// - SSE: show the memory-video notification affordance
    BookCompleted {
        /// When the end was reached
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// The opening sequence finished and the book is interactive
    BookOpened {
        /// When the book was opened
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Overlay opened or closed
    OverlayChanged {
        /// Overlay now showing (None when closed)
        overlay: Overlay,
        /// When the overlay changed
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Background music toggled
    ///
    /// Advisory: the actual `<audio>` element lives in the client, which
    /// swallows playback failures without reporting them back.
    MusicStateChanged {
        /// Whether music is now playing
        playing: bool,
        /// When the state changed
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl LaneEvent {
    /// Event type name used for the SSE `event:` field
    pub fn event_type(&self) -> &'static str {
        match self {
            LaneEvent::FlipSoundRequested { .. } => "FlipSoundRequested",
            LaneEvent::SheetFlipped { .. } => "SheetFlipped",
            LaneEvent::BookCompleted { .. } => "BookCompleted",
            LaneEvent::BookOpened { .. } => "BookOpened",
            LaneEvent::OverlayChanged { .. } => "OverlayChanged",
            LaneEvent::MusicStateChanged { .. } => "MusicStateChanged",
        }
    }
}

/// Event bus for broadcasting events to all subscribers
///
/// Wraps tokio::sync::broadcast with a fixed capacity. Slow subscribers
/// miss old events rather than blocking emitters.
pub struct EventBus {
    tx: broadcast::Sender<LaneEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with the specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<LaneEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Ok(subscriber_count)` if at least one subscriber exists,
    /// `Err` otherwise.
    pub fn emit(
        &self,
        event: LaneEvent,
    ) -> std::result::Result<usize, broadcast::error::SendError<LaneEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring the case of no subscribers
    ///
    /// Used for fire-and-forget notifications such as the flip sound:
    /// nobody listening is not an error.
    pub fn emit_lossy(&self, event: LaneEvent) {
        let _ = self.tx.send(event);
    }

    /// Current number of subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_eventbus_new() {
        let bus = EventBus::new(100);
        assert_eq!(bus.capacity(), 100);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_eventbus_subscribe() {
        let bus = EventBus::new(100);
        let _rx = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);

        let _rx2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);
    }

    #[tokio::test]
    async fn test_eventbus_emit_no_subscribers() {
        let bus = EventBus::new(100);
        let event = LaneEvent::FlipSoundRequested {
            timestamp: chrono::Utc::now(),
        };

        // Should return error when no subscribers
        assert!(bus.emit(event).is_err());
    }

    #[tokio::test]
    async fn test_eventbus_emit_with_subscriber() {
        let bus = Arc::new(EventBus::new(100));
        let mut rx = bus.subscribe();

        let event = LaneEvent::SheetFlipped {
            direction: FlipDirection::Forward,
            position: 1,
            sheet_count: 10,
            at_end: false,
            timestamp: chrono::Utc::now(),
        };

        assert!(bus.emit(event).is_ok());

        let received = rx.recv().await.unwrap();
        match received {
            LaneEvent::SheetFlipped {
                direction,
                position,
                at_end,
                ..
            } => {
                assert_eq!(direction, FlipDirection::Forward);
                assert_eq!(position, 1);
                assert!(!at_end);
            }
            _ => panic!("Wrong event type received"),
        }
    }

    #[tokio::test]
    async fn test_eventbus_emit_lossy() {
        let bus = EventBus::new(100);
        let event = LaneEvent::FlipSoundRequested {
            timestamp: chrono::Utc::now(),
        };

        // Should not panic even without subscribers
        bus.emit_lossy(event);
    }

    #[test]
    fn test_event_serialization_is_tagged() {
        let event = LaneEvent::OverlayChanged {
            overlay: Overlay::MemoryVideo,
            timestamp: chrono::Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"OverlayChanged\""));
        assert!(json.contains("memory-video"));
    }

    #[test]
    fn test_event_type_names() {
        let event = LaneEvent::BookCompleted {
            timestamp: chrono::Utc::now(),
        };
        assert_eq!(event.event_type(), "BookCompleted");
    }
}
