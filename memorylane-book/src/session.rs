//! Shared book session state
//!
//! Thread-safe session shared between HTTP handlers and the SSE stream.
//! Holds the one piece of mutable navigation state (the engine position)
//! plus the UI-facing flags from the original app shell: which overlay is
//! open, whether background music plays, and whether the opening sequence
//! has finished.
//!
//! Every successful navigation step emits the flip-sound trigger first,
//! then mutates position, then reports the flip. Emission is lossy: no
//! connected client is not an error and never blocks navigation.

use crate::flipbook::{Flipbook, Step};
use crate::input::KeyAction;
use crate::render::{render_plan, RenderPlan};
use memorylane_common::events::{EventBus, FlipDirection, LaneEvent, Overlay};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;

/// Snapshot of session state returned by the state endpoint
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub position: usize,
    pub sheet_count: usize,
    pub at_cover: bool,
    pub at_end: bool,
    pub label: String,
    pub overlay: Overlay,
    pub music_playing: bool,
    pub opened: bool,
}

/// Shared session state accessible by all handlers
pub struct BookSession {
    book: RwLock<Flipbook>,
    overlay: RwLock<Overlay>,
    music_playing: RwLock<bool>,
    opened: RwLock<bool>,
    events: EventBus,
}

impl BookSession {
    /// Create a session over `sheet_count` sheets, closed at the cover
    pub fn new(sheet_count: usize) -> Self {
        Self {
            book: RwLock::new(Flipbook::new(sheet_count)),
            overlay: RwLock::new(Overlay::None),
            music_playing: RwLock::new(false),
            opened: RwLock::new(false),
            events: EventBus::new(100),
        }
    }

    /// Event bus for SSE subscription
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Current state snapshot
    pub async fn snapshot(&self) -> SessionSnapshot {
        let book = *self.book.read().await;
        SessionSnapshot {
            position: book.position(),
            sheet_count: book.sheet_count(),
            at_cover: book.is_at_cover(),
            at_end: book.is_at_end(),
            label: book.label(),
            overlay: *self.overlay.read().await,
            music_playing: *self.music_playing.read().await,
            opened: *self.opened.read().await,
        }
    }

    /// Current render plan
    pub async fn render_plan(&self) -> RenderPlan {
        render_plan(&*self.book.read().await)
    }

    /// Flip forward; no-op past the end. Returns whether a step was taken.
    pub async fn advance(&self) -> bool {
        let mut book = self.book.write().await;
        if book.position() >= book.sheet_count() {
            return false;
        }
        // Sound first, then the position change (fire-and-forget)
        self.events.emit_lossy(LaneEvent::FlipSoundRequested {
            timestamp: chrono::Utc::now(),
        });
        book.advance();
        self.report_flip(&book, FlipDirection::Forward);
        true
    }

    /// Flip backward; no-op at the cover. Returns whether a step was taken.
    pub async fn retreat(&self) -> bool {
        let mut book = self.book.write().await;
        if book.position() == 0 {
            return false;
        }
        self.events.emit_lossy(LaneEvent::FlipSoundRequested {
            timestamp: chrono::Utc::now(),
        });
        book.retreat();
        self.report_flip(&book, FlipDirection::Backward);
        true
    }

    fn report_flip(&self, book: &Flipbook, direction: FlipDirection) {
        let at_end = book.is_at_end();
        self.events.emit_lossy(LaneEvent::SheetFlipped {
            direction,
            position: book.position(),
            sheet_count: book.sheet_count(),
            at_end,
            timestamp: chrono::Utc::now(),
        });
        if at_end && direction == FlipDirection::Forward {
            self.events.emit_lossy(LaneEvent::BookCompleted {
                timestamp: chrono::Utc::now(),
            });
        }
    }

    /// Click-to-navigate on sheet `index`
    ///
    /// Only the top of either stack responds; other sheets are ignored.
    pub async fn tap_sheet(&self, index: usize) -> bool {
        let step = {
            let book = self.book.read().await;
            book.tap_target(index)
        };
        match step {
            Some(Step::Forward) => self.advance().await,
            Some(Step::Backward) => self.retreat().await,
            None => {
                debug!("Ignored tap on non-adjacent sheet {}", index);
                false
            }
        }
    }

    /// Keyboard navigation
    ///
    /// Next/previous are suppressed while any overlay is open so the book
    /// cannot be flipped underneath it. Escape closes the overlay.
    pub async fn handle_key(&self, action: KeyAction) -> bool {
        let overlay = *self.overlay.read().await;
        match action {
            KeyAction::Next if overlay == Overlay::None => self.advance().await,
            KeyAction::Previous if overlay == Overlay::None => self.retreat().await,
            KeyAction::CloseOverlay if overlay != Overlay::None => {
                self.set_overlay(Overlay::None).await;
                true
            }
            _ => {
                debug!("Suppressed key {:?} (overlay: {:?})", action, overlay);
                false
            }
        }
    }

    /// Open or close an overlay
    pub async fn set_overlay(&self, overlay: Overlay) {
        let mut current = self.overlay.write().await;
        if *current != overlay {
            *current = overlay;
            self.events.emit_lossy(LaneEvent::OverlayChanged {
                overlay,
                timestamp: chrono::Utc::now(),
            });
        }
    }

    /// Toggle background music; returns the new state
    ///
    /// Advisory only: the client owns the `<audio>` element and swallows
    /// autoplay rejections without reporting back.
    pub async fn toggle_music(&self) -> bool {
        let mut playing = self.music_playing.write().await;
        *playing = !*playing;
        self.events.emit_lossy(LaneEvent::MusicStateChanged {
            playing: *playing,
            timestamp: chrono::Utc::now(),
        });
        *playing
    }

    /// Mark the opening sequence finished
    ///
    /// The opening gesture is also what authorizes audio, so music starts
    /// with it. Idempotent.
    pub async fn open_book(&self) {
        let mut opened = self.opened.write().await;
        if !*opened {
            *opened = true;
            self.events.emit_lossy(LaneEvent::BookOpened {
                timestamp: chrono::Utc::now(),
            });
            drop(opened);
            let mut playing = self.music_playing.write().await;
            if !*playing {
                *playing = true;
                self.events.emit_lossy(LaneEvent::MusicStateChanged {
                    playing: true,
                    timestamp: chrono::Utc::now(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_advance_emits_sound_then_flip() {
        let session = BookSession::new(3);
        let mut rx = session.events().subscribe();

        assert!(session.advance().await);

        match rx.recv().await.unwrap() {
            LaneEvent::FlipSoundRequested { .. } => {}
            other => panic!("Expected FlipSoundRequested first, got {:?}", other),
        }
        match rx.recv().await.unwrap() {
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
            other => panic!("Expected SheetFlipped, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_boundary_advance_emits_nothing() {
        let session = BookSession::new(0);
        let mut rx = session.events().subscribe();

        assert!(!session.advance().await);
        assert!(!session.retreat().await);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_completion_event_on_reaching_end() {
        let session = BookSession::new(2);
        let mut rx = session.events().subscribe();

        session.advance().await;
        session.advance().await;

        let mut saw_completed = false;
        while let Ok(event) = rx.try_recv() {
            if matches!(event, LaneEvent::BookCompleted { .. }) {
                saw_completed = true;
            }
        }
        assert!(saw_completed);

        // Retreating from the end does not complete again
        session.retreat().await;
        while let Ok(event) = rx.try_recv() {
            assert!(!matches!(event, LaneEvent::BookCompleted { .. }));
        }
    }

    #[tokio::test]
    async fn test_navigation_works_without_subscribers() {
        // Fire-and-forget: no SSE client connected must not matter
        let session = BookSession::new(2);
        assert!(session.advance().await);
        assert_eq!(session.snapshot().await.position, 1);
    }

    #[tokio::test]
    async fn test_tap_adjacency_guard() {
        let session = BookSession::new(10);
        for _ in 0..3 {
            session.advance().await;
        }

        // Top of right stack advances
        assert!(session.tap_sheet(3).await);
        assert_eq!(session.snapshot().await.position, 4);

        // Non-adjacent sheet ignored
        assert!(!session.tap_sheet(7).await);
        assert_eq!(session.snapshot().await.position, 4);

        // Top of left stack retreats
        assert!(session.tap_sheet(3).await);
        assert_eq!(session.snapshot().await.position, 3);
    }

    #[tokio::test]
    async fn test_keyboard_suppressed_while_overlay_open() {
        let session = BookSession::new(5);
        session.advance().await;
        session.set_overlay(Overlay::MemoryVideo).await;

        assert!(!session.handle_key(KeyAction::Next).await);
        assert!(!session.handle_key(KeyAction::Previous).await);
        assert_eq!(session.snapshot().await.position, 1);

        // Escape closes the overlay, then navigation works again
        assert!(session.handle_key(KeyAction::CloseOverlay).await);
        assert!(session.handle_key(KeyAction::Next).await);
        assert_eq!(session.snapshot().await.position, 2);
    }

    #[tokio::test]
    async fn test_overlay_change_is_idempotent() {
        let session = BookSession::new(1);
        let mut rx = session.events().subscribe();

        session.set_overlay(Overlay::Info).await;
        session.set_overlay(Overlay::Info).await;

        assert!(matches!(
            rx.try_recv().unwrap(),
            LaneEvent::OverlayChanged { overlay: Overlay::Info, .. }
        ));
        // Second set was a no-op
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_open_book_starts_music_once() {
        let session = BookSession::new(1);

        session.open_book().await;
        let snap = session.snapshot().await;
        assert!(snap.opened);
        assert!(snap.music_playing);

        // Idempotent
        let mut rx = session.events().subscribe();
        session.open_book().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_music_toggle() {
        let session = BookSession::new(1);
        assert!(session.toggle_music().await);
        assert!(!session.toggle_music().await);
        assert!(!session.snapshot().await.music_playing);
    }
}
