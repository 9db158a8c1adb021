//! End-to-end navigation scenario tests
//!
//! Walks the flipbook engine and session through complete reading
//! sessions and checks the derived visual state stays consistent at
//! every step.

use memorylane_book::flipbook::{Flipbook, Step};
use memorylane_book::render::render_plan;
use memorylane_book::session::BookSession;
use memorylane_book::SAMPLE_ALBUM_TOML;
use memorylane_common::Album;

/// Check the structural invariants that must hold at any position.
fn assert_consistent(book: &Flipbook) {
    let n = book.sheet_count();
    let pos = book.position();
    assert!(pos <= n);

    let plan = render_plan(book);

    // Flipped sheets form exactly the prefix [0, pos)
    for sheet in &plan.sheets {
        assert_eq!(sheet.visual.flipped, sheet.index < pos);
        assert_eq!(
            sheet.visual.rotation_deg,
            if sheet.index < pos { 180 } else { 0 }
        );
    }

    // At most one active face per side of the spine
    assert!(plan.sheets.iter().filter(|s| s.front_active).count() <= 1);
    assert!(plan.sheets.iter().filter(|s| s.back_active).count() <= 1);

    // Tap targets are exactly the stack tops
    for sheet in &plan.sheets {
        let expected = if sheet.index + 1 == pos {
            Some(Step::Backward)
        } else if sheet.index == pos && pos < n {
            Some(Step::Forward)
        } else {
            None
        };
        assert_eq!(book.tap_target(sheet.index), expected);
    }
}

#[test]
fn test_full_read_through_and_back() {
    let mut book = Flipbook::new(10);
    assert_consistent(&book);

    // Cover to end
    for step in 1..=10 {
        assert!(book.advance());
        assert_eq!(book.position(), step);
        assert_consistent(&book);
    }
    assert!(book.is_at_end());
    assert!(!book.advance());
    assert_consistent(&book);

    // End back to cover
    for step in (0..10).rev() {
        assert!(book.retreat());
        assert_eq!(book.position(), step);
        assert_consistent(&book);
    }
    assert!(book.is_at_cover());
    assert!(!book.retreat());
}

#[test]
fn test_mixed_tap_and_step_walk() {
    let mut book = Flipbook::new(6);

    // Interleave taps and direct steps; the engine never desyncs
    assert_eq!(book.tap_target(0), Some(Step::Forward));
    book.advance();
    book.advance();
    assert_eq!(book.tap_target(1), Some(Step::Backward));
    book.retreat();
    assert_eq!(book.position(), 1);
    assert_consistent(&book);
}

#[test]
fn test_labels_across_a_session() {
    let mut book = Flipbook::new(3);
    assert_eq!(book.label(), "Cover");
    book.advance();
    assert_eq!(book.label(), "Spread 1 / 3");
    book.advance();
    book.advance();
    assert_eq!(book.label(), "The End");
    book.retreat();
    assert_eq!(book.label(), "Spread 2 / 3");
}

#[tokio::test]
async fn test_session_over_sample_album() {
    let album = Album::from_toml_str(SAMPLE_ALBUM_TOML).expect("sample album parses");
    let session = BookSession::new(album.sheet_count());

    // Read the whole sample book
    let mut steps = 0;
    while session.advance().await {
        steps += 1;
    }
    assert_eq!(steps, album.sheet_count());

    let snap = session.snapshot().await;
    assert!(snap.at_end);
    assert_eq!(snap.position, album.sheet_count());
    assert_eq!(snap.label, "The End");

    // Every page referenced by the plan exists in the album
    let plan = session.render_plan().await;
    for sheet in &plan.sheets {
        assert!(album.sheet(sheet.index).is_some());
    }
}
