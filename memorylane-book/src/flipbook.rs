//! Flipbook engine — position state machine and per-sheet transform math
//!
//! The engine owns a single integer: `position` in `[0, N]` where N is the
//! sheet count. Position 0 is the closed cover; position N means every
//! sheet has moved to the left stack ("The End"). N is intentionally one
//! past the last sheet index: it is a real, reversible state with its own
//! UI affordances, not an off-by-one.
//!
//! Navigation is total: out-of-range attempts are silent no-ops so the
//! operations stay safe under rapid repeated input at the boundaries.
//! Everything visual is derived on demand from `(index, position)` —
//! nothing is cached, so renderers stay stateless consumers.

use serde::{Deserialize, Serialize};

/// Visual thickness of one sheet in the stacks, in renderer units (px)
pub const SHEET_THICKNESS: f32 = 1.0;

/// Direction a navigation step moved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Forward,
    Backward,
}

/// Derived visual state for a single sheet
///
/// Pure function of `(index, position)`; recomputed per render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheetVisual {
    /// Whether the sheet sits on the left (read) stack
    pub flipped: bool,
    /// Rotation about the spine axis in degrees (0 or 180)
    pub rotation_deg: i32,
    /// Depth offset along the view axis, in renderer units
    ///
    /// Left stack: `-index * thickness` (lower indices further back).
    /// Right stack: `(N - index) * thickness` (next sheet to flip on top).
    pub z_offset: f32,
    /// Paint/interaction order; higher draws nearer the viewer
    pub layer_order: usize,
}

/// The flipbook position state machine
///
/// Holds no content: the album sheet count is fixed at construction and
/// sheets are addressed by index only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flipbook {
    sheet_count: usize,
    position: usize,
}

impl Flipbook {
    /// Create a flipbook over `sheet_count` sheets, closed at the cover
    pub fn new(sheet_count: usize) -> Self {
        Self {
            sheet_count,
            position: 0,
        }
    }

    /// Total sheet count N
    pub fn sheet_count(&self) -> usize {
        self.sheet_count
    }

    /// Current position: the number of flipped sheets, in `[0, N]`
    pub fn position(&self) -> usize {
        self.position
    }

    /// Flip the next sheet onto the left stack
    ///
    /// No-op past the end; returns whether a step was taken.
    pub fn advance(&mut self) -> bool {
        if self.position < self.sheet_count {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Flip the most recently flipped sheet back onto the right stack
    ///
    /// No-op at the cover; returns whether a step was taken.
    pub fn retreat(&mut self) -> bool {
        if self.position > 0 {
            self.position -= 1;
            true
        } else {
            false
        }
    }

    /// Whether sheet `index` is on the left (read) stack
    ///
    /// The flipped set is always the prefix `0..position`.
    pub fn is_flipped(&self, index: usize) -> bool {
        index < self.position
    }

    /// Whether every sheet has been flipped
    pub fn is_at_end(&self) -> bool {
        self.position == self.sheet_count
    }

    /// Whether the book is still closed at the cover
    pub fn is_at_cover(&self) -> bool {
        self.position == 0
    }

    /// Derived visual state for sheet `index`
    ///
    /// Returns `None` for indices outside `[0, N)`.
    pub fn visual_state(&self, index: usize) -> Option<SheetVisual> {
        if index >= self.sheet_count {
            return None;
        }
        let flipped = self.is_flipped(index);
        let (rotation_deg, z_offset, layer_order) = if flipped {
            // Left stack: top item is the largest flipped index
            (180, -(index as f32) * SHEET_THICKNESS, index)
        } else {
            // Right stack: top item is the current index
            (
                0,
                (self.sheet_count - index) as f32 * SHEET_THICKNESS,
                self.sheet_count - index,
            )
        };
        Some(SheetVisual {
            flipped,
            rotation_deg,
            z_offset,
            layer_order,
        })
    }

    /// Whether the front face of sheet `index` is the fully visible page
    ///
    /// Advisory: the renderer uses this for visual emphasis only.
    pub fn front_active(&self, index: usize) -> bool {
        !self.is_flipped(index) && index == self.position
    }

    /// Whether the back face of sheet `index` is the fully visible page
    pub fn back_active(&self, index: usize) -> bool {
        self.is_flipped(index) && index + 1 == self.position
    }

    /// Map a click on sheet `index` to a navigation step
    ///
    /// Only the top of either stack responds: the current unflipped sheet
    /// advances, the most recently flipped sheet retreats. Every other
    /// sheet is ignored, which keeps the flipped set a contiguous prefix
    /// even under misclicks.
    pub fn tap_target(&self, index: usize) -> Option<Step> {
        if index >= self.sheet_count {
            return None;
        }
        if self.is_flipped(index) {
            (index + 1 == self.position).then_some(Step::Backward)
        } else {
            (index == self.position).then_some(Step::Forward)
        }
    }

    /// Position label shown in the controls bar
    pub fn label(&self) -> String {
        if self.is_at_cover() {
            "Cover".to_string()
        } else if self.is_at_end() {
            "The End".to_string()
        } else {
            format!("Spread {} / {}", self.position, self.sheet_count)
        }
    }
}
