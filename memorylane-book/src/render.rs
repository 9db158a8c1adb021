//! Render plan derivation
//!
//! Builds the descriptor list the page renderer consumes: one entry per
//! sheet with transform state and face-activity flags. Derived fresh from
//! the engine position on every request; never cached or mutated.

use crate::flipbook::{Flipbook, SheetVisual};
use serde::{Deserialize, Serialize};

/// Render descriptor for one sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetRender {
    /// Sheet index in the album sequence
    pub index: usize,
    /// Transform state (rotation, depth, paint order)
    #[serde(flatten)]
    pub visual: SheetVisual,
    /// Front face is the fully visible right-hand page
    pub front_active: bool,
    /// Back face is the fully visible left-hand page
    pub back_active: bool,
}

/// Render plan for the whole book at one position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderPlan {
    pub position: usize,
    pub sheet_count: usize,
    pub at_cover: bool,
    pub at_end: bool,
    pub label: String,
    pub sheets: Vec<SheetRender>,
}

/// Compute the render plan for the given engine state
pub fn render_plan(book: &Flipbook) -> RenderPlan {
    let sheets = (0..book.sheet_count())
        .map(|index| {
            // In range by construction
            let visual = book
                .visual_state(index)
                .unwrap_or(SheetVisual {
                    flipped: false,
                    rotation_deg: 0,
                    z_offset: 0.0,
                    layer_order: 0,
                });
            SheetRender {
                index,
                visual,
                front_active: book.front_active(index),
                back_active: book.back_active(index),
            }
        })
        .collect();

    RenderPlan {
        position: book.position(),
        sheet_count: book.sheet_count(),
        at_cover: book.is_at_cover(),
        at_end: book.is_at_end(),
        label: book.label(),
        sheets,
    }
}
