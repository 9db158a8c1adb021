//! Navigation input mapping
//!
//! Keyboard and pointer events arrive from the browser as small JSON
//! bodies; this module maps them onto engine operations. Keyboard
//! navigation is suppressed while an overlay is open (the session checks
//! that guard); sheet taps carry their own adjacency guard in the engine.

use serde::{Deserialize, Serialize};

/// Keyboard navigation actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyAction {
    /// Designated "next" input (ArrowRight in the stock UI)
    Next,
    /// Designated "previous" input (ArrowLeft)
    Previous,
    /// Close the open overlay (Escape)
    CloseOverlay,
}

/// Keyboard request body
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KeyRequest {
    pub action: KeyAction,
}
