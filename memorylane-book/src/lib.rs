//! memorylane-book library - Flipbook service module
//!
//! The flipbook engine, session state, and HTTP surface for the
//! MemoryLane digital scrapbook.

pub mod api;
pub mod error;
pub mod flipbook;
pub mod input;
pub mod render;
pub mod session;

pub use error::{Error, Result};

/// Built-in sample album, used when no album file is configured
pub const SAMPLE_ALBUM_TOML: &str = include_str!("../content/sample_album.toml");
