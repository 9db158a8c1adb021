//! # MemoryLane Common Library
//!
//! Shared code for the MemoryLane scrapbook service including:
//! - Album content model (sheets, pages, photos, stickers)
//! - Event types (LaneEvent enum) and EventBus
//! - Configuration loading and album path resolution
//! - Common error types

pub mod album;
pub mod config;
pub mod error;
pub mod events;

pub use album::Album;
pub use error::{Error, Result};
