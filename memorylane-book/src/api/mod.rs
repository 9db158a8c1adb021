//! HTTP API for the flipbook service

pub mod handlers;
pub mod server;
pub mod sse;
pub mod ui;

pub use server::{build_router, AppContext};
