//! HTTP request handlers
//!
//! Implements the REST navigation surface. Navigation endpoints are total:
//! boundary attempts return 200 with `stepped: false`, never an error, so
//! UI controls stay safe under rapid repeated input.

use crate::api::server::AppContext;
use crate::input::KeyRequest;
use crate::render::RenderPlan;
use crate::session::SessionSnapshot;
use axum::{
    extract::{Path, State},
    Json,
};
use memorylane_common::events::Overlay;
use memorylane_common::Album;
use serde::{Deserialize, Serialize};
use tracing::info;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    module: String,
    version: String,
    port: u16,
    sheet_count: usize,
}

#[derive(Debug, Serialize)]
pub struct BuildInfoResponse {
    version: String,
    git_hash: String,
    build_timestamp: String,
    build_profile: String,
}

/// Result of a navigation attempt plus the resulting state
#[derive(Debug, Serialize)]
pub struct NavResponse {
    /// Whether the position actually changed
    pub stepped: bool,
    #[serde(flatten)]
    pub state: SessionSnapshot,
}

#[derive(Debug, Deserialize)]
pub struct OverlayRequest {
    pub overlay: Overlay,
}

#[derive(Debug, Serialize)]
pub struct MusicResponse {
    pub playing: bool,
}

// ============================================================================
// Health & Build Info
// ============================================================================

/// GET /health - Health check endpoint
pub async fn health(State(ctx): State<AppContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "memorylane-book".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        port: ctx.port,
        sheet_count: ctx.album.sheet_count(),
    })
}

/// GET /build_info - Build identification
pub async fn get_build_info() -> Json<BuildInfoResponse> {
    Json(BuildInfoResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: env!("GIT_HASH").to_string(),
        build_timestamp: env!("BUILD_TIMESTAMP").to_string(),
        build_profile: env!("BUILD_PROFILE").to_string(),
    })
}

// ============================================================================
// Content
// ============================================================================

/// GET /api/album - Full album content (read-only)
pub async fn get_album(State(ctx): State<AppContext>) -> Json<Album> {
    Json((*ctx.album).clone())
}

// ============================================================================
// Navigation
// ============================================================================

/// GET /api/book/state - Session state snapshot
pub async fn get_state(State(ctx): State<AppContext>) -> Json<SessionSnapshot> {
    Json(ctx.session.snapshot().await)
}

/// GET /api/book/render - Per-sheet render descriptors
pub async fn get_render(State(ctx): State<AppContext>) -> Json<RenderPlan> {
    Json(ctx.session.render_plan().await)
}

/// POST /api/book/next - Flip forward (controls bar / next button)
pub async fn next_sheet(State(ctx): State<AppContext>) -> Json<NavResponse> {
    let stepped = ctx.session.advance().await;
    Json(NavResponse {
        stepped,
        state: ctx.session.snapshot().await,
    })
}

/// POST /api/book/previous - Flip backward
pub async fn previous_sheet(State(ctx): State<AppContext>) -> Json<NavResponse> {
    let stepped = ctx.session.retreat().await;
    Json(NavResponse {
        stepped,
        state: ctx.session.snapshot().await,
    })
}

/// POST /api/book/sheets/:index/tap - Click-to-navigate
///
/// Out-of-range and non-adjacent indices are ignored, not errors.
pub async fn tap_sheet(
    State(ctx): State<AppContext>,
    Path(index): Path<usize>,
) -> Json<NavResponse> {
    let stepped = ctx.session.tap_sheet(index).await;
    Json(NavResponse {
        stepped,
        state: ctx.session.snapshot().await,
    })
}

/// POST /api/book/key - Keyboard navigation (overlay-aware)
pub async fn key_input(
    State(ctx): State<AppContext>,
    Json(req): Json<KeyRequest>,
) -> Json<NavResponse> {
    let stepped = ctx.session.handle_key(req.action).await;
    Json(NavResponse {
        stepped,
        state: ctx.session.snapshot().await,
    })
}

/// POST /api/book/open - Opening sequence finished
pub async fn open_book(State(ctx): State<AppContext>) -> Json<SessionSnapshot> {
    info!("Opening sequence complete");
    ctx.session.open_book().await;
    Json(ctx.session.snapshot().await)
}

// ============================================================================
// Shell state
// ============================================================================

/// POST /api/overlay - Open or close an overlay
pub async fn set_overlay(
    State(ctx): State<AppContext>,
    Json(req): Json<OverlayRequest>,
) -> Json<SessionSnapshot> {
    ctx.session.set_overlay(req.overlay).await;
    Json(ctx.session.snapshot().await)
}

/// POST /api/music/toggle - Toggle background music
pub async fn toggle_music(State(ctx): State<AppContext>) -> Json<MusicResponse> {
    let playing = ctx.session.toggle_music().await;
    Json(MusicResponse { playing })
}
