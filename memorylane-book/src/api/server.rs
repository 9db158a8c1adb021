//! HTTP server setup and routing
//!
//! Sets up the Axum router with the embedded UI, the navigation surface,
//! and the SSE event stream.

use crate::error::{Error, Result};
use crate::session::BookSession;
use axum::{
    routing::{get, post},
    Router,
};
use memorylane_common::Album;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Shared application context passed to all handlers
#[derive(Clone)]
pub struct AppContext {
    /// Album content, fixed for the session
    pub album: Arc<Album>,
    /// Navigation session state
    pub session: Arc<BookSession>,
    /// Listen port (reported by /health)
    pub port: u16,
}

impl AppContext {
    /// Create a context with a fresh session over the album
    pub fn new(album: Album, port: u16) -> Self {
        let session = Arc::new(BookSession::new(album.sheet_count()));
        Self {
            album: Arc::new(album),
            session,
            port,
        }
    }
}

/// Build the application router
pub fn build_router(ctx: AppContext) -> Router {
    Router::new()
        // Embedded browser UI
        .route("/", get(super::ui::serve_index))
        .route("/static/app.js", get(super::ui::serve_app_js))
        .route("/static/style.css", get(super::ui::serve_style_css))

        // Health and build identification
        .route("/health", get(super::handlers::health))
        .route("/build_info", get(super::handlers::get_build_info))

        // Content (read-only)
        .route("/api/album", get(super::handlers::get_album))

        // Navigation surface
        .route("/api/book/state", get(super::handlers::get_state))
        .route("/api/book/render", get(super::handlers::get_render))
        .route("/api/book/next", post(super::handlers::next_sheet))
        .route("/api/book/previous", post(super::handlers::previous_sheet))
        .route("/api/book/sheets/:index/tap", post(super::handlers::tap_sheet))
        .route("/api/book/key", post(super::handlers::key_input))
        .route("/api/book/open", post(super::handlers::open_book))

        // Shell state
        .route("/api/overlay", post(super::handlers::set_overlay))
        .route("/api/music/toggle", post(super::handlers::toggle_music))

        // SSE event stream
        .route("/api/events", get(super::sse::event_stream))

        .with_state(ctx)
        // Enable CORS for local access
        .layer(CorsLayer::permissive())
}

/// Run the HTTP server until shutdown
pub async fn run(ctx: AppContext, shutdown: impl std::future::Future<Output = ()> + Send + 'static) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], ctx.port));
    let app = build_router(ctx);

    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Http(format!("Failed to bind to {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| Error::Http(format!("Server error: {}", e)))?;

    Ok(())
}
