//! MemoryLane Book (memorylane-book) - Main entry point
//!
//! Serves a digital scrapbook flipbook: album content, the page-flip
//! navigation API, an SSE feedback stream, and the embedded browser UI.

use anyhow::{Context, Result};
use clap::Parser;
use memorylane_common::config::{AlbumPathResolver, CompiledDefaults};
use memorylane_common::Album;
use memorylane_book::api::{self, AppContext};
use memorylane_book::SAMPLE_ALBUM_TOML;
use std::path::PathBuf;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for memorylane-book
#[derive(Parser, Debug)]
#[command(name = "memorylane-book")]
#[command(about = "Digital scrapbook flipbook service")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "MEMORYLANE_PORT")]
    port: Option<u16>,

    /// Album TOML file (falls back to env, config file, then the built-in sample)
    #[arg(short, long)]
    album: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let defaults = CompiledDefaults::for_current_platform();
    let resolver = AlbumPathResolver::new("memorylane-book");

    // Initialize tracing: RUST_LOG wins, then the config file's
    // logging.level, then the compiled default
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    resolver.config().logging.directive_or(&defaults.log_level),
                )
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting MemoryLane Book v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    let port = args
        .port
        .or(resolver.config().port)
        .unwrap_or(defaults.port);

    // Load the album, degrading to the built-in sample on failure
    let album = match resolver.resolve(args.album.as_ref()) {
        Some(path) => match Album::load(&path) {
            Ok(album) => {
                info!("Loaded album: {} ({})", album.title, path.display());
                album
            }
            Err(e) => {
                warn!("Could not load {}: {} - using built-in sample", path.display(), e);
                Album::from_toml_str(SAMPLE_ALBUM_TOML)
                    .context("Built-in sample album is malformed")?
            }
        },
        None => Album::from_toml_str(SAMPLE_ALBUM_TOML)
            .context("Built-in sample album is malformed")?,
    };

    info!(
        "Album \"{}\": {} sheets ({} pages)",
        album.title,
        album.sheet_count(),
        album.sheet_count() * 2
    );

    let ctx = AppContext::new(album, port);
    api::server::run(ctx, shutdown_signal()).await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
