//! Server-Sent Events (SSE) stream
//!
//! Bridges the session EventBus to connected browsers. This is the
//! delivery path for the fire-and-forget feedback events: a client that
//! lags or disconnects simply misses events, navigation never notices.

use crate::api::server::AppContext;
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::{Stream, StreamExt};
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, warn};
use uuid::Uuid;

/// GET /api/events - SSE event stream
pub async fn event_stream(
    State(ctx): State<AppContext>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    debug!(
        "New SSE client connected ({} already subscribed)",
        ctx.session.events().subscriber_count()
    );

    let rx = ctx.session.events().subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| async move {
        match result {
            Ok(event) => match serde_json::to_string(&event) {
                Ok(json) => {
                    let event_type = event.event_type();
                    debug!("Broadcasting SSE event: {}", event_type);
                    Some(Ok(Event::default()
                        .id(Uuid::new_v4().to_string())
                        .event(event_type)
                        .data(json)))
                }
                Err(e) => {
                    warn!("Failed to serialize event: {}", e);
                    None
                }
            },
            Err(e) => {
                // BroadcastStream error (lagged or closed)
                warn!("SSE stream error: {:?}", e);
                None
            }
        }
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}
