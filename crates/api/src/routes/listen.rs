use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Router,
};
use futures::stream::{self, Stream, StreamExt};
use landing_builder_core::events::StoreEvent;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/listen", get(listen))
}

/// Stream store events as server-sent events, starting with a welcome event.
/// A listener that falls behind skips the events it missed.
async fn listen(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.event_bus().subscribe();
    info!(
        listeners = state.event_bus().listener_count(),
        "listener connected"
    );

    let welcome = stream::once(async { Ok::<_, Infallible>(to_sse(&StoreEvent::Welcome)) });
    let events = stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(event) => return Some((Ok::<_, Infallible>(to_sse(&event)), rx)),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "listener lagged, events dropped");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(welcome.chain(events)).keep_alive(KeepAlive::default())
}

fn event_name(event: &StoreEvent) -> &'static str {
    match event {
        StoreEvent::Welcome => "welcome",
        StoreEvent::Created(_) => "created",
        StoreEvent::Updated(_) => "updated",
        StoreEvent::Deleted(_) => "deleted",
    }
}

fn to_sse(event: &StoreEvent) -> Event {
    let data = serde_json::to_string(event).unwrap_or_else(|e| {
        warn!(error = %e, "failed to encode store event");
        "{}".to_string()
    });
    Event::default().event(event_name(event)).data(data)
}
