use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

/// Health check routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/ping", get(ping))
}

/// Store size, live listeners and whether generation is configured.
async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let pages = state.store().read().await.len();
    let generation = if state.config().gemini_api_key.is_some() {
        "configured"
    } else {
        "disabled"
    };

    Json(json!({
        "status": "ok",
        "pages": pages,
        "listeners": state.event_bus().listener_count(),
        "generation": generation,
    }))
}

async fn ping() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
