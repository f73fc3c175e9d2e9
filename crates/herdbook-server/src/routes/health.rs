use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Ready once the herd has been loaded from storage.
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    if state.animals.read().await.is_loading() {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse { status: "loading" }),
        );
    }
    (StatusCode::OK, Json(HealthResponse { status: "ok" }))
}
