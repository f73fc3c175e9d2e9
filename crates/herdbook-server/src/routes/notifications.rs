use axum::{extract::State, routing::get, Json, Router};

use herdbook_core::Notification;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/notifications", get(drain_notifications))
}

/// Notifications raised since the last call, oldest first.
async fn drain_notifications(State(state): State<AppState>) -> Json<Vec<Notification>> {
    Json(state.toasts.drain())
}
