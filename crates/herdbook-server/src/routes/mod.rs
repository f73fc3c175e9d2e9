pub mod animals;
pub mod auth;
pub mod care;
pub mod export;
pub mod health;
pub mod notifications;
pub mod scan;
pub mod stats;

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use herdbook_core::StorageError;

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .merge(health::routes())
        .merge(animals::routes())
        .merge(stats::routes())
        .merge(care::routes())
        .merge(export::routes())
        .merge(scan::routes())
        .merge(auth::routes())
        .merge(notifications::routes())
        .layer(cors)
        .with_state(state)
}

/// 500 response for a failed read or write of the key-value store.
fn storage_failure(e: StorageError) -> Response {
    tracing::error!("Storage error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Storage error: {}", e),
    )
        .into_response()
}
