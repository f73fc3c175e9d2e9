use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;

use herdbook_core::{Notification, Notifier, Validator};
use herdbook_services::{
    random_milk_yield, with_timeout, Identifier, ScanError, ScanResult, SCAN_OWNER,
};

use super::storage_failure;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/scan", post(scan_image))
        .route("/api/scan/save", post(save_scan))
}

/// Identify the animal in the uploaded image bytes.
async fn scan_image(State(state): State<AppState>, image: Bytes) -> Response {
    let result = with_timeout(state.service_timeout, state.identifier.identify(&image)).await;

    match result {
        Ok(scan) => {
            state
                .toasts
                .notify(Notification::success("Iris scan completed successfully!"));
            Json(scan).into_response()
        }
        Err(e) => {
            tracing::warn!("Scan failed: {}", e);
            state
                .toasts
                .notify(Notification::error("Failed to process image. Please try again."));
            let status = match e {
                ScanError::EmptyImage => StatusCode::BAD_REQUEST,
                ScanError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
                ScanError::Failed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, e.to_string()).into_response()
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaveScanRequest {
    result: ScanResult,
    owner: Option<String>,
    milk_yield: Option<f64>,
    image: Option<String>,
}

/// Register a scanned animal. Owner and yield default to the scan owner
/// and a random daily yield.
async fn save_scan(
    State(state): State<AppState>,
    Json(request): Json<SaveScanRequest>,
) -> Response {
    let owner = request.owner.as_deref().unwrap_or(SCAN_OWNER);
    let milk_yield = request.milk_yield.unwrap_or_else(random_milk_yield);
    let data = request.result.into_new_animal(owner, milk_yield, request.image);

    if let Err(e) = Validator::validate_new_animal(&data) {
        return (StatusCode::BAD_REQUEST, format!("Validation error: {}", e)).into_response();
    }

    let mut animals = state.animals.write().await;
    match animals.add(data) {
        Ok(animal) => {
            state
                .toasts
                .notify(Notification::success("Animal saved successfully!"));
            (StatusCode::CREATED, Json(animal)).into_response()
        }
        Err(e) => storage_failure(e),
    }
}
