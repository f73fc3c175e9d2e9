use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::Utc;

use herdbook_core::{
    export::{milk_csv, milk_file_name, records_csv, records_file_name},
    RecordQuery,
};

use super::storage_failure;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/export/records.csv", get(export_records))
        .route("/api/export/milk.csv", get(export_milk))
}

fn csv_download(file_name: String, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        body,
    )
        .into_response()
}

/// Records view (same query parameters as the listing) as CSV.
async fn export_records(
    State(state): State<AppState>,
    Query(query): Query<RecordQuery>,
) -> Response {
    let today = Utc::now().date_naive();
    let animals = state.animals.read().await;
    match records_csv(&animals.records(&query)) {
        Ok(body) => csv_download(records_file_name(today), body),
        Err(e) => storage_failure(e),
    }
}

/// The whole herd in collection order.
async fn export_milk(State(state): State<AppState>) -> Response {
    let today = Utc::now().date_naive();
    let animals = state.animals.read().await;
    match milk_csv(animals.animals()) {
        Ok(body) => csv_download(milk_file_name(today), body),
        Err(e) => storage_failure(e),
    }
}
