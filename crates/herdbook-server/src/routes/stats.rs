use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;

use herdbook_core::{BreedingSummary, HealthSummary, YieldStats};

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/stats/yield", get(yield_stats))
        .route("/api/stats/health", get(health_stats))
        .route("/api/stats/breeding", get(breeding_stats))
}

async fn yield_stats(State(state): State<AppState>) -> Json<YieldStats> {
    Json(state.animals.read().await.compute_yield_statistics())
}

async fn health_stats(State(state): State<AppState>) -> Json<HealthSummary> {
    let today = Utc::now().date_naive();
    Json(state.animals.read().await.health_summary(today))
}

async fn breeding_stats(State(state): State<AppState>) -> Json<BreedingSummary> {
    let today = Utc::now().date_naive();
    Json(state.animals.read().await.breeding_summary(today))
}
