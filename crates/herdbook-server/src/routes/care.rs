use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use herdbook_core::{
    care::{breeding_recommendations, breeding_status, vaccination_status},
    Animal, BreedingFilter, BreedingStatus, HealthFilter, VaccinationStatus,
};

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/health/animals", get(health_animals))
        .route("/api/breeding/animals", get(breeding_animals))
}

#[derive(Deserialize)]
struct HealthParams {
    #[serde(default)]
    q: String,
    #[serde(default)]
    status: HealthFilter,
}

#[derive(Deserialize)]
struct BreedingParams {
    #[serde(default)]
    q: String,
    #[serde(default)]
    status: BreedingFilter,
}

#[derive(Serialize)]
struct HealthRow {
    #[serde(flatten)]
    animal: Animal,
    vaccination: VaccinationStatus,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BreedingRow {
    #[serde(flatten)]
    animal: Animal,
    breeding_status: BreedingStatus,
    recommendations: Vec<&'static str>,
}

async fn health_animals(
    State(state): State<AppState>,
    Query(params): Query<HealthParams>,
) -> Json<Vec<HealthRow>> {
    let today = Utc::now().date_naive();
    let animals = state.animals.read().await;
    let rows = animals
        .health_view(&params.q, params.status)
        .into_iter()
        .map(|animal| HealthRow {
            vaccination: vaccination_status(&animal, today),
            animal,
        })
        .collect();
    Json(rows)
}

async fn breeding_animals(
    State(state): State<AppState>,
    Query(params): Query<BreedingParams>,
) -> Json<Vec<BreedingRow>> {
    let today = Utc::now().date_naive();
    let animals = state.animals.read().await;
    let rows = animals
        .breeding_view(&params.q, params.status, today)
        .into_iter()
        .map(|animal| BreedingRow {
            breeding_status: breeding_status(&animal, today),
            recommendations: breeding_recommendations(&animal, today),
            animal,
        })
        .collect();
    Json(rows)
}
