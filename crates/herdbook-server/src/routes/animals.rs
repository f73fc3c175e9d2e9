use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use herdbook_core::{
    stats::{RECENT_ANIMALS, TOP_PRODUCERS},
    AnimalPatch, Category, NewAnimal, RecordQuery, Validator,
};

use super::storage_failure;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/animals", get(list_animals).post(create_animal))
        .route("/api/animals/search", get(search_animals))
        .route("/api/animals/top", get(top_producers))
        .route("/api/animals/recent", get(recent_animals))
        .route("/api/animals/category/{category}", get(animals_in_category))
        .route(
            "/api/animals/{id}",
            get(get_animal).patch(update_animal).delete(delete_animal),
        )
}

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

#[derive(Deserialize)]
struct LimitParams {
    limit: Option<usize>,
}

async fn list_animals(
    State(state): State<AppState>,
    Query(query): Query<RecordQuery>,
) -> Response {
    let animals = state.animals.read().await;
    Json(animals.records(&query)).into_response()
}

async fn search_animals(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let animals = state.animals.read().await;
    Json(animals.search(&params.q)).into_response()
}

async fn animals_in_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Response {
    let animals = state.animals.read().await;
    Json(animals.filter_by_category(Category::parse(&category))).into_response()
}

async fn top_producers(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Response {
    let animals = state.animals.read().await;
    Json(animals.top_producers(params.limit.unwrap_or(TOP_PRODUCERS))).into_response()
}

async fn recent_animals(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Response {
    let animals = state.animals.read().await;
    Json(animals.recent(params.limit.unwrap_or(RECENT_ANIMALS))).into_response()
}

async fn get_animal(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let animals = state.animals.read().await;
    match animals.get_by_id(&id) {
        Some(animal) => Json(animal).into_response(),
        None => (StatusCode::NOT_FOUND, "Animal not found").into_response(),
    }
}

async fn create_animal(
    State(state): State<AppState>,
    Json(data): Json<NewAnimal>,
) -> Response {
    if let Err(e) = Validator::validate_new_animal(&data) {
        return (StatusCode::BAD_REQUEST, format!("Validation error: {}", e)).into_response();
    }

    let mut animals = state.animals.write().await;
    match animals.add(data) {
        Ok(animal) => (StatusCode::CREATED, Json(animal)).into_response(),
        Err(e) => storage_failure(e),
    }
}

async fn update_animal(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<AnimalPatch>,
) -> Response {
    if let Err(e) = Validator::validate_patch(&patch) {
        return (StatusCode::BAD_REQUEST, format!("Validation error: {}", e)).into_response();
    }

    let mut animals = state.animals.write().await;
    match animals.update(&id, patch) {
        Ok(Some(animal)) => Json(animal).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Animal not found").into_response(),
        Err(e) => storage_failure(e),
    }
}

async fn delete_animal(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let mut animals = state.animals.write().await;
    match animals.remove(&id) {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => (StatusCode::NOT_FOUND, "Animal not found").into_response(),
        Err(e) => storage_failure(e),
    }
}
