use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use herdbook_server::{create_router, AppState, Config};

/// Create a test app backed by a fresh redb file with instant services.
fn create_test_app() -> (TempDir, Router) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::for_testing(dir.path().join("test.redb"));
    let state = AppState::open(&config).unwrap();
    (dir, create_router(state))
}

/// Helper to get response body as string.
async fn body_string(body: Body) -> String {
    let bytes = body.collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(body: Body) -> serde_json::Value {
    serde_json::from_str(&body_string(body).await).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn send_json(method: &str, uri: &str, json: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

fn animal_ids(json: &serde_json::Value) -> Vec<String> {
    json.as_array()
        .unwrap()
        .iter()
        .map(|a| a["animalId"].as_str().unwrap().to_string())
        .collect()
}

// ============================================================================
// Health endpoint tests
// ============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (_dir, app) = create_test_app();

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response.into_body()).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_ready_after_load() {
    let (_dir, app) = create_test_app();

    let response = app.oneshot(get("/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// ============================================================================
// Records tests
// ============================================================================

#[tokio::test]
async fn test_list_seeded_animals() {
    let (_dir, app) = create_test_app();

    let response = app.oneshot(get("/api/animals")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response.into_body()).await;
    assert_eq!(
        animal_ids(&json),
        vec!["CT001", "BF002", "JR003", "SW004", "GR005"]
    );
}

#[tokio::test]
async fn test_list_sorted_by_milk_yield() {
    let (_dir, app) = create_test_app();

    let response = app
        .clone()
        .oneshot(get("/api/animals?sort=milkYield&order=desc"))
        .await
        .unwrap();
    let json = body_json(response.into_body()).await;
    assert_eq!(
        animal_ids(&json),
        vec!["CT001", "GR005", "JR003", "BF002", "SW004"]
    );

    let response = app
        .oneshot(get("/api/animals?category=cattle&sort=milkYield&order=asc"))
        .await
        .unwrap();
    let json = body_json(response.into_body()).await;
    assert_eq!(animal_ids(&json), vec!["JR003", "CT001"]);
}

#[tokio::test]
async fn test_search_and_category() {
    let (_dir, app) = create_test_app();

    let response = app
        .clone()
        .oneshot(get("/api/animals/search?q=jersey"))
        .await
        .unwrap();
    let json = body_json(response.into_body()).await;
    assert_eq!(animal_ids(&json), vec!["JR003"]);

    let response = app
        .clone()
        .oneshot(get("/api/animals/category/buffalo"))
        .await
        .unwrap();
    let json = body_json(response.into_body()).await;
    assert_eq!(animal_ids(&json), vec!["BF002"]);

    // Unknown category behaves like "all"
    let response = app
        .clone()
        .oneshot(get("/api/animals/category/goat"))
        .await
        .unwrap();
    let json = body_json(response.into_body()).await;
    assert_eq!(json.as_array().unwrap().len(), 5);

    // Category names are case-sensitive
    let response = app
        .oneshot(get("/api/animals/category/Buffalo"))
        .await
        .unwrap();
    let json = body_json(response.into_body()).await;
    assert_eq!(json.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_create_animal() {
    let (_dir, app) = create_test_app();

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/animals",
            serde_json::json!({
                "breed": "Murrah Buffalo",
                "color": "Black",
                "owner": "Farmer 3210",
                "milkYield": 16.5
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response.into_body()).await;
    assert_eq!(json["animalId"], "CT006");
    assert_eq!(json["milkYield"], 16.5);
    let id = json["id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(get(&format!("/api/animals/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response.into_body()).await;
    assert_eq!(json["breed"], "Murrah Buffalo");
}

#[tokio::test]
async fn test_create_animal_negative_yield() {
    let (_dir, app) = create_test_app();

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/animals",
            serde_json::json!({ "breed": "Gir", "milkYield": -3 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.oneshot(get("/api/animals")).await.unwrap();
    let json = body_json(response.into_body()).await;
    assert_eq!(json.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_get_missing_animal() {
    let (_dir, app) = create_test_app();

    let response = app.oneshot(get("/api/animals/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_animal() {
    let (_dir, app) = create_test_app();

    let response = app
        .clone()
        .oneshot(send_json(
            "PATCH",
            "/api/animals/1",
            serde_json::json!({ "color": "Black", "milkYield": 27 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response.into_body()).await;
    assert_eq!(json["animalId"], "CT001");
    assert_eq!(json["color"], "Black");
    assert_eq!(json["milkYield"], 27.0);
    assert_eq!(json["breed"], "Holstein Friesian");

    // Most recently updated first
    let response = app.oneshot(get("/api/animals")).await.unwrap();
    let json = body_json(response.into_body()).await;
    assert_eq!(animal_ids(&json)[0], "CT001");
}

#[tokio::test]
async fn test_update_missing_animal() {
    let (_dir, app) = create_test_app();

    let response = app
        .oneshot(send_json(
            "PATCH",
            "/api/animals/nope",
            serde_json::json!({ "color": "Black" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_animal() {
    let (_dir, app) = create_test_app();

    let delete = || {
        Request::builder()
            .method("DELETE")
            .uri("/api/animals/2")
            .body(Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(delete()).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.clone().oneshot(delete()).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(get("/api/animals")).await.unwrap();
    let json = body_json(response.into_body()).await;
    assert!(!animal_ids(&json).contains(&"BF002".to_string()));
}

// ============================================================================
// Statistics and care tests
// ============================================================================

#[tokio::test]
async fn test_yield_stats() {
    let (_dir, app) = create_test_app();

    let response = app.oneshot(get("/api/stats/yield")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response.into_body()).await;
    assert_eq!(json["totalAnimals"], 5);
    assert_eq!(json["totalYield"], 100.0);
    assert_eq!(json["averageYield"], 20.0);
}

#[tokio::test]
async fn test_top_producers_limit() {
    let (_dir, app) = create_test_app();

    let response = app
        .oneshot(get("/api/animals/top?limit=2"))
        .await
        .unwrap();
    let json = body_json(response.into_body()).await;
    assert_eq!(animal_ids(&json), vec!["CT001", "GR005"]);
}

#[tokio::test]
async fn test_breeding_filter_pregnant() {
    let (_dir, app) = create_test_app();

    let response = app
        .oneshot(get("/api/breeding/animals?status=pregnant"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response.into_body()).await;
    assert_eq!(animal_ids(&json), vec!["BF002"]);
    assert_eq!(json[0]["breedingStatus"], "pregnant");
    assert_eq!(json[0]["recommendations"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_ready_excludes_unknown_pregnancy_status() {
    let (_dir, app) = create_test_app();

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/animals",
            serde_json::json!({ "breed": "Gir", "milkYield": 12 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(get("/api/breeding/animals?status=ready"))
        .await
        .unwrap();
    let json = body_json(response.into_body()).await;
    assert_eq!(animal_ids(&json), vec!["CT001", "JR003", "SW004", "GR005"]);

    let response = app.oneshot(get("/api/stats/breeding")).await.unwrap();
    let json = body_json(response.into_body()).await;
    assert_eq!(json["ready"], 4);
    assert_eq!(json["total"], 6);
}

#[tokio::test]
async fn test_health_view_search() {
    let (_dir, app) = create_test_app();

    let response = app
        .oneshot(get("/api/health/animals?q=SW004&status=normal"))
        .await
        .unwrap();

    let json = body_json(response.into_body()).await;
    assert_eq!(animal_ids(&json), vec!["SW004"]);
    assert!(json[0]["vaccination"]["status"].is_string());
}

// ============================================================================
// Export tests
// ============================================================================

#[tokio::test]
async fn test_export_records_csv() {
    let (_dir, app) = create_test_app();

    let response = app
        .oneshot(get("/api/export/records.csv?category=buffalo"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"animal-records-"));

    let body = body_string(response.into_body()).await;
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(
        lines[0],
        "Animal ID,Breed,Color,Age,Owner,Milk Yield (L),Last Updated"
    );
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("BF002,Murrah Buffalo,Black,"));
}

#[tokio::test]
async fn test_export_milk_csv() {
    let (_dir, app) = create_test_app();

    let response = app.oneshot(get("/api/export/milk.csv")).await.unwrap();

    let body = body_string(response.into_body()).await;
    assert_eq!(body.lines().count(), 6);
    assert!(body.contains("CT001,Holstein Friesian,25,Normal"));
}

#[tokio::test]
async fn test_export_milk_keeps_collection_order() {
    let (_dir, app) = create_test_app();

    let response = app
        .clone()
        .oneshot(send_json(
            "PATCH",
            "/api/animals/3",
            serde_json::json!({ "milkYield": 21 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/api/export/milk.csv")).await.unwrap();
    let body = body_string(response.into_body()).await;
    let first_cells: Vec<&str> = body
        .lines()
        .skip(1)
        .map(|line| line.split(',').next().unwrap())
        .collect();
    assert_eq!(first_cells, vec!["CT001", "BF002", "JR003", "SW004", "GR005"]);
    assert!(body.contains("JR003,Jersey,21,Normal"));
}

// ============================================================================
// Scan tests
// ============================================================================

#[tokio::test]
async fn test_scan_empty_image() {
    let (_dir, app) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/scan")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_scan_and_save() {
    let (_dir, app) = create_test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/scan")
                .body(Body::from(vec![0x89u8, 0x50, 0x4e, 0x47]))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let scan = body_json(response.into_body()).await;
    assert!(scan["confidence"].as_f64().unwrap() > 80.0);
    assert_eq!(scan["vaccinationStatus"], "Up to date");

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/scan/save",
            serde_json::json!({ "result": scan }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let saved = body_json(response.into_body()).await;
    assert_eq!(saved["animalId"], "CT006");
    assert_eq!(saved["breed"], scan["breed"]);
    assert_eq!(saved["owner"], "Current User");
    let milk_yield = saved["milkYield"].as_f64().unwrap();
    assert!((15.0..35.0).contains(&milk_yield));

    let response = app.oneshot(get("/api/notifications")).await.unwrap();
    let json = body_json(response.into_body()).await;
    let messages: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["message"].as_str().unwrap())
        .collect();
    assert_eq!(
        messages,
        vec![
            "Iris scan completed successfully!",
            "Animal added successfully!",
            "Animal saved successfully!"
        ]
    );
}

// ============================================================================
// Auth tests
// ============================================================================

#[tokio::test]
async fn test_login_flow() {
    let (_dir, app) = create_test_app();

    let response = app.clone().oneshot(get("/api/auth/me")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/auth/otp",
            serde_json::json!({ "phoneNumber": "9876543210" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/auth/verify",
            serde_json::json!({ "phoneNumber": "9876543210", "otp": "123456" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let user = body_json(response.into_body()).await;
    assert_eq!(user["name"], "Farmer 3210");
    assert_eq!(user["role"], "farmer");

    let response = app.clone().oneshot(get("/api/auth/me")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/logout")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(get("/api/auth/me")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_otp_invalid_phone() {
    let (_dir, app) = create_test_app();

    let response = app
        .oneshot(send_json(
            "POST",
            "/api/auth/otp",
            serde_json::json!({ "phoneNumber": "12345" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_verify_without_otp_sent() {
    let (_dir, app) = create_test_app();

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/auth/verify",
            serde_json::json!({ "phoneNumber": "9876543210", "otp": "123456" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.oneshot(get("/api/notifications")).await.unwrap();
    let json = body_json(response.into_body()).await;
    assert_eq!(json[0]["message"], "Invalid OTP");
    assert_eq!(json[0]["level"], "error");
}
