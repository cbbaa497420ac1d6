//! End-to-end tests of the HTTP surface, driven through the router without
//! a socket.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use homestretch_core::MAIN_HOMEPAGE;
use homestretch_sections::{Section, SectionKind, default_homepage};
use homestretch_server::{AppState, ErrorResponse, SectionStore, ServerConfig, create_router};
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

const TOKEN: &str = "test-admin-token";

struct TestApp {
    router: Router,
    _uploads: TempDir,
}

fn app_with(sections: Vec<Section>) -> TestApp {
    let uploads = TempDir::new().unwrap();
    let config = ServerConfig {
        admin_tokens: vec![TOKEN.to_string()],
        upload_dir: uploads.path().to_path_buf(),
        max_upload_bytes: 1024,
        ..ServerConfig::default()
    };
    let store = SectionStore::in_memory(sections);

    TestApp {
        router: create_router(AppState::new(store, config)),
        _uploads: uploads,
    }
}

fn app() -> TestApp {
    app_with(default_homepage(MAIN_HOMEPAGE))
}

async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

async fn send_json(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(app, request).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, value)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn admin(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn names(list: &Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap().to_string())
        .collect()
}

// ============================================================================
// Reads
// ============================================================================

#[tokio::test]
async fn test_list_is_ordered_and_camel_case() {
    let app = app();
    let (status, list) = send_json(&app, get("/api/homepage-sections")).await;

    assert_eq!(status, StatusCode::OK);
    let sections = list.as_array().unwrap();
    assert_eq!(sections.len(), 6);
    assert_eq!(sections[0]["component"], "HeroSection");
    assert!(sections[0].get("sectionData").is_some());
    assert!(sections[0].get("homepageId").is_some());
    assert_eq!(sections[0]["type"], "hero");

    let orders: Vec<f64> = sections.iter().map(|s| s["order"].as_f64().unwrap()).collect();
    let mut sorted = orders.clone();
    sorted.sort_by(f64::total_cmp);
    assert_eq!(orders, sorted);
}

#[tokio::test]
async fn test_list_by_type_and_hero() {
    let app = app();

    let (status, heroes) = send_json(&app, get("/api/homepage-sections/types/hero")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(heroes.as_array().unwrap().len(), 1);

    let (status, hero) = send_json(&app, get("/api/homepage-sections/hero")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hero["component"], "HeroSection");
}

#[tokio::test]
async fn test_missing_hero_is_404() {
    let app = app_with(Vec::new());
    let (status, body) = send_json(&app, get("/api/homepage-sections/hero")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let error: ErrorResponse = serde_json::from_value(body).unwrap();
    assert_eq!(error.error, "not_found");
}

#[tokio::test]
async fn test_unknown_section_is_404() {
    let app = app();
    let uri = format!("/api/homepage-sections/{}", uuid::Uuid::new_v4());
    let (status, body) = send_json(&app, get(&uri)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_malformed_requests_get_json_errors() {
    let app = app();
    let upload_uri = format!(
        "/api/homepage-sections/{}/upload-hero-image",
        uuid::Uuid::new_v4()
    );
    let preview = Request::get("/admin/preview?homepageId=nope")
        .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
        .body(Body::empty())
        .unwrap();

    let requests = [
        get("/api/homepage-sections/not-a-uuid"),
        admin("DELETE", "/api/homepage-sections/not-a-uuid", Value::Null),
        admin("PATCH", "/api/homepage-sections/not-a-uuid", json!({"enabled": false})),
        admin("POST", &upload_uri, json!({})),
        preview,
    ];

    for request in requests {
        let uri = request.uri().to_string();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        let error: ErrorResponse = serde_json::from_slice(&body)
            .unwrap_or_else(|e| panic!("{uri}: {e}: {}", String::from_utf8_lossy(&body)));
        assert_eq!(error.error, "bad_request", "{uri}");
    }
}

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
async fn test_mutations_require_token() {
    let app = app();

    let request = Request::post("/api/homepage-sections")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"name": "x", "component": "NewsSection"}).to_string()))
        .unwrap();
    let (status, body) = send_json(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");

    let request = Request::post("/api/homepage-sections")
        .header(header::AUTHORIZATION, "Bearer wrong")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"name": "x", "component": "NewsSection"}).to_string()))
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Create / update / delete
// ============================================================================

#[tokio::test]
async fn test_create_appends_and_ignores_client_id() {
    let app = app();
    let client_id = uuid::Uuid::new_v4();

    let (status, created) = send_json(
        &app,
        admin(
            "POST",
            "/api/homepage-sections",
            json!({"id": client_id, "name": "Shop", "component": "ShopSection"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(created["id"], json!(client_id));
    assert_eq!(created["order"].as_f64(), Some(7.0));
    assert_eq!(created["enabled"], true);
    assert_eq!(created["type"], "commerce");
}

#[tokio::test]
async fn test_create_validation_errors() {
    let app = app();

    let (status, body) = send_json(
        &app,
        admin("POST", "/api/homepage-sections", json!({"name": "", "component": "ShopSection"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");

    let request = Request::post("/api/homepage-sections")
        .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let (status, body) = send_json(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_partial_update_replaces_payload() {
    let app = app();
    let (_, hero) = send_json(&app, get("/api/homepage-sections/hero")).await;
    let uri = format!("/api/homepage-sections/{}", hero["id"].as_str().unwrap());

    let (status, updated) = send_json(
        &app,
        admin("PATCH", &uri, json!({"sectionData": {"title": "Race Day"}})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], hero["name"]);
    assert_eq!(updated["sectionData"]["title"], "Race Day");
    // no deep merge: the old subtitle is gone
    assert!(updated["sectionData"]["subtitle"].is_null());
}

#[tokio::test]
async fn test_update_with_stale_version_conflicts() {
    let app = app();
    let (_, hero) = send_json(&app, get("/api/homepage-sections/hero")).await;
    let uri = format!("/api/homepage-sections/{}", hero["id"].as_str().unwrap());
    let version = hero["version"].as_u64().unwrap();

    let (status, _) = send_json(
        &app,
        admin("PUT", &uri, json!({"enabled": false, "expectedVersion": version})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send_json(
        &app,
        admin("PUT", &uri, json!({"enabled": true, "expectedVersion": version})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
async fn test_update_hero_endpoint() {
    let app = app();
    let (status, updated) = send_json(
        &app,
        admin("PUT", "/api/homepage-sections/hero", json!({"name": "Banner"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Banner");
    assert_eq!(updated["component"], "HeroSection");
}

#[tokio::test]
async fn test_delete_section() {
    let app = app();
    let (_, list) = send_json(&app, get("/api/homepage-sections")).await;
    let id = list[1]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/homepage-sections/{id}");

    let (status, _) = send(&app, admin("DELETE", &uri, Value::Null)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, admin("DELETE", &uri, Value::Null)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Reorder
// ============================================================================

#[tokio::test]
async fn test_reorder_applies_exact_order() {
    let app = app();
    let (_, list) = send_json(&app, get("/api/homepage-sections")).await;
    let before = names(&list);

    let mut reversed: Vec<Value> = list.as_array().unwrap().clone();
    reversed.reverse();
    let entries: Vec<Value> = reversed
        .iter()
        .enumerate()
        .map(|(i, s)| json!({"id": s["id"], "order": i + 1}))
        .collect();

    let (status, _) = send(
        &app,
        admin("POST", "/api/homepage-sections/reorder", Value::Array(entries)),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, list) = send_json(&app, get("/api/homepage-sections")).await;
    let mut expected = before;
    expected.reverse();
    assert_eq!(names(&list), expected);
}

#[tokio::test]
async fn test_reorder_with_unknown_id_changes_nothing() {
    let app = app();
    let (_, before) = send_json(&app, get("/api/homepage-sections")).await;

    let entries = json!([
        {"id": before[5]["id"], "order": 1},
        {"id": uuid::Uuid::new_v4(), "order": 2},
    ]);
    let (status, body) = send_json(
        &app,
        admin("POST", "/api/homepage-sections/reorder", entries),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");

    let (_, after) = send_json(&app, get("/api/homepage-sections")).await;
    assert_eq!(after, before);
}

// ============================================================================
// Uploads
// ============================================================================

fn multipart(uri: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Request<Body> {
    let boundary = "homestretch-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::post(uri)
        .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_upload_hero_image_sets_background() {
    let app = app();
    let (_, hero) = send_json(&app, get("/api/homepage-sections/hero")).await;
    let uri = format!(
        "/api/homepage-sections/{}/upload-hero-image",
        hero["id"].as_str().unwrap()
    );

    let (status, updated) =
        send_json(&app, multipart(&uri, "banner.png", "image/png", b"\x89PNG....")).await;
    assert_eq!(status, StatusCode::OK);

    let url = updated["sectionData"]["backgroundImage"].as_str().unwrap();
    assert!(url.starts_with("/uploads/"));
    assert!(url.ends_with(".png"));

    let (status, bytes) = send(&app, get(url)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"\x89PNG....".to_vec());
}

#[tokio::test]
async fn test_upload_rejects_non_images() {
    let app = app();
    let (_, hero) = send_json(&app, get("/api/homepage-sections/hero")).await;
    let uri = format!(
        "/api/homepage-sections/{}/upload-hero-image",
        hero["id"].as_str().unwrap()
    );

    let (status, _) = send_json(&app, multipart(&uri, "notes.txt", "text/plain", b"hi")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) =
        send_json(&app, multipart(&uri, "big.png", "image/png", &[0u8; 2048])).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"], "payload_too_large");
}

#[tokio::test]
async fn test_story_upload_on_hero_is_rejected() {
    let app = app();
    let (_, hero) = send_json(&app, get("/api/homepage-sections/hero")).await;
    let uri = format!(
        "/api/homepage-sections/{}/upload-story-image",
        hero["id"].as_str().unwrap()
    );

    let (status, _) = send_json(&app, multipart(&uri, "a.png", "image/png", b"png")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

// ============================================================================
// Pages
// ============================================================================

#[tokio::test]
async fn test_public_page_hides_disabled_sections() {
    let sections = vec![
        Section::new("Visible", SectionKind::About, 2.into()),
        Section::new("Hidden", SectionKind::Stats, 1.into()).enabled(false),
    ];
    let hidden_id = sections[1].id;
    let app = app_with(sections);

    let (status, body) = send(&app, get("/")).await;
    let html = String::from_utf8(body).unwrap();
    assert_eq!(status, StatusCode::OK);
    assert!(!html.contains(&hidden_id.to_string()));

    let request = Request::get("/admin/preview")
        .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    let html = String::from_utf8(body).unwrap();
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(&hidden_id.to_string()));
    assert!(html.contains("data-disabled=\"true\""));
}

#[tokio::test]
async fn test_preview_requires_token() {
    let app = app();
    let (status, _) = send(&app, get("/admin/preview")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_reports_ok() {
    let app = app();
    let (status, body) = send_json(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["sections"], 6);
}
