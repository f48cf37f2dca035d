//! HTTP API tests against the in-process router

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use bibchecker::api::create_router;

use crate::common::{app_state, config_in, scratch_dir};

fn router(name: &str) -> (Router, std::path::PathBuf) {
    let dir = scratch_dir(name);
    let app = create_router(app_state(config_in(&dir)));
    (app, dir)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_health_before_refresh() {
    let (app, dir) = router("health");
    let (status, body) = send(&app, "GET", "/api/v1/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["last_refresh"].is_null());
    assert!(body["entries"].is_null());

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn test_reports_need_a_refresh() {
    let (app, dir) = router("no-report");

    let (status, body) = send(&app, "GET", "/api/v1/entries", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchData");

    let (status, _) = send(&app, "GET", "/api/v1/failures", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "GET", "/api/v1/libraries", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["libraries"], json!([]));
    assert_eq!(body["mine"], json!(["Ost", "Mediathek im KUBUS"]));

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn test_refresh_without_input_file() {
    let (app, dir) = router("no-input");
    let (status, body) = send(&app, "POST", "/api/v1/refresh", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains("ids.txt"));

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn test_input_refresh_and_reports() {
    let (app, dir) = router("reports");

    let content = "AK00119197 Geschenk\n1234567\nISBN-123\n";
    let (status, _) = send(&app, "PUT", "/api/v1/input", Some(json!({ "content": content }))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", "/api/v1/input", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], content);

    let (status, body) = send(&app, "POST", "/api/v1/refresh", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id_count"], 3);
    assert_eq!(body["entries"], 2);
    assert_eq!(body["failures"], 1);

    // Default filter keeps borrowable copies only
    let (status, body) = send(&app, "GET", "/api/v1/entries", None).await;
    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["id"], "SAK00119197");
    assert_eq!(entries[0]["user_description"], "Geschenk");
    assert_eq!(entries[0]["holdings"].as_array().unwrap().len(), 1);
    assert_eq!(entries[0]["holdings"][0]["bib"], "Ost");

    let (_, body) = send(&app, "GET", "/api/v1/entries?all=true&sort=title", None).await;
    let titles: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Der Hobbit", "Krabat"]);
    assert_eq!(body[0]["holdings"].as_array().unwrap().len(), 2);

    let (_, body) = send(&app, "GET", "/api/v1/entries?bib=Feuerbach&only_available=true", None).await;
    assert_eq!(body, json!([]));

    let (status, body) = send(&app, "GET", "/api/v1/libraries/grouped?all=true", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["library"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Feuerbach", "Mediathek im KUBUS", "Ost"]);
    assert_eq!(body[1]["items"][0]["id"], "1234567");
    assert_eq!(body[1]["items"][0]["holding"]["can_be_borrowed"], true);

    let (_, body) = send(&app, "GET", "/api/v1/libraries", None).await;
    assert_eq!(body["libraries"], json!(["Mediathek im KUBUS", "Ost", "Feuerbach"]));

    let (_, body) = send(&app, "GET", "/api/v1/failures", None).await;
    assert_eq!(body[0]["id"], "ISBN-123");
    assert_eq!(body[0]["kind"], "unknown_format");

    let (_, body) = send(&app, "GET", "/api/v1/health", None).await;
    assert_eq!(body["entries"], 2);

    let _ = std::fs::remove_dir_all(dir);
}
