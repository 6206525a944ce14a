use super::*;
use axum::body::Body;
use axum::http::Request;
use floorplan::editor::EditorCore;
use floorplan::geometry::Point;
use floorplan::input::{Button, Modifiers, Tool};
use tower::ServiceExt;

use crate::state::test_helpers;

const PLAN: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 100">
  <g id="Areas">
    <polygon id="area-1" points="10,10 60,10 60,40 10,40" fill="#ff8800"/>
  </g>
</svg>"##;

async fn send(app: axum::Router, req: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap().to_vec();
    (status, headers, bytes)
}

fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn save_then_get_returns_svg_without_caching() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_helpers::test_app_state(dir.path());

    let (status, _, body) = send(
        crate::routes::app(state.clone()),
        post_json("/api/save-svg", &serde_json::json!({ "floor": "lt-1!", "svgContent": PLAN })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let saved: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(saved["success"], true);
    assert!(dir.path().join("store/LT1.svg").exists());

    let (status, headers, body) = send(crate::routes::app(state), get("/api/get-svg/lt1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers.get(header::CONTENT_TYPE).unwrap(), "image/svg+xml");
    assert_eq!(headers.get(header::CACHE_CONTROL).unwrap(), NO_CACHE);
    assert_eq!(headers.get(header::PRAGMA).unwrap(), "no-cache");
    assert_eq!(String::from_utf8(body).unwrap(), PLAN);
}

#[tokio::test]
async fn missing_plan_answers_404_with_fallback_marker() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_helpers::test_app_state(dir.path());

    let (status, headers, body) = send(crate::routes::app(state), get("/api/get-svg/lt-2")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(headers.get(&X_FALLBACK).unwrap(), "true");
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["fallback"], "/denah/LT2.svg");
}

#[tokio::test]
async fn get_with_unusable_floor_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_helpers::test_app_state(dir.path());
    let (status, headers, _) = send(crate::routes::app(state), get("/api/get-svg/---")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(headers.get(&X_FALLBACK).is_none());
}

#[tokio::test]
async fn save_requires_both_fields() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_helpers::test_app_state(dir.path());

    for body in [
        serde_json::json!({ "floor": "LT1" }),
        serde_json::json!({ "svgContent": PLAN }),
        serde_json::json!({}),
    ] {
        let (status, _, bytes) = send(crate::routes::app(state.clone()), post_json("/api/save-svg", &body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["success"], false);
    }
}

#[tokio::test]
async fn save_rejects_empty_floor_and_non_svg() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_helpers::test_app_state(dir.path());

    let (status, _, _) = send(
        crate::routes::app(state.clone()),
        post_json("/api/save-svg", &serde_json::json!({ "floor": "!!", "svgContent": PLAN })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, bytes) = send(
        crate::routes::app(state),
        post_json("/api/save-svg", &serde_json::json!({ "floor": "LT1", "svgContent": "<p>hi</p>" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["success"], false);
    assert!(!dir.path().join("store/LT1.svg").exists());
}

#[tokio::test]
async fn editor_save_body_is_accepted_and_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_helpers::test_app_state(dir.path());

    let mut editor = EditorCore::new();
    editor.load_svg(PLAN, "LT3").unwrap();
    editor.set_tool(Tool::Rectangle);
    let start = editor.camera.world_to_screen(Point::new(100.0, 20.0));
    let end = editor.camera.world_to_screen(Point::new(150.0, 60.0));
    editor.on_pointer_down(start, Button::Primary, Modifiers::default());
    editor.on_pointer_move(end, Modifiers::default());
    editor.on_pointer_up(end, Button::Primary, Modifiers::default());
    assert_eq!(editor.shapes().len(), 2);

    let body = editor.save_body("LT3").unwrap();
    let req = Request::builder()
        .method("POST")
        .uri("/api/save-svg")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    let (status, _, _) = send(crate::routes::app(state.clone()), req).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, bytes) = send(crate::routes::app(state), get("/api/get-svg/LT3")).await;
    assert_eq!(status, StatusCode::OK);
    let mut reloaded = EditorCore::new();
    let count = reloaded.load_svg(&String::from_utf8(bytes).unwrap(), "LT3").unwrap();
    assert_eq!(count, 2);
}

#[tokio::test]
async fn malformed_save_bodies_answer_in_save_shape() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_helpers::test_app_state(dir.path());

    let wrong_type = post_json("/api/save-svg", &serde_json::json!({ "floor": 5, "svgContent": PLAN }));
    let not_json = Request::builder()
        .method("POST")
        .uri("/api/save-svg")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{floor:"))
        .unwrap();
    let no_content_type = Request::builder()
        .method("POST")
        .uri("/api/save-svg")
        .body(Body::from(serde_json::json!({ "floor": "LT1", "svgContent": PLAN }).to_string()))
        .unwrap();

    for req in [wrong_type, not_json, no_content_type] {
        let (status, _, bytes) = send(crate::routes::app(state.clone()), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["success"], false);
        assert!(!json["message"].as_str().unwrap().is_empty());
    }
    assert!(!dir.path().join("store/LT1.svg").exists());
}
