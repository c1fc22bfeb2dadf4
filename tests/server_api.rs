use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use sociaclip_core::server;
use sociaclip_core::state::ServerState;
use sociaclip_core::SociaConfig;
use std::sync::Arc;
use tower::ServiceExt;

fn app_state() -> server::AppState {
    let mut config = SociaConfig::default();
    config.search.api_key = Some("never-leaks".to_string());
    Arc::new(ServerState::new(config))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn plan_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/plan")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_status_starts_with_zero_runs() {
    let app = server::create_router(app_state());
    let response = app
        .oneshot(Request::builder().uri("/api/status").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["service"], "sociaclip-core");
    assert_eq!(json["runs"], 0);
    assert!(json["last_run"].is_null());
}

#[tokio::test]
async fn test_config_hides_api_key() {
    let app = server::create_router(app_state());
    let response = app
        .oneshot(Request::builder().uri("/api/config").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["posts_per_day"], 5);
    assert!(!json.to_string().contains("never-leaks"));
}

#[tokio::test]
async fn test_plan_then_status_records_run() {
    let state = app_state();
    let app = server::create_router(state.clone());

    let body = json!({
        "seed": 11,
        "weekday": "sat",
        "candidates": [
            {"identifier": "https://youtube.com/a", "title": "Viral workout on YouTube", "description": "fitness", "category": "fitness"},
            {"identifier": "https://tiktok.com/b", "title": "Trending business hack", "description": "startup", "category": "business"},
            {"title": "missing identifier viral trending"}
        ]
    });
    let response = app.clone().oneshot(plan_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let report = body_json(response).await;
    assert_eq!(report["discovery"]["total_discovered"], 3);
    assert_eq!(report["posts"].as_array().unwrap().len(), 2);

    let response = app
        .oneshot(Request::builder().uri("/api/status").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = body_json(response).await;
    assert_eq!(status["runs"], 1);
    assert_eq!(status["last_run"]["posts"], 2);
}

#[tokio::test]
async fn test_plan_rejects_bad_weekday() {
    let app = server::create_router(app_state());
    let response = app
        .oneshot(plan_request(json!({"candidates": [], "weekday": "someday"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("someday"));
}

#[tokio::test]
async fn test_plan_with_no_candidates_is_empty() {
    let app = server::create_router(app_state());
    let response = app.oneshot(plan_request(json!({}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let report = body_json(response).await;
    assert!(report["posts"].as_array().unwrap().is_empty());
}
