//! Endpoint contract tests driven through the router: validation errors,
//! demo-mode envelopes, the memory ledger, and the config probe.
//!
//! Service-key env vars are cleared up front so every flow takes its demo
//! fallback; the tests only ever remove vars, so parallel execution cannot
//! race them into different states.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use goldenhour_gateway::{app, AppState};
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use tower::ServiceExt;

const SERVICE_KEY_VARS: [&str; 4] = [
    "AGENTMAIL_API_KEY",
    "PERPLEXITY_API_KEY",
    "HYPERSPELL_API_KEY",
    "RESEND_API_KEY",
];

fn demo_gateway() -> (AppState, Router) {
    for var in SERVICE_KEY_VARS {
        std::env::remove_var(var);
    }
    let state = AppState::new();
    (state.clone(), app(state))
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(path: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(path: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn memory_without_client_id_is_rejected() {
    let (_, router) = demo_gateway();
    let (status, body) = send(
        router,
        post_json("/api/client-memory", json!({ "action": "store" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Client ID is required"));
    assert!(body.get("success").is_none());
}

#[tokio::test]
async fn memory_with_unknown_action_is_rejected() {
    let (_, router) = demo_gateway();
    let (status, body) = send(
        router,
        post_json(
            "/api/client-memory",
            json!({ "action": "forget", "clientId": "client-1" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Invalid action. Use 'store' or 'recall'"));
}

#[tokio::test]
async fn malformed_body_yields_failure_envelope() {
    let (_, router) = demo_gateway();
    let request = Request::builder()
        .method("POST")
        .uri("/api/client-memory")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("this is not json"))
        .unwrap();

    let (status, body) = send(router, request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Memory operation failed"));
    assert!(body["duration"].as_u64().is_some());
}

#[tokio::test]
async fn store_then_listing_roundtrip() {
    let (state, _) = demo_gateway();

    let (status, body) = send(
        app(state.clone()),
        post_json(
            "/api/client-memory",
            json!({ "action": "store", "clientId": "client-9", "data": { "notes": "test" } }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["result"]["stored"], json!(true));
    assert_eq!(body["realAPI"], json!(false));
    assert!(body["service"].as_str().unwrap().contains("No API key"));
    assert!(chrono::DateTime::parse_from_rfc3339(body["timestamp"].as_str().unwrap()).is_ok());

    let (status, body) = send(
        app(state.clone()),
        get("/api/client-memory?clientId=client-9"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["clientId"], json!("client-9"));
    assert_eq!(body["memories"], json!({ "notes": "test" }));
}

#[tokio::test]
async fn stores_merge_and_recall_returns_both_attributes() {
    let (state, _) = demo_gateway();

    for data in [json!({ "a": 1 }), json!({ "b": 2 })] {
        let (status, _) = send(
            app(state.clone()),
            post_json(
                "/api/client-memory",
                json!({ "action": "store", "clientId": "merge-client", "data": data }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(
        app(state.clone()),
        post_json(
            "/api/client-memory",
            json!({ "action": "recall", "clientId": "merge-client", "query": "everything" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["data"]["a"], json!(1));
    assert_eq!(body["result"]["data"]["b"], json!(2));
}

#[tokio::test]
async fn recall_unknown_client_gets_default_preferences_twice() {
    let (state, _) = demo_gateway();
    let recall = json!({ "action": "recall", "clientId": "client-404", "query": "preferences" });

    let (_, first) = send(app(state.clone()), post_json("/api/client-memory", recall.clone())).await;
    let (_, second) = send(app(state.clone()), post_json("/api/client-memory", recall)).await;

    assert_eq!(
        first["result"]["data"]["preferences"],
        json!("Golden hour photography, urban backgrounds with architecture")
    );
    assert_eq!(first["result"]["data"], second["result"]["data"]);
    assert!(first["service"].as_str().unwrap().contains("No API key"));
}

#[tokio::test]
async fn listing_without_client_id_returns_all_demo_memories() {
    let (_, router) = demo_gateway();
    let (status, body) = send(router, get("/api/client-memory")).await;

    assert_eq!(status, StatusCode::OK);
    let all = body["allMemories"].as_array().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0]["clientId"], json!("client-1"));
    assert_eq!(all[1]["clientId"], json!("client-2"));
}

#[tokio::test]
async fn weather_without_location_is_rejected() {
    let (_, router) = demo_gateway();
    let (status, body) = send(router, post_json("/api/weather", json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Location is required"));
}

#[tokio::test]
async fn weather_demo_mode_takes_latency_and_returns_forecast() {
    let (_, router) = demo_gateway();
    let started = Instant::now();

    let (status, body) = send(
        router,
        post_json("/api/weather", json!({ "location": "Austin" })),
    )
    .await;

    assert!(started.elapsed() >= Duration::from_millis(800));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["realData"], json!(false));
    assert!(body["service"].as_str().unwrap().contains("Demo Mode"));
    assert!(!body["data"]["forecast"].as_array().unwrap().is_empty());
    assert!(body["duration"].as_u64().unwrap() >= 800);
    assert!(chrono::DateTime::parse_from_rfc3339(body["timestamp"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn email_without_fields_is_rejected() {
    let (_, router) = demo_gateway();
    let (status, body) = send(
        router,
        post_json("/api/send-live-email", json!({ "email": "a@b.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Email and name are required"));
}

#[tokio::test]
async fn email_demo_mode_reports_simulated_send() {
    let (_, router) = demo_gateway();
    let (status, body) = send(
        router,
        post_json(
            "/api/send-live-email",
            json!({ "email": "sarah@example.com", "name": "Sarah" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["realAPI"], json!(false));
    assert_eq!(body["result"]["sent"], json!(true));
    assert_eq!(body["result"]["simulated"], json!(true));
    assert_eq!(body["result"]["subject"], json!("Photography Quote for Sarah"));
    assert!(body["service"].as_str().unwrap().contains("No API key"));
}

#[tokio::test]
async fn debug_env_probe_reports_absent_keys() {
    let (_, router) = demo_gateway();
    let (status, body) = send(router, get("/api/debug-env")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hasAgentMail"], json!(false));
    assert_eq!(body["hasPerplexity"], json!(false));
    assert_eq!(body["hasHyperspell"], json!(false));
    assert_eq!(body["hasResend"], json!(false));
    assert!(body.get("perplexityPrefix").is_none());
}

#[tokio::test]
async fn health_answers_ok() {
    let (_, router) = demo_gateway();
    let response = router.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
