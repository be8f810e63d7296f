//! Golden Hour Studio — client coordination gateway.
//! Client memory, weather scouting, and live quote emails behind one axum
//! router; every flow answers in demo mode when its service key is absent.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, Query, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use goldenhour_core::{
    memory_recall, memory_store, send_quote_email, weather_lookup, AttributeRecord,
    ClientMemoryStore, FailureEnvelope, ServiceKeys,
};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ClientMemoryStore>,
}

impl AppState {
    /// Fresh state with the demo-seeded client ledger.
    pub fn new() -> Self {
        Self {
            store: Arc::new(ClientMemoryStore::with_demo_clients()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the coordination router over the given state.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/client-memory",
            post(client_memory).get(client_memory_listing),
        )
        .route("/api/weather", post(weather))
        .route("/api/send-live-email", post(send_live_email))
        .route("/api/debug-env", get(debug_env))
        .with_state(state)
        .layer(axum::middleware::from_fn(log_studio_traffic))
}

async fn log_studio_traffic(request: Request<Body>, next: Next) -> Response {
    tracing::info!("[Gateway] {} {}", request.method(), request.uri().path());
    next.run(request).await
}

async fn health() -> &'static str {
    "OK"
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MemoryRequest {
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    client_id: Option<String>,
    #[serde(default)]
    data: Option<AttributeRecord>,
    #[serde(default)]
    query: Option<String>,
}

/// POST /api/client-memory: store or recall client attributes.
async fn client_memory(
    State(state): State<AppState>,
    body: Result<Json<MemoryRequest>, JsonRejection>,
) -> Response {
    let started = Instant::now();
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return malformed_body(started, "Memory", "Memory operation failed", rejection)
        }
    };

    let Some(client_id) = req.client_id.filter(|id| !id.is_empty()) else {
        return bad_request("Client ID is required");
    };

    let keys = ServiceKeys::from_env();
    match req.action.as_deref() {
        Some("store") => {
            let data = req.data.unwrap_or_default();
            let envelope = memory_store(&state.store, &keys, &client_id, data, started).await;
            Json(envelope).into_response()
        }
        Some("recall") => {
            let query = req.query.unwrap_or_default();
            let envelope = memory_recall(&state.store, &keys, &client_id, &query, started).await;
            Json(envelope).into_response()
        }
        _ => bad_request("Invalid action. Use 'store' or 'recall'"),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListingParams {
    #[serde(default)]
    client_id: Option<String>,
}

/// GET /api/client-memory: one client's record, or every record in the ledger.
async fn client_memory_listing(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Json<Value> {
    if let Some(client_id) = params.client_id {
        let memories = match state.store.get(&client_id) {
            Some(record) => Value::Object(record),
            None => Value::Null,
        };
        return Json(json!({ "clientId": client_id, "memories": memories }));
    }

    let all: Vec<Value> = state
        .store
        .list()
        .into_iter()
        .map(|(client_id, data)| json!({ "clientId": client_id, "data": data }))
        .collect();
    Json(json!({ "allMemories": all }))
}

#[derive(Deserialize)]
struct WeatherRequest {
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    query: Option<String>,
}

/// POST /api/weather: forecast lookup for a shoot location.
async fn weather(body: Result<Json<WeatherRequest>, JsonRejection>) -> Response {
    let started = Instant::now();
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return malformed_body(started, "Weather", "Failed to fetch weather data", rejection)
        }
    };

    let Some(location) = req.location.filter(|l| !l.is_empty()) else {
        return bad_request("Location is required");
    };

    let keys = ServiceKeys::from_env();
    let envelope = weather_lookup(&keys, &location, req.query.as_deref(), started).await;
    Json(envelope).into_response()
}

#[derive(Deserialize)]
struct EmailRequest {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

/// POST /api/send-live-email: the dashboard's live quote demo.
async fn send_live_email(body: Result<Json<EmailRequest>, JsonRejection>) -> Response {
    let started = Instant::now();
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => return malformed_body(started, "Email", "Failed to send email", rejection),
    };

    let (Some(email), Some(name)) = (
        req.email.filter(|e| !e.is_empty()),
        req.name.filter(|n| !n.is_empty()),
    ) else {
        return bad_request("Email and name are required");
    };

    let keys = ServiceKeys::from_env();
    let envelope = send_quote_email(&keys, &email, &name, started).await;
    Json(envelope).into_response()
}

/// GET /api/debug-env: which service keys are configured (plus prefixes).
async fn debug_env() -> Json<goldenhour_core::KeyProbe> {
    Json(ServiceKeys::from_env().probe())
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

fn malformed_body(
    started: Instant,
    tag: &str,
    message: &str,
    rejection: JsonRejection,
) -> Response {
    tracing::error!("[{}] Error: {}", tag, rejection);
    let envelope = FailureEnvelope::new(started.elapsed().as_millis() as u64, message);
    (StatusCode::INTERNAL_SERVER_ERROR, Json(envelope)).into_response()
}
