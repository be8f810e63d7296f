//! Client memory flow — Hyperspell when a key is configured, the local ledger
//! otherwise. A failed Hyperspell call is recovered silently: only the
//! provenance label tells the dashboard what happened.

use crate::adapter::AdapterError;
use crate::demo;
use crate::envelope::{iso_timestamp, ActionEnvelope};
use crate::keys::ServiceKeys;
use crate::store::{AttributeRecord, ClientMemoryStore};
use serde_json::{json, Value};
use std::time::Instant;

const HYPERSPELL_STORE_URL: &str = "https://api.hyperspell.com/memory/store";
const HYPERSPELL_QUERY_URL: &str = "https://api.hyperspell.com/memory/query";

async fn hyperspell_call(api_key: &str, url: &str, body: Value) -> Result<Value, AdapterError> {
    let res = reqwest::Client::new()
        .post(url)
        .bearer_auth(api_key)
        .json(&body)
        .send()
        .await?;

    let status = res.status();
    let text = res.text().await?;
    if !status.is_success() {
        return Err(AdapterError::Status(status.as_u16(), text));
    }
    serde_json::from_str(&text).map_err(|e| AdapterError::Parse(e.to_string()))
}

/// Store attributes for a client.
///
/// Real path: one Hyperspell call, no local write. Fallback (no key, or the
/// call failed): merge into the local ledger after demo latency.
pub async fn memory_store(
    store: &ClientMemoryStore,
    keys: &ServiceKeys,
    client_id: &str,
    data: AttributeRecord,
    started: Instant,
) -> ActionEnvelope {
    let has_key = keys.hyperspell.is_some();

    if let Some(api_key) = keys.hyperspell.as_deref() {
        let body = json!({ "clientId": client_id, "data": data });
        match hyperspell_call(api_key, HYPERSPELL_STORE_URL, body).await {
            Ok(remote) => {
                tracing::info!("[Hyperspell] Stored data for client {}", client_id);
                return ActionEnvelope {
                    success: true,
                    duration: started.elapsed().as_millis() as u64,
                    result: json!({
                        "stored": true,
                        "clientId": client_id,
                        "hyperspellId": remote.get("id").cloned().unwrap_or(Value::Null),
                    }),
                    service: "Hyperspell".to_string(),
                    real_api: true,
                    timestamp: iso_timestamp(),
                };
            }
            Err(e) => tracing::error!("[Hyperspell] Store error: {}", e),
        }
    }

    demo::simulate_latency(demo::MEMORY_FALLBACK_DELAY).await;
    store.merge(client_id, data);

    let service = if has_key {
        "Local Memory (API failed)"
    } else {
        "Local Memory (No API key)"
    };
    tracing::info!("[{}] Stored data for client {}", service, client_id);

    ActionEnvelope {
        success: true,
        duration: started.elapsed().as_millis() as u64,
        result: json!({ "stored": true, "clientId": client_id }),
        service: service.to_string(),
        real_api: false,
        timestamp: iso_timestamp(),
    }
}

/// Recall attributes for a client.
///
/// The fallback reads the local ledger and, for an unknown client, answers
/// with the fixed default preference record — never "not found".
pub async fn memory_recall(
    store: &ClientMemoryStore,
    keys: &ServiceKeys,
    client_id: &str,
    query: &str,
    started: Instant,
) -> ActionEnvelope {
    let has_key = keys.hyperspell.is_some();

    if let Some(api_key) = keys.hyperspell.as_deref() {
        let body = json!({ "clientId": client_id, "query": query });
        match hyperspell_call(api_key, HYPERSPELL_QUERY_URL, body).await {
            Ok(remote) => {
                tracing::info!("[Hyperspell] Recalled data for client {}", client_id);
                return ActionEnvelope {
                    success: true,
                    duration: started.elapsed().as_millis() as u64,
                    result: json!({ "recalled": true, "clientId": client_id, "data": remote }),
                    service: "Hyperspell".to_string(),
                    real_api: true,
                    timestamp: iso_timestamp(),
                };
            }
            Err(e) => tracing::error!("[Hyperspell] Recall error: {}", e),
        }
    }

    demo::simulate_latency(demo::MEMORY_FALLBACK_DELAY).await;
    let memories = store
        .get(client_id)
        .unwrap_or_else(demo::default_preferences);

    let service = if has_key {
        "Local Memory (API failed)"
    } else {
        "Local Memory (No API key - set HYPERSPELL_API_KEY)"
    };
    tracing::info!("[{}] Recalled data for client {}", service, client_id);

    ActionEnvelope {
        success: true,
        duration: started.elapsed().as_millis() as u64,
        result: json!({ "recalled": true, "clientId": client_id, "data": memories }),
        service: service.to_string(),
        real_api: false,
        timestamp: iso_timestamp(),
    }
}
