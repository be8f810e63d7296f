//! Weather scouting — Perplexity Sonar when a key is configured, the demo
//! forecast otherwise. The model is asked for JSON; its reply is scanned for
//! the first balanced object and validated before being forwarded.

use crate::adapter::AdapterError;
use crate::demo;
use crate::envelope::{iso_timestamp, ReportEnvelope};
use crate::json_scan::extract_json_object;
use crate::keys::ServiceKeys;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;

const PERPLEXITY_URL: &str = "https://api.perplexity.ai/chat/completions";
const PERPLEXITY_MODEL: &str = "llama-3.1-sonar-small-128k-online";
const SCOUT_SYSTEM_PROMPT: &str = "You are a weather assistant. Provide current weather forecast data in a structured format. Include temperature, conditions, and any special events like cherry blossoms or other seasonal information.";
const DEFAULT_SCOUT_QUERY: &str = "Include next 3-4 days forecast and any special seasonal events.";

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct SonarRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct SonarResponse {
    choices: Option<Vec<SonarChoice>>,
}

#[derive(Debug, Deserialize)]
struct SonarChoice {
    message: Option<SonarMessage>,
}

#[derive(Debug, Deserialize)]
struct SonarMessage {
    content: Option<String>,
}

/// One Sonar call; returns the reply text. Shape handling is the caller's job.
async fn sonar_forecast(
    api_key: &str,
    location: &str,
    query: Option<&str>,
) -> Result<String, AdapterError> {
    let user_content = format!(
        "Get the current weather forecast for {}. {} Return data in JSON format with: forecast array (date, condition, temp, sunset, icon emoji), specialEvent, and recommendation.",
        location,
        query.unwrap_or(DEFAULT_SCOUT_QUERY),
    );
    let body = SonarRequest {
        model: PERPLEXITY_MODEL.to_string(),
        messages: vec![
            ChatMessage {
                role: "system".to_string(),
                content: SCOUT_SYSTEM_PROMPT.to_string(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: user_content,
            },
        ],
        temperature: 0.2,
    };

    let res = reqwest::Client::new()
        .post(PERPLEXITY_URL)
        .bearer_auth(api_key)
        .json(&body)
        .send()
        .await?;

    let status = res.status();
    let text = res.text().await?;
    if !status.is_success() {
        return Err(AdapterError::Status(status.as_u16(), text));
    }

    let parsed: SonarResponse =
        serde_json::from_str(&text).map_err(|e| AdapterError::Parse(e.to_string()))?;

    Ok(parsed
        .choices
        .and_then(|c| c.into_iter().next())
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .unwrap_or_default())
}

/// Classifies a Sonar reply. An extracted object must carry a non-empty
/// `forecast` array to be forwarded as structured data; anything else — no
/// JSON, malformed JSON, or JSON without a usable forecast — is wrapped as
/// raw text. Both count as real data: the remote call itself succeeded.
fn shape_scout_reply(location: &str, content: &str) -> (Value, &'static str) {
    if let Some(parsed) = extract_json_object(content) {
        let has_forecast = parsed
            .get("forecast")
            .and_then(Value::as_array)
            .is_some_and(|f| !f.is_empty());
        if has_forecast {
            return (parsed, "Perplexity");
        }
        tracing::info!("[Perplexity] JSON reply missing forecast, using text response");
    } else {
        tracing::info!("[Perplexity] Could not parse JSON, using text response");
    }

    let wrapped = json!({
        "location": location,
        "forecast": [
            { "date": "Next 3 days", "condition": "See details", "temp": "--", "icon": "🌤️" }
        ],
        "rawResponse": content,
        "specialEvent": "Check forecast details",
        "recommendation": content.chars().take(200).collect::<String>(),
    });
    (wrapped, "Perplexity (text)")
}

/// Weather lookup for a location. Real path when the Perplexity key is
/// present; fixed demo forecast (after demo latency) otherwise or on failure.
pub async fn weather_lookup(
    keys: &ServiceKeys,
    location: &str,
    query: Option<&str>,
    started: Instant,
) -> ReportEnvelope {
    let has_key = keys.perplexity.is_some();

    if let Some(api_key) = keys.perplexity.as_deref() {
        match sonar_forecast(api_key, location, query).await {
            Ok(content) => {
                let (data, service) = shape_scout_reply(location, &content);
                let duration = started.elapsed().as_millis() as u64;
                tracing::info!(
                    "[{}] Weather data fetched for {} in {}ms",
                    service,
                    location,
                    duration
                );
                return ReportEnvelope {
                    success: true,
                    duration,
                    data,
                    service: service.to_string(),
                    real_data: true,
                    timestamp: iso_timestamp(),
                };
            }
            Err(e) => tracing::error!("[Perplexity] API Error: {}", e),
        }
    }

    demo::simulate_latency(demo::WEATHER_FALLBACK_DELAY).await;
    let service = if has_key {
        "Demo Mode (API failed)"
    } else {
        "Demo Mode (No API key - set PERPLEXITY_API_KEY)"
    };
    let duration = started.elapsed().as_millis() as u64;
    tracing::info!(
        "[{}] Weather data simulated for {} in {}ms",
        service,
        location,
        duration
    );

    ReportEnvelope {
        success: true,
        duration,
        data: demo::demo_forecast(location),
        service: service.to_string(),
        real_data: false,
        timestamp: iso_timestamp(),
    }
}
