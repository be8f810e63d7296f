//! Canned demo payloads and believable latency.
//!
//! Everything here is deterministic: the fallback branch of each flow must
//! return byte-identical data across calls so the dashboard's before/after
//! tracker stays stable. The only side effect is the deliberate delay that
//! lets the UI show its pending state.

use crate::store::AttributeRecord;
use serde_json::{json, Value};
use std::time::Duration;

pub const MEMORY_FALLBACK_DELAY: Duration = Duration::from_millis(600);
pub const WEATHER_FALLBACK_DELAY: Duration = Duration::from_millis(800);
pub const EMAIL_FALLBACK_DELAY: Duration = Duration::from_millis(700);

/// Artificial network latency for fallback paths. Not cancellable; a handler
/// that entered a fallback runs it to completion.
pub async fn simulate_latency(delay: Duration) {
    tokio::time::sleep(delay).await;
}

/// Default preference record returned when a client has no stored memories.
/// Recall never reports "not found".
pub fn default_preferences() -> AttributeRecord {
    record(&[
        (
            "preferences",
            "Golden hour photography, urban backgrounds with architecture",
        ),
        ("style", "Modern editorial style"),
        ("notes", "Professional portfolio photos"),
    ])
}

/// The two clients every demo ledger starts with.
pub fn demo_clients() -> Vec<(String, AttributeRecord)> {
    vec![
        (
            "client-1".to_string(),
            record(&[
                (
                    "preferences",
                    "Prefers natural light, outdoor locations, candid shots",
                ),
                ("style", "Documentary style with some posed portraits"),
                ("notes", "Allergic to certain flowers"),
            ]),
        ),
        (
            "client-2".to_string(),
            record(&[
                (
                    "preferences",
                    "Prefers golden hour photography, urban backgrounds with architecture",
                ),
                ("style", "Modern and editorial style"),
                ("notes", "Wants photos for professional portfolio"),
            ]),
        ),
    ]
}

/// Fixed three-day forecast used in demo mode.
pub fn demo_forecast(location: &str) -> Value {
    json!({
        "location": location,
        "forecast": [
            { "date": "April 6", "condition": "Sunny", "temp": 72, "sunset": "6:45 PM", "icon": "☀️" },
            { "date": "April 7", "condition": "Partly Cloudy", "temp": 68, "sunset": "6:47 PM", "icon": "🌤️" },
            { "date": "April 8-9", "condition": "Rain", "temp": 62, "rainChance": 70, "icon": "🌧️" }
        ],
        "specialEvent": "Cherry blossom peak: 4 days",
        "recommendation": "Book April 6 or 7 immediately for best conditions"
    })
}

fn record(pairs: &[(&str, &str)]) -> AttributeRecord {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect()
}
