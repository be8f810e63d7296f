//! Uniform response envelopes shared by the gateway flows.
//!
//! Every successful flow — real API or fallback — answers HTTP 200 with one
//! of these shapes; only the provenance label and the `realAPI`/`realData`
//! flag tell the paths apart. `duration` is wall-clock milliseconds from
//! request receipt to envelope assembly.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

/// `result` + `realAPI` envelope (memory and email flows).
#[derive(Debug, Serialize)]
pub struct ActionEnvelope {
    pub success: bool,
    pub duration: u64,
    pub result: Value,
    pub service: String,
    #[serde(rename = "realAPI")]
    pub real_api: bool,
    pub timestamp: String,
}

/// `data` + `realData` envelope (weather flow).
#[derive(Debug, Serialize)]
pub struct ReportEnvelope {
    pub success: bool,
    pub duration: u64,
    pub data: Value,
    pub service: String,
    #[serde(rename = "realData")]
    pub real_data: bool,
    pub timestamp: String,
}

/// HTTP 500 envelope for unexpected errors outside the adapter/fallback
/// branches (e.g. a malformed request body).
#[derive(Debug, Serialize)]
pub struct FailureEnvelope {
    pub success: bool,
    pub duration: u64,
    pub error: String,
}

impl FailureEnvelope {
    pub fn new(duration: u64, error: &str) -> Self {
        Self {
            success: false,
            duration,
            error: error.to_string(),
        }
    }
}

/// Current UTC time as ISO-8601 with millisecond precision, matching the
/// dashboard's expectations.
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
