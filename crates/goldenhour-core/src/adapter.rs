//! Outbound call failure taxonomy shared by the service adapters.

use std::fmt;

/// Why an adapter call produced no usable data. Dispatchers pattern-match on
/// this to choose the demo fallback; it is logged server-side and never
/// surfaced to the client.
#[derive(Debug)]
pub enum AdapterError {
    /// Transport-level failure (DNS, TLS, connect, timeout).
    Network(reqwest::Error),
    /// The service answered with a non-success status.
    Status(u16, String),
    /// The response body did not parse into the expected shape.
    Parse(String),
}

impl fmt::Display for AdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdapterError::Network(e) => write!(f, "request: {}", e),
            AdapterError::Status(code, body) => write!(f, "status {}: {}", code, body),
            AdapterError::Parse(e) => write!(f, "response parse: {}", e),
        }
    }
}

impl std::error::Error for AdapterError {}

impl From<reqwest::Error> for AdapterError {
    fn from(e: reqwest::Error) -> Self {
        AdapterError::Network(e)
    }
}
