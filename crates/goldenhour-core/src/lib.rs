//! Golden Hour Studio — Core library.
//! Dual-mode service flows (real API vs. demo fallback) and the client memory
//! ledger behind the coordination gateway.

pub mod adapter;
pub mod demo;
pub mod email_flow;
pub mod envelope;
pub mod json_scan;
pub mod keys;
pub mod memory_flow;
pub mod store;
pub mod weather_flow;

pub use adapter::AdapterError;
pub use email_flow::send_quote_email;
pub use envelope::{ActionEnvelope, FailureEnvelope, ReportEnvelope};
pub use json_scan::extract_json_object;
pub use keys::{KeyProbe, ServiceKeys};
pub use memory_flow::{memory_recall, memory_store};
pub use store::{AttributeRecord, ClientMemoryStore};
pub use weather_flow::weather_lookup;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
