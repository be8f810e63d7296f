//! Client memory ledger — process-lifetime substitute for hosted storage.
//!
//! One map behind one mutex. Constructed once by the gateway binary (or per
//! test) and injected through state; never a module-level singleton.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::sync::Mutex;

/// Open-ended attribute mapping for a client (preferences, style, notes, ...).
pub type AttributeRecord = Map<String, Value>;

/// In-memory client attribute store. Records are created on first store or
/// recall and live for the process lifetime; there is no TTL or eviction.
pub struct ClientMemoryStore {
    inner: Mutex<IndexMap<String, AttributeRecord>>,
}

impl ClientMemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(IndexMap::new()),
        }
    }

    /// Store pre-populated with the two demo clients the dashboard ships with.
    pub fn with_demo_clients() -> Self {
        let store = Self::new();
        for (client_id, record) in crate::demo::demo_clients() {
            store.merge(&client_id, record);
        }
        store
    }

    /// Shallow-merge `partial` into the record for `client_id`, creating the
    /// record if absent. Later keys overwrite same-named earlier keys;
    /// attributes not named in `partial` survive.
    pub fn merge(&self, client_id: &str, partial: AttributeRecord) {
        let mut map = self.lock();
        let record = map.entry(client_id.to_string()).or_default();
        for (key, value) in partial {
            record.insert(key, value);
        }
    }

    /// Current record for `client_id`, if any.
    pub fn get(&self, client_id: &str) -> Option<AttributeRecord> {
        self.lock().get(client_id).cloned()
    }

    /// All records, in insertion order.
    pub fn list(&self) -> Vec<(String, AttributeRecord)> {
        self.lock()
            .iter()
            .map(|(id, record)| (id.clone(), record.clone()))
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, IndexMap<String, AttributeRecord>> {
        // A poisoned lock only means another request panicked mid-write; the
        // demo ledger is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for ClientMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
