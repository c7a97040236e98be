//! Temporary carry-over of form state between two sequential page loads.
//!
//! The quote flow spans two pages: the form posts a snapshot, the
//! confirmation page reads it back, and a confirmed submission consumes it.
//! This store gives that flow an explicit capability instead of ambient
//! state: `put` under a fresh key, `peek_and_rearm` for display (the entry
//! survives a further redirect, e.g. the edit round-trip), `take` to consume
//! it exactly once.
//!
//! The store is the only shared state in the application. It is created in
//! `main.rs` and injected into the Actix application as `web::Data`.

use serde_json::Value;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

/// A thread-safe, shareable key-value store for pending quote snapshots.
#[derive(Clone)]
pub struct SessionStore {
    entries: Arc<RwLock<HashMap<String, Value>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        SessionStore {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Stores a value under the given key, replacing any previous entry.
    pub async fn put(&self, key: String, value: Value) {
        let mut entries = self.entries.write().await;
        entries.insert(key, value);
    }

    /// Removes and returns the entry. One read, then it is gone.
    pub async fn take(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.write().await;
        entries.remove(key)
    }

    /// Returns a copy of the entry and leaves it armed for the next read.
    pub async fn peek_and_rearm(&self, key: &str) -> Option<Value> {
        let entries = self.entries.read().await;
        entries.get(key).cloned()
    }
}
