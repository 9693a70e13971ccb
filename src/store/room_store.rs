//! Offer/answer storage shared by all requests.

use std::sync::Arc;

use dashmap::DashMap;

use crate::store::types::{Resource, RoomKey};

/// In-memory map from [`RoomKey`] to the most recent payload.
///
/// Cloning is cheap and every clone sees the same entries. Each operation
/// holds a shard lock only for its own duration, so operations on one key
/// are linearizable.
#[derive(Debug, Clone, Default)]
pub struct RoomStore {
    inner: Arc<DashMap<RoomKey, String>>,
}

impl RoomStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `payload`, replacing whatever the key held before.
    ///
    /// Callers reject empty payloads before reaching the store.
    pub fn put(&self, resource: Resource, room_id: &str, payload: String) {
        let replaced = self
            .inner
            .insert(RoomKey::new(resource, room_id), payload)
            .is_some();
        tracing::debug!(room_id = %room_id, resource = %resource, replaced, "Payload stored");
    }

    /// Current payload for the key, without removing it.
    pub fn get(&self, resource: Resource, room_id: &str) -> Option<String> {
        self.inner
            .get(&RoomKey::new(resource, room_id))
            .map(|entry| entry.value().clone())
    }

    /// Remove and return the payload for the key.
    pub fn take(&self, resource: Resource, room_id: &str) -> Option<String> {
        let taken = self
            .inner
            .remove(&RoomKey::new(resource, room_id))
            .map(|(_, payload)| payload);
        tracing::debug!(room_id = %room_id, resource = %resource, found = taken.is_some(), "Payload taken");
        taken
    }

    /// Number of stored payloads across all rooms.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
