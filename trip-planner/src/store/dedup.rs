//! Bounded most-recent-first list with key deduplication.

use std::num::NonZeroUsize;
use std::sync::Arc;

use tracing::warn;

use super::backend::{KeyValueStore, Slot};
use super::codec::ValueCodec;
use super::error::StoreError;

/// A persisted list ordered most-recent first.
///
/// Entries are compared by the key `key_fn` extracts. The list never holds
/// two entries with the same key and never grows past `capacity`.
///
/// Every operation reads the full list from the backend and writes it back;
/// nothing is cached between calls.
pub struct DedupStore<T, K> {
    backend: Arc<dyn KeyValueStore>,
    slot: Slot,
    codec: Arc<dyn ValueCodec<T>>,
    key_fn: fn(&T) -> K,
    capacity: NonZeroUsize,
}

impl<T, K> Clone for DedupStore<T, K> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            slot: self.slot.clone(),
            codec: Arc::clone(&self.codec),
            key_fn: self.key_fn,
            capacity: self.capacity,
        }
    }
}

impl<T, K: PartialEq> DedupStore<T, K> {
    pub fn new(
        backend: Arc<dyn KeyValueStore>,
        slot: Slot,
        codec: Arc<dyn ValueCodec<T>>,
        key_fn: fn(&T) -> K,
        capacity: NonZeroUsize,
    ) -> Self {
        Self {
            backend,
            slot,
            codec,
            key_fn,
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    pub fn slot(&self) -> &Slot {
        &self.slot
    }

    /// Load the list.
    ///
    /// Unreadable stored data is logged and treated as an empty list.
    pub fn load(&self) -> Vec<T> {
        self.try_load().unwrap_or_else(|e| {
            warn!(slot = %self.slot, error = %e, "Stored list unreadable, starting empty");
            Vec::new()
        })
    }

    /// Load the list, reporting unreadable data.
    ///
    /// Stored data that breaks the invariants (duplicate keys, too many
    /// entries) is normalized: the earliest occurrence of a key wins and
    /// the list is truncated to capacity.
    pub fn try_load(&self) -> Result<Vec<T>, StoreError> {
        let Some(text) = self.backend.read(&self.slot.namespace, &self.slot.key)? else {
            return Ok(Vec::new());
        };
        let stored = self.codec.decode(&text)?;

        let mut items: Vec<T> = Vec::with_capacity(stored.len().min(self.capacity()));
        for item in stored {
            if items.len() == self.capacity() {
                break;
            }
            let key = (self.key_fn)(&item);
            if !items.iter().any(|existing| (self.key_fn)(existing) == key) {
                items.push(item);
            }
        }
        Ok(items)
    }

    /// Move `item` to the front, dropping any entry with the same key and
    /// evicting the oldest entries beyond capacity.
    ///
    /// Returns the updated list. A failed write is logged; the returned
    /// list still reflects the insertion. An item the codec cannot store is
    /// not inserted and the stored list is returned unchanged.
    pub fn insert(&self, item: T) -> Vec<T> {
        let mut items = self.load();
        if !self.codec.accepts(&item) {
            warn!(slot = %self.slot, "Item cannot be stored, list left unchanged");
            return items;
        }
        let key = (self.key_fn)(&item);
        items.retain(|existing| (self.key_fn)(existing) != key);
        items.insert(0, item);
        items.truncate(self.capacity());
        self.persist(&items);
        items
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.persist(&[]);
    }

    fn persist(&self, items: &[T]) {
        if let Err(e) = self.try_persist(items) {
            warn!(slot = %self.slot, error = %e, "Failed to persist list");
        }
    }

    fn try_persist(&self, items: &[T]) -> Result<(), StoreError> {
        let text = self.codec.encode(items)?;
        self.backend
            .write(&self.slot.namespace, &self.slot.key, &text)
    }
}
