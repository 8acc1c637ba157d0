//! Persisted set with toggle semantics.

use std::sync::Arc;

use tracing::{debug, warn};

use super::backend::{KeyValueStore, Slot};
use super::codec::ValueCodec;
use super::error::StoreError;

/// Result of [`ToggleSet::toggle_and_load`].
#[derive(Debug, Clone, PartialEq)]
pub struct Toggled<T> {
    /// Whether the toggled item is now a member.
    pub present: bool,
    /// Members after the toggle, in insertion order.
    pub members: Vec<T>,
}

/// A persisted set whose membership is decided by an identity key.
///
/// Two values with the same key are the same member even if their other
/// fields differ: toggling a stop whose cached name changed still removes
/// the stored copy. Members keep insertion order.
pub struct ToggleSet<T, K> {
    backend: Arc<dyn KeyValueStore>,
    slot: Slot,
    codec: Arc<dyn ValueCodec<T>>,
    key_fn: fn(&T) -> K,
}

impl<T, K> Clone for ToggleSet<T, K> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            slot: self.slot.clone(),
            codec: Arc::clone(&self.codec),
            key_fn: self.key_fn,
        }
    }
}

impl<T, K: PartialEq> ToggleSet<T, K> {
    pub fn new(
        backend: Arc<dyn KeyValueStore>,
        slot: Slot,
        codec: Arc<dyn ValueCodec<T>>,
        key_fn: fn(&T) -> K,
    ) -> Self {
        Self {
            backend,
            slot,
            codec,
            key_fn,
        }
    }

    pub fn slot(&self) -> &Slot {
        &self.slot
    }

    /// Load all members.
    ///
    /// Unreadable stored data is logged and treated as an empty set.
    pub fn load(&self) -> Vec<T> {
        self.try_load().unwrap_or_else(|e| {
            warn!(slot = %self.slot, error = %e, "Stored set unreadable, starting empty");
            Vec::new()
        })
    }

    /// Load all members, reporting unreadable data.
    ///
    /// If the stored data holds the same key twice only the first copy is
    /// kept.
    pub fn try_load(&self) -> Result<Vec<T>, StoreError> {
        let Some(text) = self.backend.read(&self.slot.namespace, &self.slot.key)? else {
            return Ok(Vec::new());
        };

        let mut members: Vec<T> = Vec::new();
        for item in self.codec.decode(&text)? {
            let key = (self.key_fn)(&item);
            if !members.iter().any(|m| (self.key_fn)(m) == key) {
                members.push(item);
            }
        }
        Ok(members)
    }

    /// Whether a member with the same key as `item` is present.
    pub fn contains(&self, item: &T) -> bool {
        self.contains_key(&(self.key_fn)(item))
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.load().iter().any(|m| (self.key_fn)(m) == *key)
    }

    /// Add `item` if absent, remove it if present.
    ///
    /// Returns `true` if the item is now a member.
    pub fn toggle(&self, item: T) -> bool {
        self.toggle_and_load(item).present
    }

    /// Toggle `item` and return the updated members in one call.
    pub fn toggle_and_load(&self, item: T) -> Toggled<T> {
        let mut members = self.load();
        let key = (self.key_fn)(&item);

        let before = members.len();
        members.retain(|m| (self.key_fn)(m) != key);
        let present = members.len() == before;
        if present && !self.codec.accepts(&item) {
            warn!(slot = %self.slot, "Item cannot be stored, set left unchanged");
            return Toggled {
                present: false,
                members,
            };
        }
        if present {
            members.push(item);
        }

        debug!(slot = %self.slot, present, members = members.len(), "Toggled member");
        self.persist(&members);
        Toggled { present, members }
    }

    /// Remove the member with `key`, if any. Returns the remaining members.
    pub fn remove(&self, key: &K) -> Vec<T> {
        let mut members = self.load();
        let before = members.len();
        members.retain(|m| (self.key_fn)(m) != *key);
        if members.len() != before {
            self.persist(&members);
        }
        members
    }

    /// Remove every member.
    pub fn clear(&self) {
        self.persist(&[]);
    }

    fn persist(&self, members: &[T]) {
        if let Err(e) = self.try_persist(members) {
            warn!(slot = %self.slot, error = %e, "Failed to persist set");
        }
    }

    fn try_persist(&self, members: &[T]) -> Result<(), StoreError> {
        let text = self.codec.encode(members)?;
        self.backend
            .write(&self.slot.namespace, &self.slot.key, &text)
    }
}
