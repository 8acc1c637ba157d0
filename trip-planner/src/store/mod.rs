//! Persisted collections: recent searches, favorite stops, armed alarms.
//!
//! Collections hold no state between calls. Each operation reads the whole
//! collection from a [`KeyValueStore`], changes it in memory, and writes it
//! back, so concurrent writers to the same slot race and the last write
//! wins. Callers are expected to serialize mutations per slot.
//!
//! Reads never fail outward: unreadable data is logged and treated as an
//! empty collection.

mod backend;
mod codec;
mod collections;
mod dedup;
mod error;
mod toggle;

pub use backend::{FileStore, KeyValueStore, MemoryStore, Slot};
pub use codec::{ENTRY_SEPARATOR, FIELD_SEPARATOR, JsonCodec, SearchPairCodec, ValueCodec};
pub use collections::{
    ARMED_ALARMS_KEY, ArmedAlarms, FAVORITE_STOPS_KEY, FavoriteStops, PREFERENCES_NAMESPACE,
    RECENT_SEARCH_CAPACITY, RECENT_SEARCHES_KEY, RECENT_SEARCHES_NAMESPACE, RecentSearches,
    armed_alarms, favorite_stops, recent_searches,
};
pub use dedup::DedupStore;
pub use error::StoreError;
pub use toggle::{ToggleSet, Toggled};
