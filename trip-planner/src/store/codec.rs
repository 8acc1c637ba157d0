//! Text encodings for persisted collections.

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::SearchPair;

use super::error::StoreError;

/// Converts a whole collection to and from its stored text.
pub trait ValueCodec<T>: Send + Sync {
    fn encode(&self, items: &[T]) -> Result<String, StoreError>;

    fn decode(&self, text: &str) -> Result<Vec<T>, StoreError>;

    /// Whether `item` survives an encode and decode unchanged.
    fn accepts(&self, _item: &T) -> bool {
        true
    }
}

/// Stores a collection as a JSON array.
///
/// Elements that fail to deserialize are skipped so that one bad record
/// does not hide the rest. Text that is not an array at all is an error.
pub struct JsonCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonCodec<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for JsonCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ValueCodec<T> for JsonCodec<T>
where
    T: Serialize + DeserializeOwned,
{
    fn encode(&self, items: &[T]) -> Result<String, StoreError> {
        serde_json::to_string(items).map_err(|e| StoreError::Encode(e.to_string()))
    }

    fn decode(&self, text: &str) -> Result<Vec<T>, StoreError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let raw: Vec<serde_json::Value> =
            serde_json::from_str(text).map_err(|e| StoreError::Corrupt {
                location: "JSON array".to_string(),
                message: e.to_string(),
            })?;

        let mut items = Vec::with_capacity(raw.len());
        for (index, value) in raw.into_iter().enumerate() {
            match serde_json::from_value(value) {
                Ok(item) => items.push(item),
                Err(e) => warn!(index, error = %e, "Skipping unreadable stored record"),
            }
        }
        Ok(items)
    }
}

/// Separates entries: `origin1::dest1|origin2::dest2`.
pub const ENTRY_SEPARATOR: &str = "|";

/// Separates origin from destination within an entry.
pub const FIELD_SEPARATOR: &str = "::";

/// Stores search pairs as one delimiter-joined string.
///
/// Pairs whose text would not survive the round trip (they contain a
/// separator, or a colon adjacent to the field separator) are left out of
/// the encoded string.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchPairCodec;

impl SearchPairCodec {
    fn decode_entry(entry: &str) -> Option<SearchPair> {
        let mut parts = entry.split(FIELD_SEPARATOR);
        let origin = parts.next()?;
        let destination = parts.next()?;
        if parts.next().is_some() {
            return None;
        }
        Some(SearchPair::new(origin, destination))
    }

    fn encode_entry(pair: &SearchPair) -> Option<String> {
        if pair.origin.contains(ENTRY_SEPARATOR) || pair.destination.contains(ENTRY_SEPARATOR) {
            return None;
        }
        let entry = format!("{}{FIELD_SEPARATOR}{}", pair.origin, pair.destination);
        (Self::decode_entry(&entry).as_ref() == Some(pair)).then_some(entry)
    }
}

impl ValueCodec<SearchPair> for SearchPairCodec {
    fn accepts(&self, pair: &SearchPair) -> bool {
        Self::encode_entry(pair).is_some()
    }

    fn encode(&self, items: &[SearchPair]) -> Result<String, StoreError> {
        let entries: Vec<String> = items
            .iter()
            .filter_map(|pair| {
                let entry = Self::encode_entry(pair);
                if entry.is_none() {
                    warn!(pair = %pair, "Search pair contains separators, not persisting it");
                }
                entry
            })
            .collect();
        Ok(entries.join(ENTRY_SEPARATOR))
    }

    fn decode(&self, text: &str) -> Result<Vec<SearchPair>, StoreError> {
        if text.is_empty() {
            return Ok(Vec::new());
        }
        Ok(text
            .split(ENTRY_SEPARATOR)
            .filter_map(|entry| {
                let pair = Self::decode_entry(entry);
                if pair.is_none() {
                    debug!(entry, "Ignoring malformed search entry");
                }
                pair
            })
            .collect())
    }
}
