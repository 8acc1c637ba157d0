//! The three persisted collections and where they live.

use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::domain::{ArrivalAlarm, SearchPair, Stop};

use super::backend::{KeyValueStore, Slot};
use super::codec::{JsonCodec, SearchPairCodec};
use super::dedup::DedupStore;
use super::toggle::ToggleSet;

pub const RECENT_SEARCHES_NAMESPACE: &str = "recent_searches";
pub const RECENT_SEARCHES_KEY: &str = "recent_searches";

/// How many recent searches are remembered.
pub const RECENT_SEARCH_CAPACITY: NonZeroUsize = NonZeroUsize::new(5).unwrap();

pub const PREFERENCES_NAMESPACE: &str = "BusAppPrefs";
pub const FAVORITE_STOPS_KEY: &str = "favoriteBusStops";
pub const ARMED_ALARMS_KEY: &str = "alarmBusArrivals";

pub type RecentSearches = DedupStore<SearchPair, (String, String)>;
pub type FavoriteStops = ToggleSet<Stop, String>;
pub type ArmedAlarms = ToggleSet<ArrivalAlarm, (String, String, String)>;

/// Origin/destination pairs, most recent first.
pub fn recent_searches(backend: Arc<dyn KeyValueStore>) -> RecentSearches {
    DedupStore::new(
        backend,
        Slot::new(RECENT_SEARCHES_NAMESPACE, RECENT_SEARCHES_KEY),
        Arc::new(SearchPairCodec),
        SearchPair::key,
        RECENT_SEARCH_CAPACITY,
    )
}

/// Favorite stops, keyed by stop id.
pub fn favorite_stops(backend: Arc<dyn KeyValueStore>) -> FavoriteStops {
    ToggleSet::new(
        backend,
        Slot::new(PREFERENCES_NAMESPACE, FAVORITE_STOPS_KEY),
        Arc::new(JsonCodec::<Stop>::new()),
        Stop::key,
    )
}

/// Armed arrival alarms, keyed by (stop id, route number, route id).
pub fn armed_alarms(backend: Arc<dyn KeyValueStore>) -> ArmedAlarms {
    ToggleSet::new(
        backend,
        Slot::new(PREFERENCES_NAMESPACE, ARMED_ALARMS_KEY),
        Arc::new(JsonCodec::<ArrivalAlarm>::new()),
        ArrivalAlarm::key,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::backend::{FileStore, MemoryStore};
    use tempfile::tempdir;

    #[test]
    fn recent_searches_cap_at_five() {
        let recent = recent_searches(Arc::new(MemoryStore::new()));
        for i in 0..8 {
            recent.insert(SearchPair::new(format!("From {i}"), "Terminal"));
        }
        assert_eq!(recent.load().len(), 5);
        assert_eq!(recent.capacity(), 5);
    }

    #[test]
    fn recent_searches_stored_as_delimited_string() {
        let backend = Arc::new(MemoryStore::new());
        let recent = recent_searches(backend.clone());
        recent.insert(SearchPair::new("Home", "Work"));
        recent.insert(SearchPair::new("Work", "Gym"));

        assert_eq!(
            backend
                .read(RECENT_SEARCHES_NAMESPACE, RECENT_SEARCHES_KEY)
                .unwrap(),
            Some("Work::Gym|Home::Work".to_string())
        );
    }

    #[test]
    fn collections_share_one_backend_without_clobbering() {
        let dir = tempdir().unwrap();
        let backend: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(dir.path()));

        let favorites = favorite_stops(backend.clone());
        let alarms = armed_alarms(backend.clone());
        let recent = recent_searches(backend);

        favorites.toggle(Stop::new("S1"));
        alarms.toggle(ArrivalAlarm::new("S1", "100", "R1"));
        recent.insert(SearchPair::new("A", "B"));

        assert_eq!(favorites.load().len(), 1);
        assert_eq!(alarms.load().len(), 1);
        assert_eq!(recent.load(), vec![SearchPair::new("A", "B")]);
        assert!(dir.path().join("BusAppPrefs.json").exists());
        assert!(dir.path().join("recent_searches.json").exists());
    }

    #[test]
    fn stored_json_uses_entity_fields() {
        let backend = Arc::new(MemoryStore::new());
        armed_alarms(backend.clone()).toggle(ArrivalAlarm::new("S1", "100", "R1"));

        let text = backend
            .read(PREFERENCES_NAMESPACE, ARMED_ALARMS_KEY)
            .unwrap()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["stopId"], "S1");
        assert_eq!(value[0]["routeNumber"], "100");
        assert_eq!(value[0]["routeId"], "R1");
    }
}
