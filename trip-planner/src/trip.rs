//! Route search with recent-search bookkeeping.
//!
//! This is the call a UI shell makes when the user presses search: query
//! the route provider, then remember the pair at the front of the recent
//! searches list.

use tracing::{debug, warn};

use crate::directions::RouteProvider;
use crate::domain::{RouteOption, SearchPair, TravelMode};
use crate::store::RecentSearches;

/// What a search produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Route alternatives, primary first. Empty if none could be found.
    pub routes: Vec<RouteOption>,
    /// Recent searches after recording this one.
    pub recent: Vec<SearchPair>,
}

/// Runs searches against a route provider and records them.
pub struct TripPlanner<P> {
    provider: P,
    recent: RecentSearches,
}

impl<P: RouteProvider> TripPlanner<P> {
    pub fn new(provider: P, recent: RecentSearches) -> Self {
        Self { provider, recent }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Search for routes and record the pair as the most recent search.
    ///
    /// Blank input does nothing: no request is made and nothing is
    /// recorded. A search that finds no routes is still recorded.
    pub async fn search(
        &self,
        origin: &str,
        destination: &str,
        mode: TravelMode,
    ) -> SearchOutcome {
        if origin.trim().is_empty() || destination.trim().is_empty() {
            debug!("Ignoring search with blank origin or destination");
            return SearchOutcome {
                routes: Vec::new(),
                recent: self.recent_searches().await,
            };
        }

        let routes = self.provider.routes(origin, destination, mode).await;

        let recent = self.recent.clone();
        let pair = SearchPair::new(origin, destination);
        let recent = match tokio::task::spawn_blocking(move || recent.insert(pair)).await {
            Ok(list) => list,
            Err(e) => {
                warn!(error = %e, "Recording recent search failed");
                Vec::new()
            }
        };

        SearchOutcome { routes, recent }
    }

    /// Current recent searches, most recent first.
    pub async fn recent_searches(&self) -> Vec<SearchPair> {
        let recent = self.recent.clone();
        match tokio::task::spawn_blocking(move || recent.load()).await {
            Ok(list) => list,
            Err(e) => {
                warn!(error = %e, "Loading recent searches failed");
                Vec::new()
            }
        }
    }

    /// Forget all recent searches.
    pub async fn clear_recent_searches(&self) {
        let recent = self.recent.clone();
        if let Err(e) = tokio::task::spawn_blocking(move || recent.clear()).await {
            warn!(error = %e, "Clearing recent searches failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::directions::MockDirections;
    use crate::store::{MemoryStore, recent_searches};
    use serde_json::json;

    fn planner() -> TripPlanner<MockDirections> {
        let document = json!({
            "status": "OK",
            "routes": [{
                "overview_polyline": {"points": "??"},
                "legs": [{"duration": {"text": "9 mins"}, "steps": [
                    {"html_instructions": "Walk", "distance": {"text": "700 m"}}
                ]}]
            }]
        });
        TripPlanner::new(
            MockDirections::new(document),
            recent_searches(Arc::new(MemoryStore::new())),
        )
    }

    #[tokio::test]
    async fn search_records_pair_first() {
        let planner = planner();
        planner.search("Home", "Work", TravelMode::Transit).await;
        let outcome = planner.search("Work", "Gym", TravelMode::Transit).await;

        assert_eq!(outcome.routes.len(), 1);
        assert_eq!(
            outcome.recent,
            vec![SearchPair::new("Work", "Gym"), SearchPair::new("Home", "Work")]
        );
        assert_eq!(planner.recent_searches().await, outcome.recent);
    }

    #[tokio::test]
    async fn repeated_search_is_not_duplicated() {
        let planner = planner();
        planner.search("Home", "Work", TravelMode::Transit).await;
        planner.search("Work", "Gym", TravelMode::Transit).await;
        let outcome = planner.search("Home", "Work", TravelMode::Transit).await;

        assert_eq!(outcome.recent.len(), 2);
        assert_eq!(outcome.recent[0], SearchPair::new("Home", "Work"));
    }

    #[tokio::test]
    async fn blank_search_records_nothing() {
        let planner = planner();
        let outcome = planner.search(" ", "Work", TravelMode::Transit).await;

        assert!(outcome.routes.is_empty());
        assert!(outcome.recent.is_empty());
    }

    #[tokio::test]
    async fn clear_forgets_everything() {
        let planner = planner();
        planner.search("Home", "Work", TravelMode::Walking).await;
        planner.clear_recent_searches().await;
        assert!(planner.recent_searches().await.is_empty());
    }
}
