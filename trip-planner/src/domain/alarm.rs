//! Armed arrival alarms.

use serde::{Deserialize, Serialize};

/// An alarm for a route's next arrival at a stop.
///
/// Identity is the whole `(stop_id, route_number, route_id)` triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalAlarm {
    #[serde(alias = "nodeId")]
    pub stop_id: String,

    /// Number shown to riders, e.g. "100".
    #[serde(alias = "routeNo")]
    pub route_number: String,

    pub route_id: String,
}

impl ArrivalAlarm {
    pub fn new(
        stop_id: impl Into<String>,
        route_number: impl Into<String>,
        route_id: impl Into<String>,
    ) -> Self {
        Self {
            stop_id: stop_id.into(),
            route_number: route_number.into(),
            route_id: route_id.into(),
        }
    }

    /// Identity key for armed-set membership.
    pub fn key(&self) -> (String, String, String) {
        (
            self.stop_id.clone(),
            self.route_number.clone(),
            self.route_id.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_the_triple() {
        let a = ArrivalAlarm::new("S1", "100", "R100");
        let b = ArrivalAlarm::new("S1", "100", "R100-B");
        assert_ne!(a.key(), b.key());
        assert_eq!(a.key(), ArrivalAlarm::new("S1", "100", "R100").key());
    }

    #[test]
    fn json_field_names() {
        let alarm = ArrivalAlarm::new("S1", "100", "R100");
        let json = serde_json::to_string(&alarm).unwrap();
        assert_eq!(
            json,
            r#"{"stopId":"S1","routeNumber":"100","routeId":"R100"}"#
        );
    }

    #[test]
    fn legacy_field_names() {
        let alarm: ArrivalAlarm =
            serde_json::from_str(r#"{"nodeId":"S1","routeNo":"100","routeId":"R100","arrTime":120}"#)
                .unwrap();
        assert_eq!(alarm, ArrivalAlarm::new("S1", "100", "R100"));
    }
}
