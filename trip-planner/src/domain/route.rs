//! Route alternatives returned by a directions query.

use serde::Serialize;

use crate::polyline::GeoPoint;

use super::TravelMode;

/// Transfer summary for a route with at most one transit leg.
pub const DIRECT_RIDE: &str = "Direct";

/// One instruction within a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteStep {
    /// Instruction text with markup removed.
    pub instruction: String,
    pub distance: String,
    /// Empty when the service omitted a duration for this step.
    pub duration: String,
    /// Line short name; only set on transit steps that have one.
    pub transit_label: Option<String>,
    pub travel_mode: Option<TravelMode>,
    /// Same for every step of a route.
    pub transfer_summary: String,
}

impl RouteStep {
    pub fn is_transit(&self) -> bool {
        self.transit_label.is_some() || self.travel_mode == Some(TravelMode::Transit)
    }
}

/// A single route alternative.
///
/// Alternatives keep the order the service returned them in, so the first
/// option of a result is the primary route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteOption {
    pub steps: Vec<RouteStep>,
    pub total_duration: String,
    pub encoded_polyline: String,
    pub transfer_count: usize,
    /// `encoded_polyline`, decoded.
    pub path: Vec<GeoPoint>,
}

impl RouteOption {
    pub fn is_direct(&self) -> bool {
        self.transfer_count == 0
    }

    /// Short names of the transit lines ridden, in order.
    pub fn transit_lines(&self) -> impl Iterator<Item = &str> {
        self.steps
            .iter()
            .filter_map(|step| step.transit_label.as_deref())
    }

    /// Last point of the route geometry.
    pub fn destination(&self) -> Option<GeoPoint> {
        self.path.last().copied()
    }
}

/// Number of vehicle changes for a route with `transit_steps` transit legs.
///
/// A single transit leg is a direct ride, and a route with no transit legs
/// has nothing to change between, so both count as zero. Transit legs are
/// counted regardless of what separates them.
pub fn transfer_count(transit_steps: usize) -> usize {
    transit_steps.saturating_sub(1)
}

/// Human-readable transfer summary.
pub fn transfer_summary(transfers: usize) -> String {
    match transfers {
        0 => DIRECT_RIDE.to_string(),
        1 => "1 transfer".to_string(),
        n => format!("{n} transfers"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(label: Option<&str>, mode: TravelMode) -> RouteStep {
        RouteStep {
            instruction: "Go".into(),
            distance: "1 km".into(),
            duration: "3 mins".into(),
            transit_label: label.map(str::to_string),
            travel_mode: Some(mode),
            transfer_summary: DIRECT_RIDE.into(),
        }
    }

    #[test]
    fn transfer_count_floors_at_zero() {
        assert_eq!(transfer_count(0), 0);
        assert_eq!(transfer_count(1), 0);
        assert_eq!(transfer_count(2), 1);
        assert_eq!(transfer_count(5), 4);
    }

    #[test]
    fn summary_labels() {
        assert_eq!(transfer_summary(0), DIRECT_RIDE);
        assert_eq!(transfer_summary(1), "1 transfer");
        assert_eq!(transfer_summary(3), "3 transfers");
    }

    #[test]
    fn transit_lines_in_order() {
        let route = RouteOption {
            steps: vec![
                step(None, TravelMode::Walking),
                step(Some("100"), TravelMode::Transit),
                step(Some("2"), TravelMode::Transit),
            ],
            total_duration: "40 mins".into(),
            encoded_polyline: String::new(),
            transfer_count: 1,
            path: vec![],
        };
        assert_eq!(route.transit_lines().collect::<Vec<_>>(), vec!["100", "2"]);
        assert!(!route.is_direct());
        assert!(route.destination().is_none());
    }

    #[test]
    fn transit_step_without_label() {
        assert!(step(None, TravelMode::Transit).is_transit());
        assert!(!step(None, TravelMode::Walking).is_transit());
    }
}
