//! Conversion from directions JSON to route options.
//!
//! Each route is validated on its own. A route that is missing its
//! geometry or legs, or whose geometry does not decode, is dropped and the
//! rest are kept. Within a route, a step that does not match the schema is
//! skipped; missing labels and instructions become empty text.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{RouteOption, RouteStep, TravelMode, transfer_count, transfer_summary};
use crate::polyline;

use super::error::ParseError;
use super::types::{RouteDto, StepDto, label};

static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("markup pattern is valid"));

/// Convert a directions response into route options.
///
/// Routes keep the service's order. A response with no `routes` array, or
/// an empty one, yields no options.
pub fn parse_directions(response: &Value) -> Vec<RouteOption> {
    let Some(routes) = response.get("routes").and_then(Value::as_array) else {
        debug!("Directions response has no routes array");
        return Vec::new();
    };

    let mut options = Vec::with_capacity(routes.len());
    for (index, route) in routes.iter().enumerate() {
        match parse_route(route) {
            Ok(option) => options.push(option),
            Err(e) => warn!(route = index, error = %e, "Dropping unreadable route"),
        }
    }
    options
}

/// Validate and convert a single route.
pub fn parse_route(route: &Value) -> Result<RouteOption, ParseError> {
    let dto = RouteDto::deserialize(route).map_err(|e| ParseError::Schema(e.to_string()))?;

    let encoded_polyline = dto
        .overview_polyline
        .and_then(|p| p.points)
        .ok_or(ParseError::MissingField("overview_polyline.points"))?;
    let path = polyline::decode(&encoded_polyline)?;

    let leg = dto.legs.into_iter().next().ok_or(ParseError::NoLegs)?;
    let total_duration = label(&leg.duration);

    let steps: Vec<StepDto> = leg
        .steps
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| match StepDto::deserialize(raw) {
            Ok(step) => Some(step),
            Err(e) => {
                debug!(step = index, error = %e, "Skipping malformed step");
                None
            }
        })
        .collect();

    let transit_steps = steps
        .iter()
        .filter(|s| s.transit_details.is_some())
        .count();
    let transfers = transfer_count(transit_steps);
    let summary = transfer_summary(transfers);

    let steps = steps
        .iter()
        .map(|step| convert_step(step, &summary))
        .collect();

    Ok(RouteOption {
        steps,
        total_duration,
        encoded_polyline,
        transfer_count: transfers,
        path,
    })
}

fn convert_step(step: &StepDto, transfer_summary: &str) -> RouteStep {
    let instruction = step
        .html_instructions
        .as_deref()
        .map(strip_markup)
        .unwrap_or_default();

    let transit_label = step
        .transit_details
        .as_ref()
        .and_then(|t| t.line.as_ref())
        .and_then(|line| line.short_name.clone())
        .filter(|name| !name.is_empty());

    let travel_mode = match step.travel_mode.as_deref() {
        Some(mode) => mode.parse::<TravelMode>().ok(),
        None if step.transit_details.is_some() => Some(TravelMode::Transit),
        None => None,
    };

    RouteStep {
        instruction,
        distance: label(&step.distance),
        duration: label(&step.duration),
        transit_label,
        travel_mode,
        transfer_summary: transfer_summary.to_string(),
    }
}

/// Remove every `<...>` tag, keeping the text between tags.
pub fn strip_markup(html: &str) -> String {
    MARKUP_TAG.replace_all(html, "").into_owned()
}
