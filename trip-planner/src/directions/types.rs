//! Directions response schema.
//!
//! These types map the parts of the directions JSON the parser reads.
//! Everything is optional: the service omits fields rather than sending
//! nulls, and required-ness is decided in one validation pass in
//! [`super::parse`], not here. Step lists stay as raw JSON so a single
//! malformed step can be skipped without losing its route.

use serde::Deserialize;

/// One route alternative.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteDto {
    /// Geometry of the whole route.
    pub overview_polyline: Option<PolylineDto>,

    /// Legs between waypoints. Queries without waypoints have exactly one.
    #[serde(default)]
    pub legs: Vec<LegDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PolylineDto {
    pub points: Option<String>,
}

/// A leg of a route.
#[derive(Debug, Clone, Deserialize)]
pub struct LegDto {
    pub duration: Option<TextValue>,

    /// Raw steps; each is checked against [`StepDto`] separately.
    #[serde(default)]
    pub steps: Vec<serde_json::Value>,
}

/// A localized label such as "12 mins" or "1.4 km".
#[derive(Debug, Clone, Deserialize)]
pub struct TextValue {
    pub text: Option<String>,
}

/// A single step of a leg.
#[derive(Debug, Clone, Deserialize)]
pub struct StepDto {
    /// Instruction with inline HTML markup.
    pub html_instructions: Option<String>,

    pub distance: Option<TextValue>,

    pub duration: Option<TextValue>,

    /// Upper-case mode name, e.g. "WALKING" or "TRANSIT".
    pub travel_mode: Option<String>,

    /// Present only on transit steps.
    pub transit_details: Option<TransitDetails>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransitDetails {
    pub line: Option<TransitLine>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransitLine {
    /// Rider-facing line number, e.g. "100".
    pub short_name: Option<String>,
}

/// Label text, or empty when absent.
pub(super) fn label(value: &Option<TextValue>) -> String {
    value
        .as_ref()
        .and_then(|v| v.text.clone())
        .unwrap_or_default()
}
