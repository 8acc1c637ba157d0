//! Directions service client and response parser.
//!
//! The external service does the path-finding. This module sends the
//! query, validates the JSON it returns, and turns each route alternative
//! into a [`RouteOption`] with decoded geometry and transfer counts.
//!
//! Failures are soft: a query that cannot be answered yields no routes,
//! and a route that cannot be read is dropped from an otherwise good
//! response.

mod client;
mod error;
mod mock;
mod parse;
mod types;

use std::future::Future;

use crate::domain::{RouteOption, TravelMode};

pub use client::{DirectionsClient, DirectionsConfig};
pub use error::{DirectionsError, ParseError};
pub use mock::MockDirections;
pub use parse::{parse_directions, parse_route, strip_markup};
pub use types::{LegDto, PolylineDto, RouteDto, StepDto, TextValue, TransitDetails, TransitLine};

/// Something that can answer a directions query.
///
/// Implementations never fail outward; an unanswerable query is an empty
/// list.
pub trait RouteProvider {
    fn routes(
        &self,
        origin: &str,
        destination: &str,
        mode: TravelMode,
    ) -> impl Future<Output = Vec<RouteOption>> + Send;
}

impl RouteProvider for DirectionsClient {
    fn routes(
        &self,
        origin: &str,
        destination: &str,
        mode: TravelMode,
    ) -> impl Future<Output = Vec<RouteOption>> + Send {
        self.fetch(origin, destination, mode)
    }
}
