//! Domain types for the trip planner.
//!
//! Route results are built fresh for every directions query. Stops,
//! alarms and search pairs are the values held in the persisted
//! collections under [`crate::store`].

mod alarm;
mod mode;
mod route;
mod search;
mod stop;

pub use alarm::ArrivalAlarm;
pub use mode::{InvalidTravelMode, TravelMode};
pub use route::{DIRECT_RIDE, RouteOption, RouteStep, transfer_count, transfer_summary};
pub use search::SearchPair;
pub use stop::{DEFAULT_REGION_CODE, Stop};
