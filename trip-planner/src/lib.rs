//! Trip planning core for a bus companion app.
//!
//! Answers "how do I get from here to there?" by querying an external
//! directions service, and keeps the user's small persisted collections:
//! recent searches, favorite stops and armed arrival alarms.

pub mod directions;
pub mod domain;
pub mod polyline;
pub mod store;
pub mod trip;
