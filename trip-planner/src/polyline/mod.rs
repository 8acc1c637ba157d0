//! Encoded polyline geometry.
//!
//! Route geometry arrives as a compact ASCII string: each coordinate is a
//! signed delta from the previous one, scaled by 1e5, zig-zag folded and
//! split into 5-bit groups offset by 63. This module decodes that format
//! into [`GeoPoint`]s and provides the matching encoder.

mod codec;
mod error;
mod point;

pub use codec::{decode, encode};
pub use error::PolylineError;
pub use point::GeoPoint;
