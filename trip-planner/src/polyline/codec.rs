//! Polyline decoder and reference encoder.

use super::error::PolylineError;
use super::point::GeoPoint;

/// Coordinates are stored as integer multiples of 1e-5 degrees.
const PRECISION: f64 = 1e5;

/// Every character carries its value offset by this amount.
const CHAR_OFFSET: u8 = 63;

/// Set on every 5-bit group except the last one of a value.
const CONTINUATION_BIT: i64 = 0x20;

const GROUP_MASK: i64 = 0x1f;

/// Seven groups hold 35 bits, enough for any 32-bit delta.
const MAX_SHIFT: u32 = 35;

/// Decode an encoded polyline into its points.
///
/// The empty string decodes to an empty path.
///
/// # Examples
///
/// ```
/// use trip_planner::polyline::{GeoPoint, decode};
///
/// let points = decode("_p~iF~ps|U_ulLnnqC").unwrap();
/// assert_eq!(points, vec![GeoPoint::new(38.5, -120.2), GeoPoint::new(40.7, -120.95)]);
///
/// assert!(decode("").unwrap().is_empty());
/// assert!(decode("_p~iF~").is_err());
/// ```
pub fn decode(encoded: &str) -> Result<Vec<GeoPoint>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while index < bytes.len() {
        lat += next_delta(bytes, &mut index)?;
        lng += next_delta(bytes, &mut index)?;
        points.push(GeoPoint::new(
            lat as f64 / PRECISION,
            lng as f64 / PRECISION,
        ));
    }

    Ok(points)
}

/// Read one zig-zag encoded value starting at `index`, advancing past it.
fn next_delta(bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let start = *index;
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let byte = *bytes
            .get(*index)
            .ok_or(PolylineError::Truncated { index: *index })?;
        if !(CHAR_OFFSET..=126).contains(&byte) {
            return Err(PolylineError::InvalidCharacter {
                index: *index,
                byte,
            });
        }
        *index += 1;

        let group = i64::from(byte - CHAR_OFFSET);
        result |= (group & GROUP_MASK) << shift;
        if group & CONTINUATION_BIT == 0 {
            break;
        }

        shift += 5;
        if shift >= MAX_SHIFT {
            return Err(PolylineError::Overflow { index: start });
        }
    }

    // Low bit carries the sign.
    if result & 1 != 0 {
        Ok(!(result >> 1))
    } else {
        Ok(result >> 1)
    }
}

/// Encode points as a polyline string.
///
/// Coordinates are rounded to five decimal places, so
/// `decode(&encode(points))` returns `points` exactly whenever every
/// coordinate already has at most five decimals.
pub fn encode(points: &[GeoPoint]) -> String {
    let mut out = String::with_capacity(points.len() * 8);
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for point in points {
        let lat = scale(point.latitude);
        let lng = scale(point.longitude);
        push_value(&mut out, lat - prev_lat);
        push_value(&mut out, lng - prev_lng);
        prev_lat = lat;
        prev_lng = lng;
    }

    out
}

fn scale(degrees: f64) -> i64 {
    (degrees * PRECISION).round() as i64
}

fn push_value(out: &mut String, delta: i64) {
    let folded = if delta < 0 { !(delta << 1) } else { delta << 1 };
    let mut value = folded as u64;

    while value >= CONTINUATION_BIT as u64 {
        let group = (CONTINUATION_BIT as u64 | (value & GROUP_MASK as u64)) as u8;
        out.push(char::from(group + CHAR_OFFSET));
        value >>= 5;
    }
    out.push(char::from(value as u8 + CHAR_OFFSET));
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        /// A point whose coordinates have at most five decimals.
        fn five_decimal_point()(
            lat in -9_000_000i64..=9_000_000,
            lng in -18_000_000i64..=18_000_000,
        ) -> GeoPoint {
            GeoPoint::new(lat as f64 / PRECISION, lng as f64 / PRECISION)
        }
    }

    proptest! {
        /// Encoding then decoding returns the original points
        #[test]
        fn roundtrip(points in proptest::collection::vec(five_decimal_point(), 0..50)) {
            let decoded = decode(&encode(&points)).unwrap();
            prop_assert_eq!(decoded, points);
        }

        /// Encoded output only uses the printable polyline alphabet
        #[test]
        fn encoded_is_printable(points in proptest::collection::vec(five_decimal_point(), 0..20)) {
            let encoded = encode(&points);
            prop_assert!(encoded.bytes().all(|b| (63..=126).contains(&b)));
        }

        /// Decoding arbitrary text never panics
        #[test]
        fn decode_never_panics(s in "\\PC{0,40}") {
            let _ = decode(&s);
        }

        /// Any strict prefix ending in a continuation group is rejected
        #[test]
        fn cut_after_continuation_is_truncated(points in proptest::collection::vec(five_decimal_point(), 1..10)) {
            let encoded = encode(&points);
            for (i, b) in encoded.bytes().enumerate() {
                if i64::from(b - CHAR_OFFSET) & CONTINUATION_BIT != 0 {
                    prop_assert!(decode(&encoded[..=i]).is_err());
                }
            }
        }
    }
}
