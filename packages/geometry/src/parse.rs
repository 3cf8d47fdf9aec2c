//! `LINESTRING` text parser.
//!
//! The cable inventory stores geometry as
//! `LINESTRING (lon1 lat1, lon2 lat2, ...)` — well-known-text coordinate
//! order, longitude first. Parsing swaps each pair into the internal
//! (lat, lon) representation; this is the only place in the codebase where
//! the swap happens.

use crate::{GeoLine, GeoPoint, GeometryError};

/// Parses `LINESTRING (lon lat, lon lat, ...)` into a [`GeoLine`].
///
/// The `LINESTRING` keyword is matched case-insensitively and surrounding
/// whitespace is tolerated. Each point needs at least two numeric tokens;
/// tokens past the first two (e.g. a z value) are ignored.
///
/// # Errors
///
/// Returns [`GeometryError::Malformed`] when the wrapper is missing, a
/// point has fewer than two tokens, or a token is not a valid float, and
/// [`GeometryError::OutOfRange`] when a parsed coordinate is outside the
/// WGS84 range.
pub fn parse_linestring(text: &str) -> Result<GeoLine, GeometryError> {
    let inner = strip_wrapper(text)?;

    let mut points = Vec::new();
    for (idx, chunk) in inner.split(',').enumerate() {
        let mut tokens = chunk.split_whitespace();

        let lon = parse_token(tokens.next(), idx, "longitude")?;
        let lat = parse_token(tokens.next(), idx, "latitude")?;

        // Swap to internal (lat, lon) order here and nowhere else.
        points.push(GeoPoint::new(lat, lon)?);
    }

    GeoLine::new(points)
}

/// Strips the `LINESTRING ( ... )` wrapper, returning the inner point list.
fn strip_wrapper(text: &str) -> Result<&str, GeometryError> {
    let trimmed = text.trim();

    let rest = trimmed
        .get(.."LINESTRING".len())
        .filter(|prefix| prefix.eq_ignore_ascii_case("LINESTRING"))
        .map(|_| trimmed["LINESTRING".len()..].trim_start())
        .ok_or_else(|| GeometryError::Malformed {
            message: format!("missing LINESTRING keyword in {trimmed:?}"),
        })?;

    rest.strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(|| GeometryError::Malformed {
            message: format!("missing parentheses in {trimmed:?}"),
        })
}

fn parse_token(
    token: Option<&str>,
    point_index: usize,
    role: &str,
) -> Result<f64, GeometryError> {
    let token = token.ok_or_else(|| GeometryError::Malformed {
        message: format!("point {point_index} is missing its {role} token"),
    })?;

    token.parse::<f64>().map_err(|_| GeometryError::Malformed {
        message: format!("point {point_index} has unparsable {role} token {token:?}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_point_line_and_swaps_coordinate_order() {
        let line = parse_linestring("LINESTRING (127.000 35.000, 127.001 35.001)").unwrap();
        assert_eq!(line.points().len(), 2);

        let first = line.first_point();
        assert!((first.latitude() - 35.0).abs() < 1e-9);
        assert!((first.longitude() - 127.0).abs() < 1e-9);

        // Index midpoint of a 2-point line is the first point.
        assert_eq!(line.midpoint(), line.first_point());
    }

    #[test]
    fn parses_single_point_line() {
        let line = parse_linestring("LINESTRING (129.03 35.31)").unwrap();
        assert_eq!(line.points().len(), 1);
        assert!((line.midpoint().latitude() - 35.31).abs() < 1e-9);
    }

    #[test]
    fn tolerates_case_and_whitespace() {
        let line = parse_linestring("  linestring ( 127.0 35.0 ,  127.1 35.1 )  ").unwrap();
        assert_eq!(line.points().len(), 2);
    }

    #[test]
    fn ignores_tokens_past_the_first_two() {
        let line = parse_linestring("LINESTRING (127.0 35.0 12.5, 127.1 35.1 13.0)").unwrap();
        assert_eq!(line.points().len(), 2);
        assert!((line.last_point().longitude() - 127.1).abs() < 1e-9);
    }

    #[test]
    fn rejects_point_with_one_token() {
        assert!(matches!(
            parse_linestring("LINESTRING (bad)"),
            Err(GeometryError::Malformed { .. })
        ));
        assert!(matches!(
            parse_linestring("LINESTRING (127.0)"),
            Err(GeometryError::Malformed { .. })
        ));
    }

    #[test]
    fn rejects_unparsable_token() {
        assert!(matches!(
            parse_linestring("LINESTRING (127.0 north)"),
            Err(GeometryError::Malformed { .. })
        ));
    }

    #[test]
    fn rejects_missing_wrapper() {
        assert!(parse_linestring("127.0 35.0, 127.1 35.1").is_err());
        assert!(parse_linestring("POINT (127.0 35.0)").is_err());
        assert!(parse_linestring("LINESTRING 127.0 35.0").is_err());
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(matches!(
            parse_linestring("LINESTRING (127.0 95.0)"),
            Err(GeometryError::OutOfRange { .. })
        ));
    }
}
