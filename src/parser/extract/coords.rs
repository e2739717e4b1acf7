use std::sync::LazyLock;

use regex::Regex;

static DEGREE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+\.?\d*)\s*°?\s*([NS])\s*,?\s*(\d+\.?\d*)\s*°?\s*([EW])").unwrap()
});
static DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(-?\d+(?:\.\d+)?)\s*,\s*(-?\d+(?:\.\d+)?)").unwrap());

/// Continental + territorial US bounding envelope, inclusive on all edges.
fn in_us_envelope(lat: f64, lng: f64) -> bool {
    (24.0..=71.0).contains(&lat) && (-180.0..=-66.0).contains(&lng)
}

/// Pull a coordinate pair out of free text. Degree-form with hemisphere
/// letters is tried first, then a bare decimal pair; the first pattern
/// that yields an in-envelope pair wins. No merging of partial matches.
pub fn extract(text: &str) -> Option<(f64, f64)> {
    if let Some(caps) = DEGREE_RE.captures(text) {
        let mut lat: f64 = caps[1].parse().ok()?;
        let mut lng: f64 = caps[3].parse().ok()?;
        if caps[2].eq_ignore_ascii_case("S") {
            lat = -lat;
        }
        if caps[4].eq_ignore_ascii_case("W") {
            lng = -lng;
        }
        if in_us_envelope(lat, lng) {
            return Some((lat, lng));
        }
        return None;
    }

    if let Some(caps) = DECIMAL_RE.captures(text) {
        let lat: f64 = caps[1].parse().ok()?;
        let lng: f64 = caps[2].parse().ok()?;
        if in_us_envelope(lat, lng) {
            return Some((lat, lng));
        }
    }

    None
}
