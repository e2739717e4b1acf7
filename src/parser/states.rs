/// US state tables: abbreviation mapping for location-line normalization,
/// header detection for the line scanner, and approximate per-state
/// coordinates for entries that carry no coordinates of their own.

const STATES: &[(&str, &str)] = &[
    ("AL", "Alabama"),
    ("AK", "Alaska"),
    ("AZ", "Arizona"),
    ("AR", "Arkansas"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DE", "Delaware"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("IA", "Iowa"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("ME", "Maine"),
    ("MD", "Maryland"),
    ("MA", "Massachusetts"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MS", "Mississippi"),
    ("MO", "Missouri"),
    ("MT", "Montana"),
    ("NE", "Nebraska"),
    ("NV", "Nevada"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NY", "New York"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VT", "Vermont"),
    ("VA", "Virginia"),
    ("WA", "Washington"),
    ("WV", "West Virginia"),
    ("WI", "Wisconsin"),
    ("WY", "Wyoming"),
];

// Capital-city approximations, keyed by full state name.
const CENTROIDS: &[(&str, f64, f64)] = &[
    ("Alabama", 32.361538, -86.279118),
    ("Alaska", 58.301935, -134.419740),
    ("Arizona", 33.448457, -112.073844),
    ("Arkansas", 34.736009, -92.331122),
    ("California", 38.576668, -121.493629),
    ("Colorado", 39.739236, -104.990251),
    ("Connecticut", 41.767, -72.677),
    ("Delaware", 39.161921, -75.526755),
    ("Florida", 30.4518, -84.27277),
    ("Georgia", 33.76, -84.39),
    ("Hawaii", 21.30895, -157.826182),
    ("Idaho", 43.613739, -116.237651),
    ("Illinois", 39.78325, -89.650373),
    ("Indiana", 39.790942, -86.147685),
    ("Iowa", 41.590939, -93.620866),
    ("Kansas", 39.04, -95.69),
    ("Kentucky", 38.197274, -84.86311),
    ("Louisiana", 30.45809, -91.140229),
    ("Maine", 44.323535, -69.765261),
    ("Maryland", 38.972945, -76.501157),
    ("Massachusetts", 42.2352, -71.0275),
    ("Michigan", 42.354558, -84.955255),
    ("Minnesota", 44.95, -93.094),
    ("Mississippi", 32.320, -90.207),
    ("Missouri", 38.572954, -92.189283),
    ("Montana", 46.595805, -112.027031),
    ("Nebraska", 40.809868, -96.675345),
    ("Nevada", 39.161921, -119.767403),
    ("New Hampshire", 43.220093, -71.549896),
    ("New Jersey", 40.221741, -74.756138),
    ("New Mexico", 35.667231, -105.964575),
    ("New York", 42.659829, -73.781339),
    ("North Carolina", 35.771, -78.638),
    ("North Dakota", 46.813343, -100.779004),
    ("Ohio", 39.961176, -82.998794),
    ("Oklahoma", 35.482309, -97.534994),
    ("Oregon", 44.931109, -123.029159),
    ("Pennsylvania", 40.269789, -76.875613),
    ("Rhode Island", 41.82355, -71.422132),
    ("South Carolina", 34.000, -81.035),
    ("South Dakota", 44.367966, -100.336378),
    ("Tennessee", 36.165, -86.784),
    ("Texas", 30.266667, -97.75),
    ("Utah", 40.777477, -111.888237),
    ("Vermont", 44.26639, -72.580536),
    ("Virginia", 37.54, -77.46),
    ("Washington", 47.042418, -122.893077),
    ("West Virginia", 38.349497, -81.633294),
    ("Wisconsin", 43.074722, -89.384444),
    ("Wyoming", 41.145548, -104.802042),
];

/// Geographic center of the contiguous US, used when a state has no
/// centroid entry.
pub const US_CENTER: (f64, f64) = (39.8283, -98.5795);

/// Map a two-letter abbreviation to the full state name.
pub fn full_name(abbr: &str) -> Option<&'static str> {
    STATES
        .iter()
        .find(|(a, _)| *a == abbr)
        .map(|(_, name)| *name)
}

/// Normalize a line that is exactly a state header: a full state name
/// (case-insensitive) or an uppercase two-letter abbreviation.
pub fn normalize_header(line: &str) -> Option<&'static str> {
    let trimmed = line.trim();
    if let Some((_, name)) = STATES
        .iter()
        .find(|(_, name)| name.eq_ignore_ascii_case(trimmed))
    {
        return Some(name);
    }
    STATES
        .iter()
        .find(|(abbr, _)| *abbr == trimmed)
        .map(|(_, name)| *name)
}

/// Approximate coordinates for a full state name.
pub fn centroid(state: &str) -> (f64, f64) {
    CENTROIDS
        .iter()
        .find(|(name, _, _)| *name == state)
        .map(|(_, lat, lng)| (*lat, *lng))
        .unwrap_or(US_CENTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbreviation_mapping() {
        assert_eq!(full_name("CO"), Some("Colorado"));
        assert_eq!(full_name("WV"), Some("West Virginia"));
        // Unmapped codes fall through to the caller unchanged
        assert_eq!(full_name("ZZ"), None);
    }

    #[test]
    fn header_normalization() {
        assert_eq!(normalize_header("Colorado"), Some("Colorado"));
        assert_eq!(normalize_header("COLORADO"), Some("Colorado"));
        assert_eq!(normalize_header("CO"), Some("Colorado"));
        // Lowercase abbreviations are ordinary words, not headers
        assert_eq!(normalize_header("or"), None);
        assert_eq!(normalize_header("Campground: RV Park. Lakeview"), None);
        assert_eq!(normalize_header("or so they say"), None);
    }

    #[test]
    fn every_state_has_a_centroid() {
        for (_, name) in STATES {
            assert_ne!(centroid(name), US_CENTER, "missing centroid for {name}");
        }
        assert_eq!(centroid("Puerto Rico"), US_CENTER);
    }
}
