use std::sync::LazyLock;

use regex::Regex;

use crate::model::{TrailAccess, TrailDifficulty, TrailType};

// The from/to/away qualifier may trail several words behind the figure,
// as in "2 miles gravel trail to lake".
static DISTANCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*miles?\b(?:\s+\S+)*?\s+(?:from|to|away)\b").unwrap()
});

const METERS_PER_MILE: f64 = 1609.34;

/// A campground counts as having direct access when the trailhead is
/// within this many meters.
const DIRECT_ACCESS_METERS: f64 = 500.0;

const MOUNTAIN: &[&str] = &["mountain bike", "mountain biking", "mtb", "single track"];
const ROAD: &[&str] = &[
    "road bike",
    "road cycling",
    "paved",
    "asphalt",
    "bike path",
    "road",
];
const RAIL: &[&str] = &["rail trail", "rail-trail", "converted railroad"];
const GRAVEL: &[&str] = &["gravel", "unpaved"];
const MIXED: &[&str] = &["mixed use", "multi-use", "shared"];
const ADVANCED: &[&str] = &["advanced", "difficult", "challenging", "expert"];
const INTERMEDIATE: &[&str] = &["intermediate", "moderate"];

/// Classify trail access from a trail description. All matching types are
/// kept (deduplicated by construction, priority order fixed); empty input
/// yields the no-access default rather than an error.
pub fn extract(text: &str) -> TrailAccess {
    if text.trim().is_empty() {
        return TrailAccess::default();
    }

    let lower = text.to_lowercase();
    let mut trail_types = Vec::new();

    if mentions(&lower, MOUNTAIN) {
        trail_types.push(TrailType::MountainBiking);
    }
    if mentions(&lower, ROAD) {
        trail_types.push(TrailType::RoadCycling);
    }
    if mentions(&lower, RAIL) {
        trail_types.push(TrailType::RailTrail);
    }
    if mentions(&lower, GRAVEL) {
        trail_types.push(TrailType::Gravel);
    }
    if mentions(&lower, MIXED) {
        trail_types.push(TrailType::MixedUse);
    }
    // Generic trail/bike language with no specific surface: mixed use
    if trail_types.is_empty() && (lower.contains("trail") || lower.contains("bike")) {
        trail_types.push(TrailType::MixedUse);
    }

    // No trail language at all means no access information, not adjacency
    if trail_types.is_empty() {
        return TrailAccess::default();
    }

    let difficulty = if mentions(&lower, ADVANCED) {
        TrailDifficulty::Advanced
    } else if mentions(&lower, INTERMEDIATE) {
        TrailDifficulty::Intermediate
    } else {
        TrailDifficulty::Beginner
    };

    // Explicit "<N> miles from/to/away" wins; adjacency language
    // ("adjacent", "direct access", "in the park") or the absence of any
    // distance phrase both mean co-located.
    let distance = DISTANCE_RE
        .captures(&lower)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .map(|miles| miles * METERS_PER_MILE)
        .unwrap_or(0.0);

    TrailAccess {
        has_direct_access: distance <= DIRECT_ACCESS_METERS,
        trail_types,
        difficulty,
        distance_to_trailhead: Some(distance),
    }
}

fn mentions(lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| lower.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravel_with_explicit_distance() {
        let t = extract("2 miles gravel trail to lake");
        assert!(t.trail_types.contains(&TrailType::Gravel));
        let dist = t.distance_to_trailhead.unwrap();
        assert!((dist - 3218.68).abs() < 0.01);
        assert!(!t.has_direct_access);
    }

    #[test]
    fn multiple_types_all_kept_in_priority_order() {
        let t = extract("paved rail trail with gravel sections");
        assert_eq!(
            t.trail_types,
            vec![TrailType::RoadCycling, TrailType::RailTrail, TrailType::Gravel]
        );
    }

    #[test]
    fn generic_language_falls_back_to_mixed_use() {
        let t = extract("bike trail nearby");
        assert_eq!(t.trail_types, vec![TrailType::MixedUse]);
    }

    #[test]
    fn distance_qualifier_may_trail_behind_words() {
        let t = extract("4 miles of rail trail north to the junction");
        assert!((t.distance_to_trailhead.unwrap() - 4.0 * 1609.34).abs() < 0.01);
        assert!(!t.has_direct_access);

        // A mileage figure with no from/to/away qualifier is not a
        // distance to the trailhead
        let t = extract("5 miles of gravel riding");
        assert_eq!(t.distance_to_trailhead, Some(0.0));
        assert!(t.has_direct_access);
    }

    #[test]
    fn adjacency_means_direct_access() {
        let t = extract("single track in the park");
        assert_eq!(t.distance_to_trailhead, Some(0.0));
        assert!(t.has_direct_access);
    }

    #[test]
    fn difficulty_priority_advanced_first() {
        assert_eq!(
            extract("challenging trail, moderate in places").difficulty,
            TrailDifficulty::Advanced
        );
        assert_eq!(
            extract("moderate gravel loop").difficulty,
            TrailDifficulty::Intermediate
        );
        assert_eq!(extract("gravel loop").difficulty, TrailDifficulty::Beginner);
    }

    #[test]
    fn half_mile_is_direct_access() {
        let t = extract("trailhead 0.25 miles away");
        assert!((t.distance_to_trailhead.unwrap() - 402.335).abs() < 0.01);
        assert!(t.has_direct_access);
    }

    #[test]
    fn text_without_trail_language_is_default() {
        let t = extract("quiet riverside sites with hot showers");
        assert!(!t.has_direct_access);
        assert!(t.trail_types.is_empty());
        assert_eq!(t.distance_to_trailhead, None);
    }

    #[test]
    fn empty_text_is_total_default() {
        let t = extract("   ");
        assert!(!t.has_direct_access);
        assert!(t.trail_types.is_empty());
        assert_eq!(t.difficulty, TrailDifficulty::Beginner);
        assert_eq!(t.distance_to_trailhead, None);
    }
}
