use std::sync::LazyLock;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use tracing::debug;

use crate::model::{Campground, Contact, Location, Pricing};
use crate::parser::extract::{amenities, capacity, contact, coords, pricing, trail};
use crate::parser::segment::{self, ScannedEntry};
use crate::parser::states;

static CITY_STATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z\s]+),\s*([A-Z]{2})\b").unwrap());

// First lines matching any of these are headers or page furniture, not
// campground names.
const NAME_DENYLIST: &[&str] = &[
    "table of contents",
    "index",
    "chapter",
    "introduction",
    "preface",
    "rvingwithbikes",
    "page",
    "copyright",
    "isbn",
    "published",
    "state",
    "region",
    "area",
    "section",
];

const MIN_FLAT_CHUNK_LEN: usize = 50;
const MIN_NAME_LEN: usize = 3;
const MAX_NAME_LEN: usize = 100;
/// Jitter half-width applied to centroid coordinates, degrees per axis.
const JITTER_DEGREES: f64 = 0.05;

/// Two independent heuristic generations for the same problem, selected
/// explicitly by the caller. `Flat` expects literal per-entry coordinates
/// in loosely chunked text; `StateScan` expects the "Campground:"/"Trail:"
/// line-prefix convention and synthesizes coordinates from state centroids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStrategy {
    Flat,
    StateScan,
}

/// Run the selected builder over a whole raw document. Records come out
/// in document order; the jitter seed makes `StateScan` output
/// reproducible for a given input.
pub fn build_records(text: &str, strategy: BuildStrategy, jitter_seed: u64) -> Vec<Campground> {
    match strategy {
        BuildStrategy::Flat => segment::split_into_chunks(text)
            .iter()
            .enumerate()
            .filter_map(|(i, chunk)| build_flat(chunk, i))
            .collect(),
        BuildStrategy::StateScan => {
            let mut rng = StdRng::seed_from_u64(jitter_seed);
            segment::scan_entries(text)
                .into_iter()
                .enumerate()
                .filter_map(|(i, entry)| build_from_entry(entry, i, &mut rng))
                .collect()
        }
    }
}

/// Heading-naive builder: first non-blank line is the name, and a literal
/// coordinate must appear somewhere in the chunk or the chunk is dropped.
/// The whole chunk text feeds every field extractor.
fn build_flat(chunk: &str, index: usize) -> Option<Campground> {
    if chunk.len() < MIN_FLAT_CHUNK_LEN {
        return None;
    }
    let lines: Vec<&str> = chunk
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.len() < 2 {
        return None;
    }

    let name = lines[0];
    if is_non_campground_heading(name) {
        return None;
    }

    let full_text = lines.join(" ");
    let Some((latitude, longitude)) = coords::extract(&full_text) else {
        debug!("dropping chunk without coordinates: {}", name);
        return None;
    };

    // Matched per line, not over the joined text: the greedy word-run
    // would otherwise swallow everything up to the comma into the city.
    let (city, state) = lines
        .iter()
        .find_map(|line| {
            CITY_STATE_RE.captures(line).map(|caps| {
                let city = caps[1].trim().to_string();
                let state = states::full_name(&caps[2])
                    .map(str::to_string)
                    .unwrap_or_else(|| caps[2].to_string());
                (city, state)
            })
        })
        .unwrap_or(("Unknown".to_string(), "Unknown".to_string()));

    let description = lines[1..lines.len().min(3)].join(" ");

    Some(Campground {
        id: record_id(name, index),
        name: name.to_string(),
        description,
        location: Location {
            latitude,
            longitude,
            address: format!("{}, {}", city, state),
            city,
            state,
            zip_code: None,
        },
        contact: contact::extract(&full_text),
        amenities: amenities::extract(&full_text),
        trail_access: trail::extract(&full_text),
        pricing: pricing::extract(&full_text),
        capacity: capacity::extract(&full_text),
        images: Vec::new(),
        last_updated: Utc::now().to_rfc3339(),
    })
}

/// State-scan builder: consumes the line scanner's entries. Entries with
/// no carried state are dropped; coordinates are the state centroid plus
/// a small jitter so many entries in one state don't collapse onto a
/// single point. Only the `Trail:` line payloads feed the trail extractor.
fn build_from_entry(entry: ScannedEntry, index: usize, rng: &mut StdRng) -> Option<Campground> {
    let carried_state = entry.state?;

    let (city, state) = entry
        .lines
        .iter()
        .find_map(|l| segment::parse_location_line(l))
        .unwrap_or(("Unknown".to_string(), carried_state));

    let full_text = entry.lines.join(" ");
    let trail_text = entry
        .lines
        .iter()
        .filter_map(|l| segment::parse_trail_line(l))
        .collect::<Vec<_>>()
        .join(" ");

    let description = if trail_text.is_empty() {
        format!("{} in {}, {}", entry.kind, city, state)
    } else {
        trail_text.clone()
    };

    let (lat, lng) = states::centroid(&state);
    let latitude = lat + rng.random_range(-JITTER_DEGREES..=JITTER_DEGREES);
    let longitude = lng + rng.random_range(-JITTER_DEGREES..=JITTER_DEGREES);

    Some(Campground {
        id: record_id(&entry.name, index),
        name: entry.name,
        description,
        location: Location {
            latitude,
            longitude,
            address: format!("{}, {}", city, state),
            city,
            state,
            zip_code: None,
        },
        contact: Contact::default(),
        amenities: amenities::extract(&full_text),
        trail_access: trail::extract(&trail_text),
        pricing: Pricing::default(),
        capacity: capacity::extract(&full_text),
        images: Vec::new(),
        last_updated: Utc::now().to_rfc3339(),
    })
}

fn is_non_campground_heading(name: &str) -> bool {
    let lower = name.to_lowercase();
    NAME_DENYLIST.iter().any(|kw| lower.contains(kw))
        || name.chars().all(|c| c.is_ascii_digit())
        || name.len() < MIN_NAME_LEN
        || name.len() > MAX_NAME_LEN
}

/// Deterministic per-run id: slugified name plus document position, so
/// re-extracting the same document reproduces the same ids and a reimport
/// upserts instead of appending. Provenance prefixes are the importer's job.
fn record_id(name: &str, index: usize) -> String {
    let slug = name
        .to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    format!("{}-{:03}", slug, index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TrailDifficulty, TrailType};

    #[test]
    fn flat_builder_output_is_total() {
        let chunk = "Riverbend Campground\n\
                     Quiet sites along the river with hot showers\n\
                     Boulder, CO\n\
                     40.0150, -105.2705\n\
                     Call 555-123-4567, $35.00 per night, 40 sites";
        let record = build_flat(chunk, 0).expect("valid chunk must build");

        assert_eq!(record.name, "Riverbend Campground");
        assert_eq!(record.location.city, "Boulder");
        assert_eq!(record.location.state, "Colorado");
        assert_eq!(record.location.latitude, 40.0150);
        assert_eq!(record.contact.phone.as_deref(), Some("(555) 123-4567"));
        assert_eq!(record.pricing.base_price, Some(35.0));
        assert_eq!(record.capacity.total_sites, Some(40));
        // Every sub-object resolved, nothing left absent
        assert!(record.amenities.showers);
        assert_eq!(record.trail_access.difficulty, TrailDifficulty::Beginner);
        assert_eq!(record.pricing.currency, "USD");
        assert!(record.images.is_empty());
        assert!(!record.last_updated.is_empty());
    }

    #[test]
    fn flat_builder_drops_chunks_without_coordinates() {
        let chunk = "Riverbend Campground\n\
                     Quiet sites along the river, no GPS listed anywhere";
        assert!(build_flat(chunk, 0).is_none());
    }

    #[test]
    fn flat_builder_rejects_header_chunks() {
        let chunk = "Table of Contents\n\
                     Alabama ....... 3\n\
                     40.0150, -105.2705 filler text to pass the length gate";
        assert!(build_flat(chunk, 0).is_none());

        let numeric = "1234\nsome filler text\n40.0150, -105.2705 more filler text";
        assert!(build_flat(numeric, 0).is_none());
    }

    #[test]
    fn state_scan_lakeview_scenario() {
        let text = "Colorado\n\
                    Campground: RV Park. Lakeview\n\
                    Trail: 2 miles gravel trail to lake\n\
                    Lakeview, CO";
        let records = build_records(text, BuildStrategy::StateScan, 7);
        assert_eq!(records.len(), 1);

        let r = &records[0];
        assert_eq!(r.name, "Lakeview");
        assert_eq!(r.location.state, "Colorado");
        assert_eq!(r.location.city, "Lakeview");
        assert!(r.trail_access.trail_types.contains(&TrailType::Gravel));
        let dist = r.trail_access.distance_to_trailhead.unwrap();
        assert!((dist - 3218.68).abs() < 0.01);
        assert!(!r.trail_access.has_direct_access);
        assert_eq!(r.description, "2 miles gravel trail to lake");

        // Centroid plus bounded jitter
        let (clat, clng) = states::centroid("Colorado");
        assert!((r.location.latitude - clat).abs() <= JITTER_DEGREES + 1e-9);
        assert!((r.location.longitude - clng).abs() <= JITTER_DEGREES + 1e-9);
    }

    #[test]
    fn state_scan_jitter_is_seed_deterministic() {
        let text = "Colorado\n\
                    Campground: RV Park. Lakeview\n\
                    Trail: gravel loop";
        let a = build_records(text, BuildStrategy::StateScan, 42);
        let b = build_records(text, BuildStrategy::StateScan, 42);
        assert_eq!(a[0].location.latitude, b[0].location.latitude);
        assert_eq!(a[0].location.longitude, b[0].location.longitude);

        let c = build_records(text, BuildStrategy::StateScan, 43);
        assert_ne!(a[0].location.latitude, c[0].location.latitude);
    }

    #[test]
    fn state_scan_drops_entries_without_state() {
        let text = "Campground: RV Park. Orphaned\nTrail: gravel loop";
        assert!(build_records(text, BuildStrategy::StateScan, 0).is_empty());
    }

    #[test]
    fn state_scan_description_falls_back_to_kind() {
        let text = "Wyoming\n\
                    Campground: Forest Camp. Pine Bluffs\n\
                    Pine Bluffs, WY";
        let records = build_records(text, BuildStrategy::StateScan, 0);
        assert_eq!(records[0].description, "Forest Camp in Pine Bluffs, Wyoming");
        // No trail text at all: no access, null distance
        assert!(!records[0].trail_access.has_direct_access);
        assert_eq!(records[0].trail_access.distance_to_trailhead, None);
    }

    #[test]
    fn ids_are_deterministic_and_namespaced_later() {
        assert_eq!(record_id("Lakeview RV Park", 3), "lakeview-rv-park-003");
        assert_eq!(record_id("Lakeview RV Park", 3), record_id("Lakeview RV Park", 3));
    }
}
