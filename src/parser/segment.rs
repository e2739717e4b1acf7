use std::sync::LazyLock;

use regex::Regex;

use crate::parser::states;

static BLANK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());
// Structural markers for documents that don't use blank-line separation:
// numbered lead-ins, ALL-CAPS STATE headers, "State of X" headings.
static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+\.\s*[A-Z]|[A-Z]{2,}\s*STATE|State of [A-Z]").unwrap()
});
static CAMPGROUND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Campground:\s*\.?\s*([^.]+)\.\s*(.+)$").unwrap());
static CAMPGROUND_SIMPLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Campground:\s*\.?\s*(.+)$").unwrap());
static TRAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Trail:\s*\.?\s*(.+)$").unwrap());
static LOCATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^,]+),\s*([A-Z]{2})\b\s*(?:\([AB]\))?").unwrap());

/// Below this many chunks the blank-line heuristic is assumed to have
/// failed and the structural-marker fallback kicks in.
const MIN_CHUNKS: usize = 10;
/// Chunks at or under this trimmed length are page furniture, not entries.
const MIN_CHUNK_LEN: usize = 20;

/// Split a raw document into candidate entry chunks. Primary strategy is
/// a blank-line-run split; when that yields too few chunks the document
/// evidently doesn't follow the convention, so split on structural
/// markers instead. Pure function of the input text.
pub fn split_into_chunks(text: &str) -> Vec<String> {
    let mut chunks: Vec<&str> = BLANK_RUN_RE.split(text).collect();

    if chunks.len() < MIN_CHUNKS {
        chunks = split_before_markers(text);
    }

    chunks
        .into_iter()
        .map(str::trim)
        .filter(|c| c.len() > MIN_CHUNK_LEN)
        .map(str::to_string)
        .collect()
}

/// Split the text immediately before each structural marker, keeping the
/// marker with the chunk it opens.
fn split_before_markers(text: &str) -> Vec<&str> {
    let starts: Vec<usize> = MARKER_RE.find_iter(text).map(|m| m.start()).collect();
    if starts.is_empty() {
        return vec![text];
    }

    let mut chunks = Vec::with_capacity(starts.len() + 1);
    if starts[0] > 0 {
        chunks.push(&text[..starts[0]]);
    }
    for pair in starts.windows(2) {
        chunks.push(&text[pair[0]..pair[1]]);
    }
    chunks.push(&text[starts[starts.len() - 1]..]);
    chunks
}

/// One entry recovered by the line scanner: the campground lead-in line
/// plus every line accumulated up to the closing boundary.
#[derive(Debug, Clone)]
pub struct ScannedEntry {
    pub kind: String,
    pub name: String,
    /// Full state name carried from the most recent state header, if any.
    pub state: Option<String>,
    pub lines: Vec<String>,
}

/// Parse a `Campground: <type>. <name>` lead-in line; a missing type
/// falls back to the generic "Campground".
pub fn parse_campground_line(line: &str) -> Option<(String, String)> {
    if let Some(caps) = CAMPGROUND_RE.captures(line) {
        return Some((caps[1].trim().to_string(), caps[2].trim().to_string()));
    }
    CAMPGROUND_SIMPLE_RE
        .captures(line)
        .map(|caps| ("Campground".to_string(), caps[1].trim().to_string()))
}

/// Parse a `City, ST` location line, normalizing the state abbreviation
/// to its full name. Unmapped codes pass through unchanged.
pub fn parse_location_line(line: &str) -> Option<(String, String)> {
    LOCATION_RE.captures(line).map(|caps| {
        let city = caps[1].trim().to_string();
        let state = states::full_name(&caps[2])
            .map(str::to_string)
            .unwrap_or_else(|| caps[2].to_string());
        (city, state)
    })
}

/// Payload of a `Trail: <desc>` line.
pub fn parse_trail_line(line: &str) -> Option<String> {
    TRAIL_RE
        .captures(line)
        .map(|caps| caps[1].trim().to_string())
}

/// Line-scanning segmenter for documents following the "Campground:" /
/// "Trail:" line-prefix convention. A small state machine with explicit
/// local state: the current US state (set by state-header lines) and the
/// entry being accumulated. State headers and new campground lead-ins
/// close the pending entry; a location line is appended and then closes
/// it; end of document closes whatever is pending.
pub fn scan_entries(text: &str) -> Vec<ScannedEntry> {
    let mut entries = Vec::new();
    let mut current_state: Option<String> = None;
    let mut open: Option<ScannedEntry> = None;

    for raw in text.lines() {
        let line = raw.trim();

        if let Some(state) = states::normalize_header(line) {
            if let Some(entry) = open.take() {
                entries.push(entry);
            }
            current_state = Some(state.to_string());
            continue;
        }

        // Page furniture
        if line.len() < 3 || line.contains("RVingwithBikes") || line.contains("Page ") {
            continue;
        }

        if let Some((kind, name)) = parse_campground_line(line) {
            if let Some(entry) = open.take() {
                entries.push(entry);
            }
            open = Some(ScannedEntry {
                kind,
                name,
                state: current_state.clone(),
                lines: vec![line.to_string()],
            });
            continue;
        }

        if let Some(mut entry) = open.take() {
            entry.lines.push(line.to_string());
            // A location line is the last line of an entry
            if parse_location_line(line).is_some() {
                entries.push(entry);
            } else {
                open = Some(entry);
            }
        }
    }

    if let Some(entry) = open.take() {
        entries.push(entry);
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_split() {
        let text = (0..12)
            .map(|i| format!("Campground number {i}\nSome description text here"))
            .collect::<Vec<_>>()
            .join("\n\n");
        let chunks = split_into_chunks(&text);
        assert_eq!(chunks.len(), 12);
        assert!(chunks[0].starts_with("Campground number 0"));
    }

    #[test]
    fn short_chunks_discarded_as_noise() {
        let mut parts: Vec<String> = (0..11)
            .map(|i| format!("Campground number {i}\nSome description text here"))
            .collect();
        parts.push("42".to_string());
        let chunks = split_into_chunks(&parts.join("\n\n"));
        assert_eq!(chunks.len(), 11);
    }

    #[test]
    fn fallback_on_structural_markers() {
        // No blank lines at all: the primary split yields one chunk,
        // well under the floor, so the marker fallback applies.
        let text = "1. Alpine Meadow Camp with creekside sites\n\
                    2. Birch Hollow Campground near the ridge\n\
                    3. Cedar Flats RV Park off the highway";
        let chunks = split_into_chunks(text);
        assert_eq!(chunks.len(), 3);
        assert!(chunks[1].starts_with("2."));
    }

    #[test]
    fn segmentation_is_restartable() {
        let text = "1. Alpine Meadow Camp with creekside sites\n\
                    2. Birch Hollow Campground near the ridge";
        assert_eq!(split_into_chunks(text), split_into_chunks(text));
    }

    #[test]
    fn campground_line_forms() {
        assert_eq!(
            parse_campground_line("Campground: RV Park. Lakeview"),
            Some(("RV Park".to_string(), "Lakeview".to_string()))
        );
        assert_eq!(
            parse_campground_line("Campground: Pinewood Hollow"),
            Some(("Campground".to_string(), "Pinewood Hollow".to_string()))
        );
        assert_eq!(parse_campground_line("Trail: paved loop"), None);
    }

    #[test]
    fn location_line_normalizes_state() {
        assert_eq!(
            parse_location_line("Lakeview, CO (B)"),
            Some(("Lakeview".to_string(), "Colorado".to_string()))
        );
        // Unmapped code falls through unchanged
        assert_eq!(
            parse_location_line("Somewhere, ZZ"),
            Some(("Somewhere".to_string(), "ZZ".to_string()))
        );
        assert_eq!(parse_location_line("no location here"), None);
    }

    #[test]
    fn scanner_tracks_state_and_closes_on_location() {
        let text = "Colorado\n\
                    Campground: RV Park. Lakeview\n\
                    Trail: 2 miles gravel trail to lake\n\
                    Lakeview, CO\n\
                    Campground: State Park. Ridgecrest\n\
                    Trail: paved path adjacent\n\
                    Wyoming\n\
                    Campground: Forest Camp. Pine Bluffs";
        let entries = scan_entries(text);
        assert_eq!(entries.len(), 3);

        assert_eq!(entries[0].name, "Lakeview");
        assert_eq!(entries[0].kind, "RV Park");
        assert_eq!(entries[0].state.as_deref(), Some("Colorado"));
        // The location line belongs to the entry it closes
        assert!(entries[0].lines.iter().any(|l| l == "Lakeview, CO"));

        assert_eq!(entries[1].name, "Ridgecrest");
        assert_eq!(entries[1].state.as_deref(), Some("Colorado"));

        assert_eq!(entries[2].name, "Pine Bluffs");
        assert_eq!(entries[2].state.as_deref(), Some("Wyoming"));
    }

    #[test]
    fn scanner_skips_page_furniture() {
        let text = "Colorado\n\
                    RVingwithBikes eBook\n\
                    Page 12\n\
                    Campground: RV Park. Lakeview\n\
                    Trail: gravel loop";
        let entries = scan_entries(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].lines.len(), 2);
    }

    #[test]
    fn entry_without_state_header_is_still_emitted() {
        let entries = scan_entries("Campground: RV Park. Lakeview\nTrail: gravel loop");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].state, None);
    }
}
