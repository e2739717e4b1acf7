use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rusqlite::Connection;
use serde::Deserialize;
use tracing::{info, warn};

use crate::db;
use crate::model::{
    Amenities, Campground, Capacity, Contact, Location, PriceType, Pricing, TrailAccess,
    TrailDifficulty, TrailType,
};

/// Rows written per transaction.
const BATCH_SIZE: usize = 25;

/// What to clear from the store before an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WipePolicy {
    /// Leave existing rows alone; same-id rows are replaced by the upsert.
    Keep,
    /// Clear only rows carrying this import's id prefix.
    Generation,
    /// Clear the whole table.
    All,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

/// Persist a set of records under one provenance prefix. Records missing
/// a name or state are skipped with a warning, never fatal; a store
/// failure on an individual row likewise only costs that row. The prefix
/// namespaces this import's ids so later wipes and stats can tell
/// generations apart.
pub fn import_records(
    conn: &Connection,
    records: Vec<Campground>,
    prefix: &str,
    wipe: WipePolicy,
) -> Result<ImportReport> {
    match wipe {
        WipePolicy::Keep => {}
        WipePolicy::Generation => {
            let cleared = db::clear_generation(conn, prefix)?;
            info!("cleared {} existing '{}' rows", cleared, prefix);
        }
        WipePolicy::All => {
            let cleared = db::clear_all(conn)?;
            info!("cleared {} existing rows", cleared);
        }
    }

    let mut report = ImportReport::default();
    let mut batch: Vec<Campground> = Vec::with_capacity(BATCH_SIZE);

    let bar = ProgressBar::new(records.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    for mut record in records {
        bar.inc(1);

        if record.name.trim().is_empty() || record.location.state.trim().is_empty() {
            warn!("skipping record with missing name or state: {}", record.id);
            report.skipped += 1;
            continue;
        }

        if !prefix.is_empty() && !record.id.starts_with(prefix) {
            record.id = format!("{}{}", prefix, record.id);
        }

        batch.push(record);
        if batch.len() == BATCH_SIZE {
            flush_batch(conn, &mut batch, &mut report)?;
        }
    }
    flush_batch(conn, &mut batch, &mut report)?;
    bar.finish_and_clear();

    info!(
        "import finished: {} imported, {} skipped",
        report.imported, report.skipped
    );
    Ok(report)
}

fn flush_batch(
    conn: &Connection,
    batch: &mut Vec<Campground>,
    report: &mut ImportReport,
) -> Result<()> {
    if batch.is_empty() {
        return Ok(());
    }
    let written = db::upsert_batch(conn, batch)?;
    report.imported += written;
    report.skipped += batch.len() - written;
    batch.clear();
    Ok(())
}

/// Load records from a JSON file, either a bare array or an object with a
/// `campgrounds` array. Unreadable files and malformed JSON are input
/// errors; individually sloppy records are tolerated and normalized.
pub fn load_records_file(path: &Path) -> Result<Vec<Campground>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let file: RecordsFile = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    let raw = match file {
        RecordsFile::Bare(records) => records,
        RecordsFile::Wrapped { campgrounds } => campgrounds,
    };
    Ok(raw
        .into_iter()
        .enumerate()
        .map(|(i, r)| r.normalize(i))
        .collect())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordsFile {
    Bare(Vec<RawCampground>),
    Wrapped { campgrounds: Vec<RawCampground> },
}

/// Loose mirror of the interchange format. Everything is optional or
/// defaulted so one sloppy hand-edited record doesn't reject a whole
/// file; `normalize` resolves the mess into a well-formed record.
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawCampground {
    id: Option<String>,
    name: String,
    description: String,
    location: Location,
    contact: Contact,
    amenities: Amenities,
    trail_access: RawTrailAccess,
    pricing: RawPricing,
    capacity: Capacity,
    images: Vec<String>,
    last_updated: Option<String>,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawTrailAccess {
    has_direct_access: bool,
    trail_types: Vec<String>,
    difficulty: String,
    distance_to_trailhead: Option<f64>,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawPricing {
    base_price: Option<f64>,
    price_type: String,
}

impl RawCampground {
    fn normalize(self, index: usize) -> Campground {
        let id = match self.id {
            Some(id) if !id.trim().is_empty() => id,
            _ => format!("record-{:03}", index),
        };
        Campground {
            id,
            name: self.name,
            description: self.description,
            location: self.location,
            contact: self.contact,
            amenities: self.amenities,
            trail_access: TrailAccess {
                has_direct_access: self.trail_access.has_direct_access,
                // Unknown tags are dropped, not errors
                trail_types: self
                    .trail_access
                    .trail_types
                    .iter()
                    .filter_map(|t| TrailType::from_tag(t))
                    .collect(),
                difficulty: TrailDifficulty::from_tag(&self.trail_access.difficulty)
                    .unwrap_or_default(),
                distance_to_trailhead: self.trail_access.distance_to_trailhead,
            },
            pricing: Pricing {
                base_price: self.pricing.base_price,
                currency: "USD".to_string(),
                price_type: PriceType::from_tag(&self.pricing.price_type).unwrap_or_default(),
            },
            capacity: self.capacity,
            images: self.images,
            last_updated: self
                .last_updated
                .unwrap_or_else(|| chrono::Utc::now().to_rfc3339()),
        }
    }
}
