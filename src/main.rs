mod db;
mod import;
mod model;
mod parser;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use import::WipePolicy;
use parser::BuildStrategy;

#[derive(Parser)]
#[command(name = "bikecamp_extractor", about = "Campground data extractor and store")]
struct Cli {
    /// SQLite database path
    #[arg(long, global = true, default_value = "data/campgrounds.sqlite")]
    db: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract campground records from a raw text dump into a JSON file
    Extract {
        /// Raw text input (a PDF text dump)
        input: PathBuf,
        /// Which builder generation to run
        #[arg(short, long, value_enum, default_value = "state-scan")]
        strategy: Strategy,
        /// Seed for coordinate jitter (state-scan only)
        #[arg(long, default_value = "0")]
        seed: u64,
        /// Where to write the extracted records
        #[arg(short, long, default_value = "data/campgrounds.json")]
        output: PathBuf,
    },
    /// Import a JSON records file into the store
    Import {
        /// JSON records file (bare array or {"campgrounds": [...]})
        input: PathBuf,
        /// Provenance of this import, controls the id prefix
        #[arg(short, long, value_enum, default_value = "pdf")]
        generation: Generation,
        /// What to clear before importing
        #[arg(short, long, value_enum, default_value = "keep")]
        wipe: Wipe,
    },
    /// Extract + import in one pipeline
    Run {
        /// Raw text input (a PDF text dump)
        input: PathBuf,
        #[arg(short, long, value_enum, default_value = "state-scan")]
        strategy: Strategy,
        #[arg(long, default_value = "0")]
        seed: u64,
        #[arg(short, long, value_enum, default_value = "pdf")]
        generation: Generation,
        #[arg(short, long, value_enum, default_value = "generation")]
        wipe: Wipe,
    },
    /// Search stored campgrounds
    Search {
        /// Substring to match against name, description, or city
        #[arg(default_value = "")]
        query: String,
        /// Exact state filter (full name, e.g. "Colorado")
        #[arg(short, long)]
        state: Option<String>,
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
        /// Rows to skip
        #[arg(long, default_value = "0")]
        offset: usize,
    },
    /// Show one campground in full
    Show { id: String },
    /// Show store statistics
    Stats,
}

#[derive(Clone, Copy, ValueEnum)]
enum Strategy {
    Flat,
    StateScan,
}

impl From<Strategy> for BuildStrategy {
    fn from(s: Strategy) -> BuildStrategy {
        match s {
            Strategy::Flat => BuildStrategy::Flat,
            Strategy::StateScan => BuildStrategy::StateScan,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Generation {
    Pdf,
    Real,
    None,
}

impl Generation {
    fn prefix(self) -> &'static str {
        match self {
            Generation::Pdf => "pdf_",
            Generation::Real => "real_",
            Generation::None => "",
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Wipe {
    Keep,
    Generation,
    All,
}

impl From<Wipe> for WipePolicy {
    fn from(w: Wipe) -> WipePolicy {
        match w {
            Wipe::Keep => WipePolicy::Keep,
            Wipe::Generation => WipePolicy::Generation,
            Wipe::All => WipePolicy::All,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract { input, strategy, seed, output } => {
            let records = extract_records(&input, strategy.into(), seed)?;
            write_records(&output, &records)?;
            print_extract_summary(&records, &output);
            Ok(())
        }
        Commands::Import { input, generation, wipe } => {
            let records = import::load_records_file(&input)?;
            println!("Importing {} records from {}...", records.len(), input.display());
            let conn = open_store(&cli.db)?;
            let report =
                import::import_records(&conn, records, generation.prefix(), wipe.into())?;
            println!("Done: {} imported, {} skipped.", report.imported, report.skipped);
            Ok(())
        }
        Commands::Run { input, strategy, seed, generation, wipe } => {
            let records = extract_records(&input, strategy.into(), seed)?;
            if records.is_empty() {
                println!("No records extracted, nothing to import.");
                return Ok(());
            }
            println!("Extracted {} records, importing...", records.len());
            let conn = open_store(&cli.db)?;
            let report =
                import::import_records(&conn, records, generation.prefix(), wipe.into())?;
            println!("Done: {} imported, {} skipped.", report.imported, report.skipped);
            Ok(())
        }
        Commands::Search { query, state, limit, offset } => {
            let conn = open_store(&cli.db)?;
            let state = state.unwrap_or_default();
            let rows = db::search(&conn, &query, &state, limit, offset)?;
            let total = db::count(&conn, &query, &state)?;
            if rows.is_empty() {
                println!("No campgrounds found.");
                return Ok(());
            }

            println!(
                "{:<28} | {:<20} | {:<14} | {:>8} | {:<12} | {:>5}",
                "Name", "City", "State", "Price", "Trails", "Sites"
            );
            println!("{}", "-".repeat(102));
            for r in &rows {
                let price = r
                    .pricing
                    .base_price
                    .map(|p| format!("${:.2}", p))
                    .unwrap_or_else(|| "-".into());
                let trails = if r.trail_access.trail_types.is_empty() {
                    "-".to_string()
                } else {
                    truncate(
                        &r.trail_access
                            .trail_types
                            .iter()
                            .map(|t| t.as_tag())
                            .collect::<Vec<_>>()
                            .join(","),
                        12,
                    )
                };
                let sites = r
                    .capacity
                    .total_sites
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "-".into());
                println!(
                    "{:<28} | {:<20} | {:<14} | {:>8} | {:<12} | {:>5}",
                    truncate(&r.name, 28),
                    truncate(&r.location.city, 20),
                    truncate(&r.location.state, 14),
                    price,
                    trails,
                    sites
                );
            }
            println!("\n{} of {} campgrounds | id: show <id>", rows.len(), total);
            Ok(())
        }
        Commands::Show { id } => {
            let conn = open_store(&cli.db)?;
            match db::get_by_id(&conn, &id)? {
                Some(record) => {
                    println!("{}", serde_json::to_string_pretty(&record)?);
                    Ok(())
                }
                None => {
                    println!("No campground with id '{}'.", id);
                    Ok(())
                }
            }
        }
        Commands::Stats => {
            let conn = open_store(&cli.db)?;
            let s = db::stats(&conn)?;
            println!("Total:   {}", s.total);
            println!("PDF:     {}", s.pdf);
            println!("Real:    {}", s.real);
            println!("Curated: {}", s.curated);
            println!("States:  {}", s.states);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn open_store(path: &str) -> anyhow::Result<rusqlite::Connection> {
    let conn = db::connect(path)?;
    db::init_schema(&conn)?;
    Ok(conn)
}

fn extract_records(
    input: &std::path::Path,
    strategy: BuildStrategy,
    seed: u64,
) -> anyhow::Result<Vec<model::Campground>> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    Ok(parser::build_records(&text, strategy, seed))
}

fn write_records(output: &std::path::Path, records: &[model::Campground]) -> anyhow::Result<()> {
    if let Some(dir) = output.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    let json = serde_json::to_string_pretty(&serde_json::json!({ "campgrounds": records }))?;
    std::fs::write(output, json)
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(())
}

fn print_extract_summary(records: &[model::Campground], output: &std::path::Path) {
    println!("Extracted {} campgrounds -> {}", records.len(), output.display());
    if let Some(first) = records.first() {
        println!(
            "Sample: {} ({}, {}) [{}]",
            first.name, first.location.city, first.location.state, first.id
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
