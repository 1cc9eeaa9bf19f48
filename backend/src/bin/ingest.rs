//! Offline block ingestion.
//!
//! Reads a JSON array of date blocks, runs the schedule parser on each and
//! prints the reconciled schedules. With `--save` the results are also
//! written to the repository selected by `REPOSITORY_TYPE`.
//!
//! ```bash
//! cargo run --bin outage-ingest -- blocks.json
//! REPOSITORY_TYPE=postgres cargo run --bin outage-ingest --features postgres-repo -- blocks.json --save
//! ```

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use outage_schedule::db;
use outage_schedule::models::ScheduleBlock;
use outage_schedule::parsing::ScheduleParser;
use outage_schedule::services::ingest_blocks;

/// Parse outage announcement blocks offline.
#[derive(Parser, Debug)]
#[command(name = "outage-ingest", about = "Parse outage announcement blocks")]
struct Args {
    /// JSON file holding an array of `{date, schedule_text, extras_text}` blocks
    path: PathBuf,

    /// Also save the results to the repository selected by REPOSITORY_TYPE
    #[arg(long)]
    save: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays valid JSON.
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::WARN),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let raw = fs::read_to_string(&args.path)
        .with_context(|| format!("Failed to read {}", args.path.display()))?;
    let blocks: Vec<ScheduleBlock> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse blocks from {}", args.path.display()))?;

    let parser = ScheduleParser::new();
    let schedules = parser.parse_blocks(&blocks);

    for schedule in schedules.iter().filter(|s| s.is_empty()) {
        eprintln!("{}: nothing to save", schedule.date);
    }
    println!("{}", serde_json::to_string_pretty(&schedules)?);

    if args.save {
        let repo = db::init_repository().await?;
        let outcome = ingest_blocks(repo.as_ref(), &parser, &blocks).await?;
        info!(
            saved = outcome.saved_dates.len(),
            skipped = outcome.skipped_dates.len(),
            "Blocks saved"
        );
        eprintln!("saved {} date(s)", outcome.saved_dates.len());
    }

    Ok(())
}
