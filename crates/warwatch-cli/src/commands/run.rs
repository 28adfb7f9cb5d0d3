//! Tracker polling command

use std::path::PathBuf;

use clap::Args;
use tracing::info;
use warwatch_core::logging_facility::{init, Profile};
use warwatch_engine::{HttpFeedSource, HttpSourceConfig, LogSink, TrackerRunner};
use warwatch_store::db::open_and_migrate;
use warwatch_store::trackers::parse_tracker_file;

#[derive(Debug, Args)]
pub struct RunArgs {
    /// YAML tracker file
    #[arg(long)]
    pub trackers: PathBuf,

    #[arg(long, default_value = ".warwatch/state.db")]
    pub db: PathBuf,

    /// Stop after this many ticks per tracker (runs forever if omitted)
    #[arg(long)]
    pub ticks: Option<u64>,

    /// HTTP request timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Emit JSON logs instead of human-readable output
    #[arg(long)]
    pub json_logs: bool,
}

pub fn execute(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    init(if args.json_logs {
        Profile::Production
    } else {
        Profile::Development
    });

    let file = parse_tracker_file(&args.trackers)?;
    if let Some(parent) = args.db.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let conn = open_and_migrate(&args.db)?;

    let mut http_config = HttpSourceConfig::default();
    if let Some(timeout_ms) = args.timeout_ms {
        http_config.timeout_ms = timeout_ms;
    }
    let source = HttpFeedSource::new(&http_config)?;
    let sink = LogSink;

    let mut runner = TrackerRunner::hydrate(&conn, file.trackers, &source, &sink)?;
    let summary = runner.run(args.ticks);

    info!(
        ticks = summary.ticks,
        published = summary.published as u64,
        fetch_failures = summary.fetch_failures as u64,
        delivery_failures = summary.delivery_failures as u64,
        persist_failures = summary.persist_failures as u64,
        "run finished"
    );
    println!(
        "✓ {} ticks, {} notifications published, {} feed fetches failed",
        summary.ticks, summary.published, summary.fetch_failures
    );
    Ok(())
}
