//! Offline diff of two record arrays

use std::path::{Path, PathBuf};

use clap::Args;
use warwatch_core::record::Record;
use warwatch_core::{diff_records, IdentityMode, RecordDiff};

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// JSON array of records from the earlier poll
    pub old: PathBuf,

    /// JSON array of records from the later poll
    pub new: PathBuf,

    /// Pair records by this field instead of by position
    #[arg(long)]
    pub key: Option<String>,
}

pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let old = read_records(&args.old)?;
    let new = read_records(&args.new)?;
    let mode = match args.key {
        Some(key) => IdentityMode::keyed(key),
        None => IdentityMode::Positional,
    };

    let diff = diff_records(&old, &new, &mode);
    println!("{}", serde_json::to_string_pretty(&diff)?);
    eprintln!("{}", summary_line(&diff));
    Ok(())
}

fn read_records(path: &Path) -> Result<Vec<Record>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    let records = serde_json::from_str(&content)
        .map_err(|e| format!("{} is not a JSON array of objects: {}", path.display(), e))?;
    Ok(records)
}

fn summary_line(diff: &RecordDiff) -> String {
    format!(
        "{} added, {} removed, {} changed",
        diff.additions.len(),
        diff.removals.len(),
        diff.changes.len()
    )
}
