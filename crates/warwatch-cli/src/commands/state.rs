//! Persisted tracker state commands

use std::path::PathBuf;

use clap::{Args, Subcommand};
use warwatch_store::db::open_and_migrate;
use warwatch_store::SqliteStateRepo;

#[derive(Debug, Args)]
pub struct StateArgs {
    #[command(subcommand)]
    pub command: StateCommand,
}

#[derive(Debug, Subcommand)]
pub enum StateCommand {
    /// Print a tracker's stored config, snapshot, and tick count as JSON
    Show(StateTarget),
    /// Forget a tracker's stored state (its next tick is a first observation)
    Reset(StateTarget),
    /// List tracker ids with stored state
    List(DbArg),
}

#[derive(Debug, Args)]
pub struct StateTarget {
    pub tracker_id: String,

    #[command(flatten)]
    pub db: DbArg,
}

#[derive(Debug, Args)]
pub struct DbArg {
    #[arg(long, default_value = ".warwatch/state.db")]
    pub db: PathBuf,
}

pub fn execute(args: StateArgs) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        StateCommand::Show(target) => {
            let conn = open_and_migrate(&target.db.db)?;
            let stored = SqliteStateRepo::require(&conn, &target.tracker_id)?;
            let mut value = serde_json::to_value(&stored.state)?;
            if let Some(object) = value.as_object_mut() {
                object.insert("updated_at".to_string(), stored.updated_at.into());
            }
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        StateCommand::Reset(target) => {
            let conn = open_and_migrate(&target.db.db)?;
            if SqliteStateRepo::delete(&conn, &target.tracker_id)? {
                println!("✓ State reset for {}", target.tracker_id);
            } else {
                println!("No stored state for {}", target.tracker_id);
            }
        }
        StateCommand::List(db) => {
            let conn = open_and_migrate(&db.db)?;
            for id in SqliteStateRepo::list_ids(&conn)? {
                println!("{}", id);
            }
        }
    }
    Ok(())
}
