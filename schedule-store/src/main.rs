use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use schedule_store::shell;
use schedule_store::store::{ScheduleStore, StoreError};

/// Interactive manager for a scheduled-vehicle timetable.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path of the schedule file.
    #[arg(long, default_value = "schedule.json")]
    store: PathBuf,

    /// Discard an unreadable schedule file and start empty instead of
    /// aborting. The file is only rewritten on the first mutation.
    #[arg(long)]
    start_empty: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut store = match ScheduleStore::open(&args.store) {
        Ok(store) => store,
        Err(err @ StoreError::CorruptStorage { .. }) if args.start_empty => {
            tracing::warn!("{err}; starting with an empty schedule");
            ScheduleStore::empty(&args.store)
        }
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("pass --start-empty to discard the file and continue");
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    if let Err(err) = shell::run(&mut store, &mut input, &mut out) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
