mod app;
mod churn;
mod cli;
mod complexity;
mod config;
mod error;
mod git;
mod language;
mod progress;
mod report;
mod scan;
mod score;
mod walk;

use std::error::Error;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use app::{AppState, Command, Event, Status};
use cli::Cli;
use config::{Config, DEFAULT_TOP};
use error::ScanError;
use progress::Progress;
use scan::{ScanHandle, ScanOptions, spawn_scan};

/// How often the control loop wakes up while a scan is running.
const TICK: Duration = Duration::from_millis(100);

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let root = cli.path.unwrap_or_else(|| PathBuf::from("."));
    if !root.exists() {
        return Err(ScanError::InvalidRoot(root).into());
    }

    let config = Config::load(&root, cli.config.as_deref())?;
    let sort_by = cli.sort_by.or(config.sort_by).unwrap_or_default();
    let top = cli.top.or(config.top).unwrap_or(DEFAULT_TOP);
    let options = ScanOptions {
        root,
        ignore_dirs: config.ignore_dirs,
        sort_by,
    };

    let progress = Progress::new(!cli.no_progress && !cli.json);
    let state = drive_scan(AppState::new(sort_by), &options, &progress);
    progress.finish_and_clear();

    if let Status::Failed(message) = &state.status {
        return Err(message.clone().into());
    }
    let Some(scan) = state.report() else {
        return Err(ScanError::Aborted.into());
    };
    if cli.json {
        report::print_json(scan)?;
    } else {
        report::print_report(scan, top)?;
    }
    Ok(())
}

/// Request a scan and feed events into the state until it settles.
fn drive_scan(state: AppState, options: &ScanOptions, progress: &Progress) -> AppState {
    let (mut state, command) = state.update(Event::ScanRequested);
    let Some(handle) = start(command, options) else {
        return state;
    };

    let started = Instant::now();
    while state.is_scanning() {
        match handle.wait_timeout(TICK) {
            Some(outcome) => {
                let generation = handle.generation;
                state = state.update(Event::ScanFinished { generation, outcome }).0;
            }
            None => {
                progress.set_message(format!(
                    "Scanning {} ({}s)",
                    options.root.display(),
                    started.elapsed().as_secs()
                ));
            }
        }
    }
    state
}

fn start(command: Option<Command>, options: &ScanOptions) -> Option<ScanHandle> {
    match command? {
        Command::StartScan {
            generation,
            sort_by,
        } => Some(spawn_scan(
            ScanOptions {
                sort_by,
                ..options.clone()
            },
            generation,
        )),
    }
}
