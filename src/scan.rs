//! One full pass over a tree: discover, analyze each file, score, sort.
//!
//! A scan is all-or-nothing. Only failing to enumerate the root aborts it;
//! every per-file problem has already been absorbed by the analyzers.

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError};

use crate::churn;
use crate::complexity;
use crate::error::ScanError;
use crate::git::{GitHistory, HistoryProvider};
use crate::score::{self, FileScore, SortKey, sort_scores};
use crate::walk;

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub root: PathBuf,
    pub ignore_dirs: Vec<String>,
    pub sort_by: SortKey,
}

/// Everything the presentation side gets from a finished scan.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub scores: Vec<FileScore>,
    pub sort_by: SortKey,
    pub duration: Duration,
}

impl ScanReport {
    /// Reorder the scores by a new key.
    pub fn resort(&mut self, key: SortKey) {
        sort_scores(&mut self.scores, key);
        self.sort_by = key;
    }
}

/// Terminal result of a scan.
#[derive(Debug)]
pub enum ScanOutcome {
    Completed(ScanReport),
    Failed(ScanError),
}

impl From<Result<ScanReport, ScanError>> for ScanOutcome {
    fn from(result: Result<ScanReport, ScanError>) -> Self {
        match result {
            Ok(report) => Self::Completed(report),
            Err(err) => Self::Failed(err),
        }
    }
}

/// Scan using the git repository around `options.root`, if any.
pub fn run_scan(options: &ScanOptions) -> Result<ScanReport, ScanError> {
    let history = GitHistory::discover(&options.root);
    run_scan_with(options, &history)
}

/// Scan with an explicit history provider. Files are processed one at a
/// time: both analyses of a file finish before the next file starts.
pub fn run_scan_with(
    options: &ScanOptions,
    history: &dyn HistoryProvider,
) -> Result<ScanReport, ScanError> {
    let started = Instant::now();
    let files = walk::discover(&options.root, &options.ignore_dirs)?;

    let mut complexities = Vec::with_capacity(files.len());
    let mut churns = Vec::with_capacity(files.len());
    for file in &files {
        complexities.push(complexity::analyze(file));
        churns.push(churn::analyze(file, history));
    }

    let mut scores = score::score(&files, &complexities, &churns);
    sort_scores(&mut scores, options.sort_by);

    let duration = started.elapsed();
    tracing::info!(
        files = scores.len(),
        elapsed_ms = duration.as_millis() as u64,
        "scan finished"
    );

    Ok(ScanReport {
        scores,
        sort_by: options.sort_by,
        duration,
    })
}

/// A scan running on its own thread.
pub struct ScanHandle {
    pub generation: u64,
    receiver: Receiver<ScanOutcome>,
}

impl ScanHandle {
    /// Wait up to `timeout` for the outcome. `None` means still running.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<ScanOutcome> {
        match self.receiver.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(ScanOutcome::Failed(ScanError::Aborted)),
        }
    }
}

/// Start a scan in the background. The returned handle yields exactly one
/// outcome. There is no cancellation: dropping the handle lets the thread
/// finish and discard its result.
pub fn spawn_scan(options: ScanOptions, generation: u64) -> ScanHandle {
    let (sender, receiver) = crossbeam_channel::bounded(1);
    thread::spawn(move || {
        let outcome = ScanOutcome::from(run_scan(&options));
        if sender.send(outcome).is_err() {
            tracing::debug!(generation, "scan result dropped, receiver gone");
        }
    });
    ScanHandle {
        generation,
        receiver,
    }
}

#[cfg(test)]
#[path = "scan_test.rs"]
mod tests;
