//! Application state as a value.
//!
//! The control loop owns one [`AppState`] and replaces it with the result of
//! [`AppState::update`] for every [`Event`]. Transitions never perform I/O;
//! when a scan must start, `update` returns a [`Command`] for the loop to
//! carry out.

use crate::scan::{ScanOutcome, ScanReport};
use crate::score::SortKey;

#[derive(Debug)]
pub enum Status {
    Idle,
    Scanning { generation: u64 },
    Ready(ScanReport),
    /// Scan-fatal error; replaces any previous results.
    Failed(String),
}

#[derive(Debug)]
pub enum Event {
    /// Start a new scan, superseding any scan in flight.
    ScanRequested,
    ScanFinished {
        generation: u64,
        outcome: ScanOutcome,
    },
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    StartScan { generation: u64, sort_by: SortKey },
}

#[derive(Debug)]
pub struct AppState {
    pub status: Status,
    pub sort_by: SortKey,
    /// Number of the most recently requested scan.
    pub generation: u64,
}

impl AppState {
    pub fn new(sort_by: SortKey) -> Self {
        Self {
            status: Status::Idle,
            sort_by,
            generation: 0,
        }
    }

    pub fn is_scanning(&self) -> bool {
        matches!(self.status, Status::Scanning { .. })
    }

    pub fn report(&self) -> Option<&ScanReport> {
        match &self.status {
            Status::Ready(report) => Some(report),
            _ => None,
        }
    }

    pub fn update(self, event: Event) -> (Self, Option<Command>) {
        match event {
            Event::ScanRequested => {
                let generation = self.generation + 1;
                let command = Command::StartScan {
                    generation,
                    sort_by: self.sort_by,
                };
                let next = Self {
                    status: Status::Scanning { generation },
                    generation,
                    ..self
                };
                (next, Some(command))
            }
            Event::ScanFinished {
                generation,
                outcome,
            } => {
                let Status::Scanning { generation: awaited } = self.status else {
                    tracing::debug!(generation, "scan result arrived while not scanning");
                    return (self, None);
                };
                if generation != awaited {
                    tracing::debug!(generation, awaited, "dropping stale scan");
                    return (self, None);
                }
                let status = match outcome {
                    ScanOutcome::Completed(mut report) => {
                        if report.sort_by != self.sort_by {
                            report.resort(self.sort_by);
                        }
                        Status::Ready(report)
                    }
                    ScanOutcome::Failed(err) => Status::Failed(err.to_string()),
                };
                (Self { status, ..self }, None)
            }
        }
    }
}

#[cfg(test)]
#[path = "app_test.rs"]
mod tests;
