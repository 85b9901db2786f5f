use chrono::{Datelike, Months, NaiveDate, Utc};
use serde::Serialize;

use crate::git::{DateRange, HistoryProvider};
use crate::walk::SourceFile;

/// Number of monthly buckets in the churn histogram.
pub const MONTHS: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChurnResult {
    /// Commits touching the file over its whole history.
    pub total_commits: usize,
    /// Commits per calendar month, oldest first, current month last.
    /// Empty when the repository exists but its history could not be read.
    pub monthly: Vec<usize>,
    pub history_available: bool,
}

impl ChurnResult {
    /// No version control around the scan root.
    pub fn unavailable() -> Self {
        Self {
            total_commits: 0,
            monthly: vec![0; MONTHS],
            history_available: false,
        }
    }

    /// Repository found, but the full-history query for the file failed.
    pub fn query_failed() -> Self {
        Self {
            total_commits: 0,
            monthly: Vec::new(),
            history_available: true,
        }
    }
}

/// The trailing twelve calendar months ending with the month of `today`,
/// oldest first. Each range runs from the first of its month to the first
/// of the next.
pub fn trailing_months(today: NaiveDate) -> Vec<DateRange> {
    let Some(current) = NaiveDate::from_ymd_opt(today.year(), today.month(), 1) else {
        return Vec::new();
    };

    (0..MONTHS as u32)
        .rev()
        .filter_map(|back| {
            let start = current.checked_sub_months(Months::new(back))?;
            let end = start.checked_add_months(Months::new(1))?;
            Some(DateRange::new(start, end))
        })
        .collect()
}

/// Today's date in UTC, the same clock [`DateRange`] compares commit
/// times against.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Measure churn for `file` with the histogram ending in the current month.
pub fn analyze(file: &SourceFile, history: &dyn HistoryProvider) -> ChurnResult {
    analyze_at(file, history, today())
}

/// Measure churn for `file` with the histogram anchored at `today`.
///
/// Never fails: a missing repository or a failed query degrades to zeros.
/// The bucket sum is not reconciled with `total_commits`.
pub fn analyze_at(file: &SourceFile, history: &dyn HistoryProvider, today: NaiveDate) -> ChurnResult {
    if !history.is_repository() {
        return ChurnResult::unavailable();
    }

    let total_commits = match history.commit_count(&file.path, None) {
        Ok(n) => n,
        Err(err) => {
            tracing::warn!("history for {}: {err}", file.rel_path.display());
            return ChurnResult::query_failed();
        }
    };

    let mut monthly = vec![0; MONTHS];
    for (bucket, range) in monthly.iter_mut().zip(trailing_months(today)) {
        match history.commit_count(&file.path, Some(&range)) {
            Ok(n) => *bucket = n,
            Err(err) => tracing::debug!(
                "history for {} in {}..{}: {err}",
                file.rel_path.display(),
                range.start,
                range.end
            ),
        }
    }

    ChurnResult {
        total_commits,
        monthly,
        history_available: true,
    }
}

#[cfg(test)]
#[path = "churn_test.rs"]
mod tests;
