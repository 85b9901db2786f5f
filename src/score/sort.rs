use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::FileScore;

/// Orderings offered for a scored file list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Risk score, highest first.
    #[default]
    Risk,
    /// Complexity total, highest first.
    Complexity,
    /// Total commits, highest first.
    Churn,
    /// Relative path, ascending.
    Name,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [Self::Risk, Self::Complexity, Self::Churn, Self::Name];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Risk => "risk",
            Self::Complexity => "complexity",
            Self::Churn => "churn",
            Self::Name => "name",
        }
    }

    fn compare(self, a: &FileScore, b: &FileScore) -> Ordering {
        match self {
            Self::Risk => b.risk_score.total_cmp(&a.risk_score),
            Self::Complexity => b.complexity.total.cmp(&a.complexity.total),
            Self::Churn => b.churn.total_commits.cmp(&a.churn.total_commits),
            Self::Name => a.file.rel_path.cmp(&b.file.rel_path),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown sort key {s:?} (use risk, complexity, churn or name)"))
    }
}

/// Reorder `scores` in place by `key`. Only the primary key is compared;
/// the relative order of ties is unspecified.
pub fn sort_scores(scores: &mut [FileScore], key: SortKey) {
    scores.sort_unstable_by(|a, b| key.compare(a, b));
}

#[cfg(test)]
#[path = "sort_test.rs"]
mod tests;
