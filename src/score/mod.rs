//! Normalization, weighting and banding of per-file signals.
//!
//! Complexity and churn are each scaled to 0–100 against the largest value
//! seen in the current scan (floored at 1), then blended into one risk
//! score. Complexity carries more weight as the stronger defect signal;
//! churn only says how often a file gets touched.

mod sort;

use serde::Serialize;

use crate::churn::ChurnResult;
use crate::complexity::ComplexityResult;
use crate::walk::SourceFile;

pub use sort::{SortKey, sort_scores};

/// Weight of normalized complexity in the risk score.
pub const W_COMPLEXITY: f64 = 0.6;
/// Weight of normalized churn in the risk score.
pub const W_CHURN: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum RiskBand {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskBand {
    /// Band for a 0–100 risk score: ≥80 Critical, ≥60 High, ≥30 Medium.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Critical
        } else if score >= 60.0 {
            Self::High
        } else if score >= 30.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Low => "🟢",
            Self::Medium => "🟡",
            Self::High => "🟠",
            Self::Critical => "🔴",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileScore {
    pub file: SourceFile,
    pub complexity: ComplexityResult,
    pub churn: ChurnResult,
    pub complexity_norm: f64,
    pub churn_norm: f64,
    pub risk_score: f64,
    pub band: RiskBand,
}

/// Scale `value` to 0–100 against `max`.
fn normalize(value: usize, max: usize) -> f64 {
    value as f64 / max as f64 * 100.0
}

/// Weighted blend of the two normalized signals.
pub fn risk_score(complexity_norm: f64, churn_norm: f64) -> f64 {
    W_COMPLEXITY * complexity_norm + W_CHURN * churn_norm
}

/// Score every file of a scan.
///
/// The three slices are index-aligned: entry `i` of each describes the same
/// file. Empty input yields an empty result.
pub fn score(
    files: &[SourceFile],
    complexities: &[ComplexityResult],
    churns: &[ChurnResult],
) -> Vec<FileScore> {
    debug_assert!(
        files.len() == complexities.len() && files.len() == churns.len(),
        "score inputs must be index-aligned"
    );

    let max_complexity = complexities.iter().map(|c| c.total).max().unwrap_or(0).max(1);
    let max_churn = churns
        .iter()
        .map(|c| c.total_commits)
        .max()
        .unwrap_or(0)
        .max(1);

    files
        .iter()
        .zip(complexities)
        .zip(churns)
        .map(|((file, complexity), churn)| {
            let complexity_norm = normalize(complexity.total, max_complexity);
            let churn_norm = normalize(churn.total_commits, max_churn);
            let risk = risk_score(complexity_norm, churn_norm);
            FileScore {
                file: file.clone(),
                complexity: complexity.clone(),
                churn: churn.clone(),
                complexity_norm,
                churn_norm,
                risk_score: risk,
                band: RiskBand::from_score(risk),
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
