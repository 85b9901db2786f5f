use std::error::Error;
use std::io::{self, Write};

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::churn::ChurnResult;
use crate::complexity::AnalysisMethod;
use crate::scan::ScanReport;
use crate::score::{FileScore, RiskBand, SortKey, W_CHURN, W_COMPLEXITY};

const SPARK: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Functions listed under the table for the riskiest parsed file.
const TOP_FUNCTIONS: usize = 5;

/// One character per month, scaled to the busiest month; `·` for none.
pub fn sparkline(monthly: &[usize]) -> String {
    let max = monthly.iter().copied().max().unwrap_or(0);
    monthly
        .iter()
        .map(|&n| {
            if n == 0 {
                '·'
            } else {
                SPARK[n * (SPARK.len() - 1) / max]
            }
        })
        .collect()
}

/// Text for the history column.
pub fn history_cell(churn: &ChurnResult) -> String {
    if !churn.history_available {
        "unavailable".to_string()
    } else if churn.monthly.is_empty() {
        "query failed".to_string()
    } else {
        sparkline(&churn.monthly)
    }
}

fn band_cell(score: &FileScore) -> String {
    format!("{} {}", score.band.glyph(), score.band.label())
}

/// Files per band over the whole scan, most severe first.
pub fn band_counts(scores: &[FileScore]) -> [(RiskBand, usize); 4] {
    [
        RiskBand::Critical,
        RiskBand::High,
        RiskBand::Medium,
        RiskBand::Low,
    ]
    .map(|band| (band, scores.iter().filter(|s| s.band == band).count()))
}

/// One-line band tally, e.g. `🔴 2  🟠 0  🟡 1  🟢 5`.
pub fn band_summary(scores: &[FileScore]) -> String {
    band_counts(scores)
        .iter()
        .map(|(band, n)| format!("{} {n}", band.glyph()))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Display width of the widest path in `scores`, at least `min`.
fn path_width(scores: &[FileScore], min: usize) -> usize {
    scores
        .iter()
        .map(|s| s.file.rel_path.display().to_string().width())
        .fold(min, usize::max)
}

fn rule(width: usize) -> String {
    "\u{2500}".repeat(width)
}

/// Pad `s` with spaces to `width` display columns; glyphs count as two.
fn pad_right(s: &str, width: usize) -> String {
    let w = s.width();
    if w >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - w))
    }
}

pub fn print_report(report: &ScanReport, top: usize) -> io::Result<()> {
    write_report(&mut io::stdout().lock(), report, top)
}

/// Render the table report for the first `top` files into `out`.
pub fn write_report(out: &mut impl Write, report: &ScanReport, top: usize) -> io::Result<()> {
    if report.scores.is_empty() {
        return writeln!(out, "No source files found.");
    }
    let shown = &report.scores[..report.scores.len().min(top)];

    // 5 + 2 + 11 + 1 + 6 + 1 + 6 + 1 + 8 + 2 + 12 + 2 = path + 57
    let separator = rule((path_width(shown, 4) + 57).max(78));

    writeln!(
        out,
        "Risk map: {} files, sorted by {}, scanned in {:.2?}",
        report.scores.len(),
        report.sort_by,
        report.duration
    )?;
    writeln!(out, "{separator}")?;
    writeln!(
        out,
        " {:>4}  {} {:>6} {:>6} {:>8}  {}  File",
        "#",
        pad_right("Band", 11),
        "Risk",
        "Cx",
        "Commits",
        pad_right("Last 12 mo", 12),
    )?;
    writeln!(out, "{separator}")?;

    for (i, s) in shown.iter().enumerate() {
        writeln!(
            out,
            " {:>4}  {} {:>6.1} {:>6} {:>8}  {}  {}",
            i + 1,
            pad_right(&band_cell(s), 11),
            s.risk_score,
            s.complexity.total,
            s.churn.total_commits,
            pad_right(&history_cell(&s.churn), 12),
            s.file.rel_path.display(),
        )?;
    }

    writeln!(out, "{separator}")?;
    writeln!(out, "Bands: {}", band_summary(&report.scores))?;
    if shown.len() < report.scores.len() {
        writeln!(out, "Showing top {} of {}.", shown.len(), report.scores.len())?;
    }
    writeln!(
        out,
        "Risk = {W_COMPLEXITY} × complexity + {W_CHURN} × churn, each scaled to the scan maximum."
    )?;
    if report.scores.iter().any(|s| !s.churn.history_available) {
        writeln!(out, "History unavailable: not inside a git repository.")?;
    }

    if let Some(s) = shown
        .iter()
        .find(|s| s.complexity.method == AnalysisMethod::Structural && !s.complexity.functions.is_empty())
    {
        writeln!(out)?;
        writeln!(out, "Most complex functions in {}:", s.file.rel_path.display())?;
        for f in s.complexity.functions.iter().take(TOP_FUNCTIONS) {
            writeln!(out, "  {:>4}  {} (line {})", f.complexity, f.name, f.line)?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    sort_by: SortKey,
    duration_ms: u64,
    files: &'a [FileScore],
}

fn json_report(report: &ScanReport) -> JsonReport<'_> {
    JsonReport {
        sort_by: report.sort_by,
        duration_ms: report.duration.as_millis() as u64,
        files: &report.scores,
    }
}

pub fn print_json(report: &ScanReport) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(&json_report(report))?);
    Ok(())
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
