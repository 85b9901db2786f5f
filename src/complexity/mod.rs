mod go;
mod heuristic;
mod rust;

use std::error::Error;
use std::fs;

use serde::Serialize;

use crate::language::Language;
use crate::walk::SourceFile;

/// How a file's complexity was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMethod {
    Structural,
    Heuristic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionComplexity {
    /// `Recv.method` for Go methods, `Type::method` for Rust methods, the
    /// bare name for free functions.
    pub name: String,
    pub complexity: usize,
    pub line: usize, // 1-based
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplexityResult {
    /// Always at least 1.
    pub total: usize,
    /// Highest complexity first; empty for heuristic results.
    pub functions: Vec<FunctionComplexity>,
    pub method: AnalysisMethod,
}

impl ComplexityResult {
    /// Result for a file that could not be read at all.
    pub fn baseline() -> Self {
        Self {
            total: 1,
            functions: Vec::new(),
            method: AnalysisMethod::Heuristic,
        }
    }

    /// Build a structural result. The file total is 1 plus every
    /// function's decision points; a file without functions totals 1.
    pub fn from_functions(mut functions: Vec<FunctionComplexity>) -> Self {
        let total = 1 + functions
            .iter()
            .map(|f| f.complexity.saturating_sub(1))
            .sum::<usize>();
        // Stable sort keeps declaration order among equal complexities.
        functions.sort_by(|a, b| b.complexity.cmp(&a.complexity));
        Self {
            total,
            functions,
            method: AnalysisMethod::Structural,
        }
    }
}

/// Analyze already-loaded source text for the given language.
///
/// Go and Rust are parsed; if parsing fails the heuristic scan is used
/// instead, so this never fails.
pub fn analyze_content(source: &str, language: Language) -> ComplexityResult {
    let parsed: Result<Vec<FunctionComplexity>, Box<dyn Error>> = match language {
        Language::Go => go::analyze_source(source),
        Language::Rust => rust::analyze_source(source).map_err(Into::into),
        _ => return heuristic_result(source),
    };
    match parsed {
        Ok(functions) => ComplexityResult::from_functions(functions),
        Err(err) => {
            tracing::debug!("{language} parse failed, using heuristic: {err}");
            heuristic_result(source)
        }
    }
}

fn heuristic_result(source: &str) -> ComplexityResult {
    ComplexityResult {
        total: heuristic::count_complexity(source),
        functions: Vec::new(),
        method: AnalysisMethod::Heuristic,
    }
}

/// Analyze a discovered file. Unreadable files get the baseline result.
pub fn analyze(file: &SourceFile) -> ComplexityResult {
    let bytes = match fs::read(&file.path) {
        Ok(b) => b,
        Err(err) => {
            tracing::warn!("{}: {err}", file.path.display());
            return ComplexityResult::baseline();
        }
    };
    let source = String::from_utf8_lossy(&bytes);
    let result = analyze_content(&source, file.language);
    tracing::trace!(
        path = %file.rel_path.display(),
        total = result.total,
        method = ?result.method,
        "complexity"
    );
    result
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
