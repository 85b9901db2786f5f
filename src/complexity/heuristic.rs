/// Tokens that mark a line as containing a decision point.
/// Trailing spaces keep `if` from matching inside `iff(` or `notify`.
pub const DECISION_TOKENS: &[&str] = &[
    "if ", "else ", "elif ", "for ", "while ", "case ", "catch ", "&&", "||", "? ",
];

/// Lines starting with these (after trimming) are treated as comments.
pub const COMMENT_PREFIXES: &[&str] = &["//", "#"];

/// Whether a trimmed line is a comment line.
fn is_comment(line: &str) -> bool {
    COMMENT_PREFIXES.iter().any(|p| line.starts_with(p))
}

/// Whether a line contains at least one decision token.
fn has_decision(line: &str) -> bool {
    DECISION_TOKENS.iter().any(|t| line.contains(t))
}

/// Line-based complexity estimate.
///
/// Starts at 1 and adds exactly one per non-comment line that contains any
/// decision token, no matter how many tokens the line has.
pub fn count_complexity(source: &str) -> usize {
    1 + source
        .lines()
        .map(str::trim)
        .filter(|line| !is_comment(line) && has_decision(line))
        .count()
}

#[cfg(test)]
#[path = "heuristic_test.rs"]
mod tests;
