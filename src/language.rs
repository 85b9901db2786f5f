use std::path::Path;

use serde::Serialize;

/// Languages recognised during discovery.
///
/// Go and Rust sources are parsed for per-function complexity; every other
/// language is scored with the line heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Language {
    Go,
    JavaScript,
    TypeScript,
    Python,
    Java,
    Rust,
    C,
    #[serde(rename = "C++")]
    Cpp,
    Ruby,
    #[serde(rename = "PHP")]
    Php,
}

/// Fixed extension table. Extensions are stored lowercase, without the dot.
const EXTENSIONS: &[(&str, Language)] = &[
    ("go", Language::Go),
    ("js", Language::JavaScript),
    ("ts", Language::TypeScript),
    ("py", Language::Python),
    ("java", Language::Java),
    ("rs", Language::Rust),
    ("c", Language::C),
    ("cpp", Language::Cpp),
    ("rb", Language::Ruby),
    ("php", Language::Php),
];

impl Language {
    pub fn name(self) -> &'static str {
        match self {
            Self::Go => "Go",
            Self::JavaScript => "JavaScript",
            Self::TypeScript => "TypeScript",
            Self::Python => "Python",
            Self::Java => "Java",
            Self::Rust => "Rust",
            Self::C => "C",
            Self::Cpp => "C++",
            Self::Ruby => "Ruby",
            Self::Php => "PHP",
        }
    }

    /// Look up a language by extension (case-insensitive, no leading dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        EXTENSIONS
            .iter()
            .find(|(e, _)| *e == ext)
            .map(|&(_, lang)| lang)
    }

    /// Detect the language of a path from its extension.
    pub fn detect(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "language_test.rs"]
mod tests;
