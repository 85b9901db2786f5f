use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop a scan before or while enumerating the tree.
///
/// Per-file problems (parse failures, missing history) never surface here;
/// they degrade to default metrics inside the analyzers.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("directory {0:?} does not exist")]
    InvalidRoot(PathBuf),

    #[error("cannot read directory {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("scan stopped before reporting a result")]
    Aborted,
}
