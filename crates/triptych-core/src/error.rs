//! Fatal manifest errors

use std::path::PathBuf;

/// Error from loading the manifest CSV.
///
/// Every variant aborts the run before any output is written. Row-level
/// decode failures are not represented here: those rows are skipped.
#[derive(Debug)]
pub enum ManifestError {
    NotFound(PathBuf),
    MissingColumn { path: PathBuf, column: &'static str },
    Csv { path: PathBuf, source: csv::Error },
    Io { path: PathBuf, source: std::io::Error },
}

impl std::fmt::Display for ManifestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "manifest '{}' not found", path.display()),
            Self::MissingColumn { path, column } => write!(
                f,
                "manifest '{}' has no '{column}' column",
                path.display()
            ),
            Self::Csv { path, source } => write!(f, "CSV: {}: {source}", path.display()),
            Self::Io { path, source } => write!(f, "IO: {}: {source}", path.display()),
        }
    }
}

impl std::error::Error for ManifestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Csv { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl ManifestError {
    /// Whether the manifest file itself was absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
