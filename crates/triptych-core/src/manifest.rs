//! Manifest CSV loading
//!
//! The manifest enumerates every expected (concept, prompt_id, seed)
//! combination together with the prompt text. Column presence is validated
//! once against the header; individual rows that fail to decode are skipped.

use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ManifestError;

/// Columns every manifest must carry (order immaterial).
pub const REQUIRED_COLUMNS: [&str; 4] = ["target_concept", "prompt_id", "seed", "prompt"];

/// One decoded manifest row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ManifestRow {
    pub target_concept: String,
    pub prompt_id: i64,
    pub seed: i64,
    pub prompt: String,
    /// 1-based line in the CSV file (header is line 1).
    #[serde(skip)]
    pub line: u64,
}

/// A row that could not be decoded and was left out.
#[derive(Debug, Clone)]
pub struct SkippedRow {
    pub line: u64,
    pub reason: String,
}

/// Loaded manifest: decoded rows in file order plus the rows that were skipped.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub path: PathBuf,
    pub rows: Vec<ManifestRow>,
    pub skipped: Vec<SkippedRow>,
}

impl Manifest {
    /// Distinct concepts in order of first appearance.
    pub fn concepts(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.rows
            .iter()
            .map(|r| r.target_concept.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Rows belonging to `concept`, in file order.
    pub fn rows_for<'a>(&'a self, concept: &'a str) -> impl Iterator<Item = &'a ManifestRow> {
        self.rows.iter().filter(move |r| r.target_concept == concept)
    }
}

/// Load the manifest at `path`.
///
/// Fails with [`ManifestError::NotFound`] when the file does not exist and
/// with [`ManifestError::MissingColumn`] when the header lacks one of
/// [`REQUIRED_COLUMNS`]. Malformed rows are logged and skipped.
pub fn load_manifest(path: &Path) -> Result<Manifest, ManifestError> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            ManifestError::NotFound(path.to_path_buf())
        } else {
            ManifestError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| ManifestError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?
        .clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(ManifestError::MissingColumn {
                path: path.to_path_buf(),
                column,
            });
        }
    }

    let mut rows = Vec::new();
    let mut skipped = Vec::new();

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => {
                return Err(ManifestError::Csv {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
            Err(e) => {
                let line = e.position().map_or(0, |p| p.line());
                skip(&mut skipped, line, e.to_string());
                continue;
            }
        };

        let line = record.position().map_or(0, |p| p.line());
        match record.deserialize::<ManifestRow>(Some(&headers)) {
            Ok(row) if row.target_concept.trim().is_empty() => {
                skip(&mut skipped, line, "empty target_concept".to_string());
            }
            Ok(mut row) => {
                row.line = line;
                rows.push(row);
            }
            Err(e) => skip(&mut skipped, line, e.to_string()),
        }
    }

    log::info!("Loaded {} records from {}", rows.len(), path.display());
    if !skipped.is_empty() {
        log::warn!(
            "Skipped {} malformed record(s) in {}",
            skipped.len(),
            path.display()
        );
    }

    Ok(Manifest {
        path: path.to_path_buf(),
        rows,
        skipped,
    })
}

fn skip(skipped: &mut Vec<SkippedRow>, line: u64, reason: String) {
    log::warn!("Skipping manifest line {line}: {reason}");
    skipped.push(SkippedRow { line, reason });
}
