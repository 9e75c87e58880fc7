//! Output files: atomic tmp→rename writes that leave unchanged files alone

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// What [`write_if_changed`] did with a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Unchanged,
}

/// Hash a file's contents with blake3.
pub fn hash_file(path: &Path) -> io::Result<blake3::Hash> {
    let mut hasher = blake3::Hasher::new();
    hasher.update_reader(File::open(path)?)?;
    Ok(hasher.finalize())
}

/// Write `content` to `path` unless the file already holds exactly that.
///
/// New content goes to `{path}.tmp` first and is renamed into place, so a
/// reader never sees a half-written page.
pub fn write_if_changed(path: &Path, content: &str) -> io::Result<WriteOutcome> {
    if path.is_file() && hash_file(path)? == blake3::hash(content.as_bytes()) {
        log::debug!("Unchanged: {}", path.display());
        return Ok(WriteOutcome::Unchanged);
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    {
        let mut file = File::create(&tmp_path)?;
        file.write_all(content.as_bytes())?;
        file.flush()?;
    }
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    Ok(WriteOutcome::Written)
}

/// Remove stale .tmp files in the output directory
pub fn cleanup_tmp_files(output_dir: &Path) -> io::Result<()> {
    for entry in fs::read_dir(output_dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "tmp") {
            log::warn!("Removing stale tmp file: {}", path.display());
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}

/// Delete `*.html` files directly in `pages_dir` that are not in `keep`.
///
/// Returns the removed paths, sorted.
pub fn prune_stale_pages(pages_dir: &Path, keep: &BTreeSet<PathBuf>) -> Result<Vec<PathBuf>> {
    let pattern = format!(
        "{}/*.html",
        glob::Pattern::escape(&pages_dir.to_string_lossy())
    );

    let mut stale: Vec<PathBuf> = glob::glob(&pattern)
        .context("invalid glob pattern")?
        .filter_map(|e| e.ok())
        .filter(|p| p.is_file() && !keep.contains(p))
        .collect();
    stale.sort();

    for path in &stale {
        log::info!("Removing stale page: {}", path.display());
        fs::remove_file(path).with_context(|| format!("failed to remove {}", path.display()))?;
    }
    Ok(stale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_new_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cat.html");
        assert_eq!(write_if_changed(&path, "<p>cat</p>").unwrap(), WriteOutcome::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "<p>cat</p>");
        assert!(!dir.path().join("cat.html.tmp").exists());
    }

    #[test]
    fn identical_content_is_left_alone() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cat.html");
        write_if_changed(&path, "same").unwrap();
        assert_eq!(write_if_changed(&path, "same").unwrap(), WriteOutcome::Unchanged);
        assert_eq!(write_if_changed(&path, "different").unwrap(), WriteOutcome::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "different");
    }

    #[test]
    fn hash_file_matches_bytes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.txt");
        fs::write(&path, b"file content").unwrap();
        assert_eq!(hash_file(&path).unwrap(), blake3::hash(b"file content"));
    }

    #[test]
    fn write_into_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("cat.html");
        assert!(write_if_changed(&path, "x").is_err());
    }

    #[test]
    fn cleanup_tmp_files_removes_only_tmp() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.html.tmp"), b"stale").unwrap();
        fs::write(dir.path().join("b.html"), b"keep").unwrap();
        fs::write(dir.path().join("c.tmp"), b"stale2").unwrap();

        cleanup_tmp_files(dir.path()).unwrap();

        assert!(!dir.path().join("a.html.tmp").exists());
        assert!(dir.path().join("b.html").exists());
        assert!(!dir.path().join("c.tmp").exists());
    }

    #[test]
    fn prune_keeps_listed_pages_and_other_files() {
        let dir = TempDir::new().unwrap();
        let keep_path = dir.path().join("cat.html");
        let stale_path = dir.path().join("dog.html");
        fs::write(&keep_path, b"cat").unwrap();
        fs::write(&stale_path, b"dog").unwrap();
        fs::write(dir.path().join("notes.txt"), b"txt").unwrap();
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::write(dir.path().join("data").join("old.html"), b"nested").unwrap();

        let keep: BTreeSet<PathBuf> = [keep_path.clone()].into_iter().collect();
        let removed = prune_stale_pages(dir.path(), &keep).unwrap();

        assert_eq!(removed, vec![stale_path.clone()]);
        assert!(keep_path.exists());
        assert!(!stale_path.exists());
        assert!(dir.path().join("notes.txt").exists());
        assert!(dir.path().join("data").join("old.html").exists());
    }
}
