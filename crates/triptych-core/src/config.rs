use std::path::PathBuf;

use crate::index::index_link;
use crate::matcher::{page_file_name, AssetLayout};

/// Configuration for one site generation run.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Site root; holds the index file. Relative paths below resolve against it.
    pub root: PathBuf,
    /// Manifest CSV
    pub manifest: PathBuf,
    /// Directory for concept pages, relative to `root`, `/`-separated
    pub pages_dir: String,
    /// Directory holding `sd/`, `uce/`, `our/`, relative to `pages_dir`
    pub assets_dir: String,
    /// Index file name, placed directly in `root`
    pub index_file: String,
    /// Prefix prepended to page-relative image paths (see [`crate::hosting`])
    pub url_prefix: String,
    /// Delete `*.html` in `pages_dir` that this run did not produce
    pub prune_stale: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            manifest: PathBuf::from("visualizations/data/all_prompts.csv"),
            pages_dir: "visualizations".to_string(),
            assets_dir: "data".to_string(),
            index_file: "index.html".to_string(),
            url_prefix: "./".to_string(),
            prune_stale: false,
        }
    }
}

impl SiteConfig {
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(&self.manifest)
    }

    pub fn pages_path(&self) -> PathBuf {
        self.root.join(&self.pages_dir)
    }

    pub fn index_path(&self) -> PathBuf {
        self.root.join(&self.index_file)
    }

    pub fn asset_layout(&self) -> AssetLayout {
        AssetLayout::new(self.pages_path().join(&self.assets_dir), self.assets_dir.as_str())
    }

    /// Where the page for `concept` is written.
    pub fn page_output_path(&self, concept: &str) -> PathBuf {
        self.pages_path().join(page_file_name(concept))
    }

    /// Link from the index to the page for `concept`.
    pub fn index_link(&self, concept: &str) -> String {
        index_link(&self.pages_dir, concept)
    }

    /// Link from a concept page back to the index.
    pub fn index_href_from_page(&self) -> String {
        let depth = self
            .pages_dir
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .count();
        format!("{}{}", "../".repeat(depth), self.index_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout() {
        let config = SiteConfig::default();
        assert_eq!(
            config.manifest_path(),
            PathBuf::from("./visualizations/data/all_prompts.csv")
        );
        assert_eq!(config.index_path(), PathBuf::from("./index.html"));
        assert_eq!(
            config.asset_layout().root,
            PathBuf::from("./visualizations/data")
        );
        assert_eq!(config.index_href_from_page(), "../index.html");
    }

    #[test]
    fn index_link_points_at_page_output() {
        let config = SiteConfig {
            root: PathBuf::from("/srv/site"),
            ..SiteConfig::default()
        };
        for concept in ["cat", "van gogh", "ac/dc", "a b/c d"] {
            assert_eq!(
                config.root.join(config.index_link(concept)),
                config.page_output_path(concept)
            );
        }
    }

    #[test]
    fn back_link_depth_follows_pages_dir() {
        let mut config = SiteConfig::default();
        config.pages_dir = "site/pages/".to_string();
        assert_eq!(config.index_href_from_page(), "../../index.html");
        config.pages_dir = ".".to_string();
        assert_eq!(config.index_href_from_page(), "index.html");
    }
}
