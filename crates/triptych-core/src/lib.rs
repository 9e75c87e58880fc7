//! Triptych Core - static comparison site generator
//!
//! Reads a manifest of (concept, prompt, seed) combinations, finds the
//! images each of three generation methods produced for them, and renders
//! one side-by-side comparison page per concept plus an index.

pub mod config;
pub mod error;
pub mod hosting;
pub mod html;
pub mod index;
pub mod logging;
pub mod manifest;
pub mod matcher;
pub mod page;
pub mod progress;
pub mod sink;

// Re-exports for convenience
pub use config::SiteConfig;
pub use error::ManifestError;
pub use hosting::{image_url_prefix, online_prefix, HostingMode};
pub use index::{index_link, render_index, ConceptStats};
pub use logging::{init_logging, IndicatifLogger};
pub use manifest::{load_manifest, Manifest, ManifestRow, SkippedRow};
pub use matcher::{
    asset_filename, match_concept, match_row, page_file_name, sanitize_concept, AssetLayout,
    ConceptTriplets, Method, Triplet,
};
pub use page::{render_page, PageContext};
pub use progress::{fmt_num, ProgressContext};
pub use sink::{write_if_changed, WriteOutcome};

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use anyhow::{Context, Result};

/// A concept page produced by a run.
#[derive(Debug, Clone)]
pub struct ConceptPage {
    pub concept: String,
    pub triplets: usize,
    pub path: PathBuf,
    pub outcome: WriteOutcome,
}

/// A concept left out because its page file name is already taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCollision {
    pub concept: String,
    /// Concept that claimed the page first, in manifest order
    pub kept: String,
    pub page: String,
}

/// Summary of a generation run.
#[derive(Debug, Clone)]
pub struct SiteSummary {
    /// Pages in manifest order of their concept's first appearance
    pub pages: Vec<ConceptPage>,
    pub rows_loaded: usize,
    pub rows_skipped: usize,
    pub concepts_without_matches: Vec<String>,
    pub page_collisions: Vec<PageCollision>,
    pub index_path: PathBuf,
    pub index_outcome: WriteOutcome,
    pub pruned: Vec<PathBuf>,
}

impl SiteSummary {
    pub fn total_triplets(&self) -> usize {
        self.pages.iter().map(|p| p.triplets).sum()
    }

    /// Files (pages and index) whose content changed this run.
    pub fn written(&self) -> usize {
        self.count_outcome(WriteOutcome::Written)
    }

    pub fn unchanged(&self) -> usize {
        self.count_outcome(WriteOutcome::Unchanged)
    }

    fn count_outcome(&self, outcome: WriteOutcome) -> usize {
        self.pages.iter().filter(|p| p.outcome == outcome).count()
            + usize::from(self.index_outcome == outcome)
    }
}

/// Generate the site described by `config`.
///
/// Everything is loaded, matched and rendered before the first write, so a
/// manifest error leaves the filesystem untouched. Manifest errors keep
/// their [`ManifestError`] type inside the returned `anyhow::Error`.
pub fn run(config: &SiteConfig, progress: &ProgressContext) -> Result<SiteSummary> {
    let manifest = load_manifest(&config.manifest_path())?;

    let concepts = manifest.concepts();
    log::info!(
        "Found {} unique target concepts: {}",
        concepts.len(),
        concepts.join(", ")
    );

    let layout = config.asset_layout();
    let index_href = config.index_href_from_page();
    let ctx = PageContext {
        url_prefix: &config.url_prefix,
        index_href: &index_href,
    };

    let bar = progress.concept_bar(concepts.len());
    let mut rendered = Vec::new();
    let mut stats = ConceptStats::new();
    let mut concepts_without_matches = Vec::new();
    let mut page_collisions = Vec::new();
    // page file name -> concept that owns it
    let mut claimed: BTreeMap<String, String> = BTreeMap::new();

    for concept in &concepts {
        bar.set_message(concept.to_string());
        log::debug!("Processing concept: {concept}");

        let matched = match_concept(&manifest, concept, &layout);
        let Some(html) = render_page(concept, &matched.triplets, &ctx) else {
            progress.report(format_args!("No matching images found for {concept}, skipping"));
            concepts_without_matches.push(matched.concept);
            bar.inc(1);
            continue;
        };
        progress.report(format_args!(
            "Found {} matching images for {concept}",
            matched.triplets.len()
        ));

        let page = page_file_name(concept);
        if let Some(kept) = claimed.get(&page) {
            log::warn!("Concept '{concept}' maps to {page}, already used by '{kept}', skipping");
            page_collisions.push(PageCollision {
                concept: matched.concept,
                kept: kept.clone(),
                page,
            });
            bar.inc(1);
            continue;
        }
        claimed.insert(page, matched.concept.clone());

        *stats.entry(matched.concept.clone()).or_default() += matched.triplets.len();
        rendered.push((matched, html));
        bar.inc(1);
    }
    bar.finish_and_clear();

    let index_html = render_index(&stats, &config.pages_dir);

    // Write phase
    let pages_path = config.pages_path();
    std::fs::create_dir_all(&pages_path)
        .with_context(|| format!("Failed to create output dir: {}", pages_path.display()))?;
    sink::cleanup_tmp_files(&pages_path)
        .with_context(|| format!("Failed to clean {}", pages_path.display()))?;

    let mut pages = Vec::with_capacity(rendered.len());
    for (matched, html) in rendered {
        let path = config.page_output_path(&matched.concept);
        let outcome = write_if_changed(&path, &html)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        match outcome {
            WriteOutcome::Written => log::info!("HTML visualization saved as '{}'", path.display()),
            WriteOutcome::Unchanged => log::info!("Up to date: '{}'", path.display()),
        }
        pages.push(ConceptPage {
            concept: matched.concept,
            triplets: matched.triplets.len(),
            path,
            outcome,
        });
    }

    let index_path = config.index_path();
    let index_outcome = write_if_changed(&index_path, &index_html)
        .with_context(|| format!("Failed to write {}", index_path.display()))?;
    log::info!("Index page saved as '{}'", index_path.display());

    let pruned = if config.prune_stale {
        let keep: BTreeSet<PathBuf> = pages
            .iter()
            .map(|p| p.path.clone())
            .chain(std::iter::once(index_path.clone()))
            .collect();
        sink::prune_stale_pages(&pages_path, &keep)?
    } else {
        Vec::new()
    };

    Ok(SiteSummary {
        pages,
        rows_loaded: manifest.rows.len(),
        rows_skipped: manifest.skipped.len(),
        concepts_without_matches,
        page_collisions,
        index_path,
        index_outcome,
        pruned,
    })
}
