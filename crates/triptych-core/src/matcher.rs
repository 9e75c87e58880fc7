//! Matching manifest rows to image triplets on disk

use std::path::PathBuf;

use crate::html::url_path;
use crate::manifest::{Manifest, ManifestRow};

/// The three compared generation methods, in display order.
///
/// Discriminants index [`Triplet::assets`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Unmodified Stable Diffusion output
    Original = 0,
    /// Unified Concept Editing
    Baseline = 1,
    /// The proposed method
    Proposed = 2,
}

impl Method {
    pub const ALL: [Method; 3] = [Method::Original, Method::Baseline, Method::Proposed];

    /// Asset subdirectory, also used as the CSS class.
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Original => "sd",
            Self::Baseline => "uce",
            Self::Proposed => "our",
        }
    }

    /// Column heading on concept pages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Original => "SD (Original)",
            Self::Baseline => "UCE",
            Self::Proposed => "Our",
        }
    }

    /// Longer label for the index legend.
    pub fn legend(self) -> &'static str {
        match self {
            Self::Original => "SD (Original Stable Diffusion)",
            Self::Baseline => "UCE (Unified Concept Editing)",
            Self::Proposed => "Our",
        }
    }

    /// Prefix of the image `alt` text.
    pub fn alt(self) -> &'static str {
        match self {
            Self::Original => "SD",
            Self::Baseline => "UCE",
            Self::Proposed => "our",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Original => "#27ae60",
            Self::Baseline => "#e74c3c",
            Self::Proposed => "#9b59b6",
        }
    }
}

/// Asset filename for a (concept, prompt_id, seed) combination.
pub fn asset_filename(concept: &str, prompt_id: i64, seed: i64) -> String {
    format!("{concept}_id{prompt_id}_seed{seed}.jpg")
}

/// Make a concept name safe as a single path or URL component.
///
/// Spaces and `/` become `_`. Every place that turns a concept into a
/// filename or link goes through here.
pub fn sanitize_concept(concept: &str) -> String {
    concept.replace([' ', '/'], "_")
}

/// Output filename of a concept's page (relative to the pages directory).
pub fn page_file_name(concept: &str) -> String {
    format!("{}.html", sanitize_concept(concept))
}

/// Where the method directories live, on disk and as seen from a page.
#[derive(Debug, Clone)]
pub struct AssetLayout {
    /// Directory containing `sd/`, `uce/` and `our/`.
    pub root: PathBuf,
    /// The same directory relative to the pages directory, `/`-separated.
    pub href_base: String,
}

impl AssetLayout {
    pub fn new(root: impl Into<PathBuf>, href_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            href_base: href_base.into(),
        }
    }

    fn disk_path(&self, method: Method, filename: &str) -> PathBuf {
        self.root.join(method.dir_name()).join(filename)
    }

    fn href(&self, method: Method, filename: &str) -> String {
        let base = self.href_base.trim_end_matches('/');
        let filename = url_path(filename);
        if base.is_empty() {
            format!("{}/{filename}", method.dir_name())
        } else {
            format!("{base}/{}/{filename}", method.dir_name())
        }
    }
}

/// One manifest row whose image exists for all three methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triplet {
    pub filename: String,
    pub concept: String,
    pub prompt_id: i64,
    pub seed: i64,
    pub prompt: String,
    /// Page-relative asset paths, indexed like [`Method::ALL`].
    pub assets: [String; 3],
}

impl Triplet {
    pub fn asset(&self, method: Method) -> &str {
        &self.assets[method as usize]
    }
}

/// Matched triplets of one concept.
#[derive(Debug, Clone)]
pub struct ConceptTriplets {
    pub concept: String,
    pub triplets: Vec<Triplet>,
}

/// Return the row's triplet if its image exists under all three method dirs.
///
/// Stats the filesystem on every call.
pub fn match_row(row: &ManifestRow, layout: &AssetLayout) -> Option<Triplet> {
    let filename = asset_filename(&row.target_concept, row.prompt_id, row.seed);

    let all_present = Method::ALL
        .iter()
        .all(|m| layout.disk_path(*m, &filename).is_file());
    if !all_present {
        log::debug!("Incomplete triplet for {filename}");
        return None;
    }

    let assets = Method::ALL.map(|m| layout.href(m, &filename));
    Some(Triplet {
        filename,
        concept: row.target_concept.clone(),
        prompt_id: row.prompt_id,
        seed: row.seed,
        prompt: row.prompt.clone(),
        assets,
    })
}

/// Match every row of `concept`, keeping manifest order.
pub fn match_concept(manifest: &Manifest, concept: &str, layout: &AssetLayout) -> ConceptTriplets {
    let triplets: Vec<Triplet> = manifest
        .rows_for(concept)
        .filter_map(|row| match_row(row, layout))
        .collect();
    log::debug!("{} of the rows for {concept} matched", triplets.len());
    ConceptTriplets {
        concept: concept.to_string(),
        triplets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn row(concept: &str, prompt_id: i64, seed: i64) -> ManifestRow {
        ManifestRow {
            target_concept: concept.to_string(),
            prompt_id,
            seed,
            prompt: format!("a {concept}"),
            line: 2,
        }
    }

    fn touch(root: &Path, method: Method, filename: &str) {
        let dir = root.join(method.dir_name());
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(filename), b"jpg").unwrap();
    }

    #[test]
    fn filename_is_deterministic() {
        assert_eq!(asset_filename("cat", 1, 42), "cat_id1_seed42.jpg");
        assert_eq!(asset_filename("cat", 1, 42), asset_filename("cat", 1, 42));
        assert_eq!(
            asset_filename("van gogh", 10, 0),
            "van gogh_id10_seed0.jpg"
        );
    }

    #[test]
    fn sanitize_spaces_and_slashes() {
        assert_eq!(sanitize_concept("van gogh"), "van_gogh");
        assert_eq!(sanitize_concept("ac/dc"), "ac_dc");
        assert_eq!(sanitize_concept("a b/c"), "a_b_c");
        assert_eq!(sanitize_concept("cat"), "cat");
        assert_eq!(page_file_name("van gogh"), "van_gogh.html");
    }

    #[test]
    fn match_row_requires_all_three() {
        let dir = tempfile::tempdir().unwrap();
        let layout = AssetLayout::new(dir.path(), "data");
        let r = row("cat", 1, 42);

        touch(dir.path(), Method::Original, "cat_id1_seed42.jpg");
        touch(dir.path(), Method::Baseline, "cat_id1_seed42.jpg");
        assert!(match_row(&r, &layout).is_none());

        touch(dir.path(), Method::Proposed, "cat_id1_seed42.jpg");
        let t = match_row(&r, &layout).unwrap();
        assert_eq!(t.filename, "cat_id1_seed42.jpg");
        assert_eq!(t.seed, 42);
        assert_eq!(t.asset(Method::Original), "data/sd/cat_id1_seed42.jpg");
        assert_eq!(t.asset(Method::Baseline), "data/uce/cat_id1_seed42.jpg");
        assert_eq!(t.asset(Method::Proposed), "data/our/cat_id1_seed42.jpg");
    }

    #[test]
    fn directory_with_asset_name_does_not_match() {
        let dir = tempfile::tempdir().unwrap();
        let layout = AssetLayout::new(dir.path(), "data");
        for m in Method::ALL {
            std::fs::create_dir_all(dir.path().join(m.dir_name()).join("cat_id1_seed42.jpg"))
                .unwrap();
        }
        assert!(match_row(&row("cat", 1, 42), &layout).is_none());
    }

    #[test]
    fn negative_seed_matches_dash_filename() {
        let dir = tempfile::tempdir().unwrap();
        let layout = AssetLayout::new(dir.path(), "data");
        assert_eq!(asset_filename("cat", 1, -1), "cat_id1_seed-1.jpg");
        for m in Method::ALL {
            touch(dir.path(), m, "cat_id1_seed-1.jpg");
        }
        let t = match_row(&row("cat", 1, -1), &layout).unwrap();
        assert_eq!(t.seed, -1);
        assert_eq!(t.asset(Method::Proposed), "data/our/cat_id1_seed-1.jpg");
    }

    #[test]
    fn asset_href_is_percent_encoded() {
        let dir = tempfile::tempdir().unwrap();
        let layout = AssetLayout::new(dir.path(), "data");
        for m in Method::ALL {
            touch(dir.path(), m, "c# 100%?_id1_seed1.jpg");
        }
        let t = match_row(&row("c# 100%?", 1, 1), &layout).unwrap();
        assert_eq!(t.filename, "c# 100%?_id1_seed1.jpg");
        assert_eq!(
            t.asset(Method::Original),
            "data/sd/c%23%20100%25%3F_id1_seed1.jpg"
        );
    }

    #[test]
    fn empty_href_base() {
        let layout = AssetLayout::new("/unused", "");
        assert_eq!(layout.href(Method::Proposed, "x.jpg"), "our/x.jpg");
        let layout = AssetLayout::new("/unused", "assets/");
        assert_eq!(layout.href(Method::Original, "x.jpg"), "assets/sd/x.jpg");
    }

    #[test]
    fn match_concept_keeps_manifest_order() {
        let dir = tempfile::tempdir().unwrap();
        let layout = AssetLayout::new(dir.path(), "data");
        for m in Method::ALL {
            touch(dir.path(), m, "dog_id2_seed7.jpg");
            touch(dir.path(), m, "dog_id1_seed7.jpg");
        }

        let manifest = Manifest {
            path: PathBuf::from("m.csv"),
            rows: vec![row("dog", 2, 7), row("cat", 1, 1), row("dog", 1, 7)],
            skipped: Vec::new(),
        };
        let dog = match_concept(&manifest, "dog", &layout);
        assert_eq!(dog.concept, "dog");
        let ids: Vec<i64> = dog.triplets.iter().map(|t| t.prompt_id).collect();
        assert_eq!(ids, vec![2, 1]);

        let cat = match_concept(&manifest, "cat", &layout);
        assert!(cat.triplets.is_empty());
    }
}
