//! Configuration loading from TOML files

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use triptych_core::{HostingMode, SiteConfig};

/// Global configuration for triptych
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub site: SiteSection,
    pub hosting: HostingSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    pub root: PathBuf,
    pub manifest: PathBuf,
    pub pages_dir: String,
    pub assets_dir: String,
    pub index_file: String,
    pub prune_stale: bool,
}

impl Default for SiteSection {
    fn default() -> Self {
        let site = SiteConfig::default();
        Self {
            root: site.root,
            manifest: site.manifest,
            pages_dir: site.pages_dir,
            assets_dir: site.assets_dir,
            index_file: site.index_file,
            prune_stale: site.prune_stale,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HostingSection {
    /// Mode used when none is given on the command line
    #[serde(deserialize_with = "deserialize_mode")]
    pub mode: HostingMode,
    /// Shared folder the images are uploaded to (online mode). `${NAME}`
    /// references are filled in from the environment when online mode is used.
    pub public_url: Option<String>,
    /// Prefix for local relative image paths
    pub local_prefix: String,
}

impl Default for HostingSection {
    fn default() -> Self {
        Self {
            mode: HostingMode::Local,
            public_url: None,
            local_prefix: "./".to_string(),
        }
    }
}

fn deserialize_mode<'de, D>(deserializer: D) -> Result<HostingMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
}

/// Replace every `${NAME}` in `value` with the environment variable `NAME`.
///
/// An unset variable or an unterminated `${` is an error naming the problem.
fn interpolate_env(value: &str) -> Result<String> {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find('}')
            .with_context(|| format!("unterminated '${{' in '{value}'"))?;
        let name = &after[..end];
        let resolved = std::env::var(name)
            .with_context(|| format!("environment variable {name} is not set"))?;
        out.push_str(&resolved);
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

impl HostingSection {
    /// `public_url` with environment references filled in.
    pub fn resolved_public_url(&self) -> Result<Option<String>> {
        self.public_url
            .as_deref()
            .map(|url| interpolate_env(url).context("Failed to resolve hosting.public_url"))
            .transpose()
    }
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./triptych.toml (current directory)
    /// 2. ~/.config/triptych/config.toml
    ///
    /// If no config file found, returns default config.
    pub fn load() -> Result<Self> {
        let local_config = PathBuf::from("triptych.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = directories::ProjectDirs::from("", "", "triptych") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Hosting mode: the command-line choice wins over the configured default.
    pub fn hosting_mode(&self, cli: Option<HostingMode>) -> HostingMode {
        cli.unwrap_or(self.hosting.mode)
    }

    /// Build the core run configuration for `mode`.
    pub fn site_config(&self, mode: HostingMode) -> Result<SiteConfig> {
        let public_url = match mode {
            HostingMode::Online => self.hosting.resolved_public_url()?,
            HostingMode::Local => None,
        };
        let url_prefix = triptych_core::image_url_prefix(
            mode,
            public_url.as_deref(),
            &self.hosting.local_prefix,
        )
        .context("online hosting selected but hosting.public_url is not configured")?;

        Ok(SiteConfig {
            root: self.site.root.clone(),
            manifest: self.site.manifest.clone(),
            pages_dir: self.site.pages_dir.clone(),
            assets_dir: self.site.assets_dir.clone(),
            index_file: self.site.index_file.clone(),
            url_prefix,
            prune_stale: self.site.prune_stale,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.site.pages_dir, "visualizations");
        assert_eq!(
            config.site.manifest,
            PathBuf::from("visualizations/data/all_prompts.csv")
        );
        assert_eq!(config.hosting.mode, HostingMode::Local);
        assert!(config.hosting.public_url.is_none());
        assert!(!config.site.prune_stale);
    }

    #[test]
    fn interpolate_whole_and_embedded_references() {
        std::env::set_var("TRIPTYCH_TEST_HOST", "cdn.example.org");
        assert_eq!(
            interpolate_env("${TRIPTYCH_TEST_HOST}").unwrap(),
            "cdn.example.org"
        );
        assert_eq!(
            interpolate_env("https://${TRIPTYCH_TEST_HOST}/exp/${TRIPTYCH_TEST_HOST}").unwrap(),
            "https://cdn.example.org/exp/cdn.example.org"
        );
        std::env::remove_var("TRIPTYCH_TEST_HOST");
    }

    #[test]
    fn interpolate_leaves_plain_urls_alone() {
        let url = "https://www.dropbox.com/scl/fo/abc/XYZ?dl=0";
        assert_eq!(interpolate_env(url).unwrap(), url);
        assert_eq!(interpolate_env("price $5").unwrap(), "price $5");
    }

    #[test]
    fn interpolate_rejects_unterminated_reference() {
        let err = interpolate_env("https://${HOST").unwrap_err();
        assert!(err.to_string().contains("unterminated"));
    }

    #[test]
    fn unset_variable_is_named_in_the_error() {
        let mut config = Config::default();
        config.hosting.public_url = Some("${TRIPTYCH_UNSET_URL_31337}".into());

        let err = config.site_config(HostingMode::Online).unwrap_err();
        let chain = format!("{err:#}");
        assert!(chain.contains("TRIPTYCH_UNSET_URL_31337"), "{chain}");
        assert!(!chain.contains("not configured"), "{chain}");

        // local mode never looks at the public URL
        assert!(config.site_config(HostingMode::Local).is_ok());
    }

    #[test]
    fn public_url_from_environment() {
        std::env::set_var("TRIPTYCH_TEST_PUBLIC_URL", "https://cdn.example.org/exp");
        let config: Config =
            toml::from_str("[hosting]\npublic_url = \"${TRIPTYCH_TEST_PUBLIC_URL}\"\n").unwrap();
        assert_eq!(
            config.hosting.public_url.as_deref(),
            Some("${TRIPTYCH_TEST_PUBLIC_URL}")
        );
        let site = config.site_config(HostingMode::Online).unwrap();
        assert_eq!(site.url_prefix, "https://cdn.example.org/exp/");
        std::env::remove_var("TRIPTYCH_TEST_PUBLIC_URL");
    }

    #[test]
    fn parse_config_toml() {
        let toml = r#"
[site]
root = "/srv/experiments"
pages_dir = "pages"
prune_stale = true

[hosting]
mode = "Dropbox"
public_url = "https://www.dropbox.com/scl/fo/abc/XYZ?dl=0"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.site.root, PathBuf::from("/srv/experiments"));
        assert_eq!(config.site.pages_dir, "pages");
        assert_eq!(config.site.assets_dir, "data");
        assert!(config.site.prune_stale);
        assert_eq!(config.hosting.mode, HostingMode::Online);
        assert_eq!(config.hosting.local_prefix, "./");
    }

    #[test]
    fn invalid_mode_rejected() {
        let result: Result<Config, _> = toml::from_str("[hosting]\nmode = \"ftp\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn cli_mode_overrides_config() {
        let mut config = Config::default();
        config.hosting.mode = HostingMode::Online;
        assert_eq!(config.hosting_mode(None), HostingMode::Online);
        assert_eq!(
            config.hosting_mode(Some(HostingMode::Local)),
            HostingMode::Local
        );
    }

    #[test]
    fn site_config_online_prefix() {
        let mut config = Config::default();
        config.hosting.public_url = Some("https://www.dropbox.com/scl/fo/abc/XYZ?dl=0".into());
        let site = config.site_config(HostingMode::Online).unwrap();
        assert_eq!(site.url_prefix, "https://www.dropbox.com/scl/fi/abc/XYZ/");
        let site = config.site_config(HostingMode::Local).unwrap();
        assert_eq!(site.url_prefix, "./");
    }

    #[test]
    fn online_without_url_is_an_error() {
        let config = Config::default();
        assert!(config.site_config(HostingMode::Online).is_err());
        assert!(config.site_config(HostingMode::Local).is_ok());
    }

    #[test]
    fn from_file_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("triptych.toml");
        std::fs::write(&path, "[site]\nindex_file = \"home.html\"\n").unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.site.index_file, "home.html");
    }
}
