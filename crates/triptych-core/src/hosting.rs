//! Hosting mode and image URL prefix

use std::str::FromStr;

/// How rendered pages reference their images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostingMode {
    /// Relative paths next to the generated pages
    #[default]
    Local,
    /// Absolute URLs under a shared remote folder
    Online,
}

impl FromStr for HostingMode {
    type Err = String;

    /// Accepts `online`/`dropbox`/`public` and `local`/`offline`, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "online" | "dropbox" | "public" => Ok(Self::Online),
            "local" | "offline" => Ok(Self::Local),
            _ => Err(format!(
                "unknown hosting mode '{s}' (expected online, dropbox, public, local or offline)"
            )),
        }
    }
}

impl std::fmt::Display for HostingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Online => write!(f, "online"),
        }
    }
}

/// Turn a shared-folder URL into a prefix that relative asset paths append to.
///
/// Dropbox share links are rewritten to the direct-access form
/// (`?dl=0` dropped, `/fo/` becomes `/fi/`); anything else just gets a single
/// trailing slash.
pub fn online_prefix(public_url: &str) -> String {
    if public_url.contains("dropbox.com") {
        format!("{}/", public_url.replace("?dl=0", "").replace("/fo/", "/fi/"))
    } else {
        format!("{}/", public_url.trim_end_matches('/'))
    }
}

/// Prefix prepended to every page-relative asset path.
///
/// Returns `None` in online mode when no public URL is configured.
pub fn image_url_prefix(
    mode: HostingMode,
    public_url: Option<&str>,
    local_prefix: &str,
) -> Option<String> {
    match mode {
        HostingMode::Local => Some(local_prefix.to_string()),
        HostingMode::Online => public_url
            .filter(|url| !url.trim().is_empty())
            .map(online_prefix),
    }
}
