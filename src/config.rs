use clap::ValueEnum;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Which storefront listing a run scrapes.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Products,
    Reviews,
}

impl Target {
    pub fn default_url(self) -> &'static str {
        match self {
            Target::Products => "https://www.tokopedia.com/msi-official-store/product",
            Target::Reviews => "https://www.tokopedia.com/msi-official-store/review",
        }
    }

    /// The product page renders its grid without lazy loading, so it skips the
    /// scroll loop unless asked for one.
    pub fn default_max_scrolls(self) -> u32 {
        match self {
            Target::Products => 0,
            Target::Reviews => 8,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Target::Products => "products",
            Target::Reviews => "reviews",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub target: Target,
    pub url: String,
    pub headless: bool,
    pub max_scrolls: u32,
    pub scroll_pause: Duration,
    pub profile_root: PathBuf,
    pub chrome_bin: Option<PathBuf>,
    pub timeout: u64,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub verbose: bool,
}

pub fn default_profile_root() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join("selenium_tmp"))
        .unwrap_or_else(|| std::env::temp_dir().join("selenium_tmp"))
}

/// Expands a leading `~` the way a shell would.
pub fn expand_home(path: PathBuf) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path;
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_defaults_follow_listing() {
        assert!(Target::Products.default_url().ends_with("/product"));
        assert!(Target::Reviews.default_url().ends_with("/review"));
        assert_eq!(Target::Products.default_max_scrolls(), 0);
        assert_eq!(Target::Reviews.default_max_scrolls(), 8);
    }

    #[test]
    fn expand_home_leaves_plain_paths_alone() {
        let path = PathBuf::from("/tmp/profiles");
        assert_eq!(expand_home(path.clone()), path);
    }

    #[test]
    fn expand_home_replaces_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home(PathBuf::from("~/x")), home.join("x"));
        }
    }
}
