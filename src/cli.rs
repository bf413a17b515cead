use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{self, Config, OutputFormat, Target};

#[derive(Parser, Debug)]
#[command(name = "storefront-scrape")]
#[command(
    version,
    about = "Render a storefront page in headless Chrome and extract its listing",
    long_about = r#"
storefront-scrape - rendered storefront listing extractor

Launches Chrome/Chromium with a throwaway profile, loads the storefront page,
scrolls it to pull in lazy-loaded entries and parses the rendered HTML.

Targets:
  • products: name, price, original price, discount and image of each product card
  • reviews:  username, star rating and text of each review
"#
)]
pub struct Args {
    /// Listing to scrape
    #[arg(value_enum, value_name = "TARGET")]
    pub target: Target,

    /// Page URL (defaults to the target's storefront page)
    #[arg(short, long, value_name = "URL")]
    pub url: Option<String>,

    /// Show the browser window instead of running headless
    #[arg(long)]
    pub headed: bool,

    /// Maximum scroll-to-bottom iterations (0 disables scrolling)
    ///
    /// Defaults to 0 for products and 8 for reviews.
    #[arg(short = 'n', long, value_name = "NUM")]
    pub max_scrolls: Option<u32>,

    /// Seconds to wait after the page loads and after every scroll
    #[arg(short = 'p', long, default_value = "5", value_name = "SECS")]
    pub scroll_pause: f64,

    /// Directory under which the temporary browser profile is created
    #[arg(long, value_name = "DIR")]
    pub profile_root: Option<PathBuf>,

    /// Path to a Chrome/Chromium executable
    #[arg(long, value_name = "PATH")]
    pub chrome_bin: Option<PathBuf>,

    /// Timeout for page navigation in seconds
    #[arg(short, long, default_value = "60", value_name = "SECS")]
    pub timeout: u64,

    /// Output format for the listing on stdout
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Also write a JSON report to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn into_config(self) -> Result<Config> {
        let url = self
            .url
            .unwrap_or_else(|| self.target.default_url().to_string());
        validate_url(&url)?;

        let scroll_pause = match Duration::try_from_secs_f64(self.scroll_pause) {
            Ok(pause) => pause,
            Err(_) => bail!(
                "scroll pause must be a non-negative number of seconds, got {}",
                self.scroll_pause
            ),
        };

        Ok(Config {
            target: self.target,
            url,
            headless: !self.headed,
            max_scrolls: self
                .max_scrolls
                .unwrap_or_else(|| self.target.default_max_scrolls()),
            scroll_pause,
            profile_root: self
                .profile_root
                .map(config::expand_home)
                .unwrap_or_else(config::default_profile_root),
            chrome_bin: self.chrome_bin,
            timeout: self.timeout.max(1),
            format: self.format,
            output: self.output,
            verbose: self.verbose,
        })
    }
}

fn validate_url(raw: &str) -> Result<()> {
    let parsed = match url::Url::parse(raw) {
        Ok(u) => u,
        Err(e) => bail!("invalid URL {raw:?}: {e}"),
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("unsupported URL scheme {:?} (expected http or https)", parsed.scheme());
    }
    Ok(())
}

pub fn parse() -> Result<Config> {
    Args::parse().into_config()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(argv: &[&str]) -> Result<Config> {
        let mut full = vec!["storefront-scrape"];
        full.extend_from_slice(argv);
        Args::try_parse_from(full)?.into_config()
    }

    #[test]
    fn reviews_defaults() {
        let config = config_from(&["reviews"]).unwrap();
        assert_eq!(config.target, Target::Reviews);
        assert_eq!(config.url, Target::Reviews.default_url());
        assert!(config.headless);
        assert_eq!(config.max_scrolls, 8);
        assert_eq!(config.scroll_pause, Duration::from_secs(5));
        assert_eq!(config.format, OutputFormat::Text);
        assert!(config.profile_root.ends_with("selenium_tmp"));
    }

    #[test]
    fn products_skip_scrolling_by_default() {
        let config = config_from(&["products"]).unwrap();
        assert_eq!(config.max_scrolls, 0);

        let config = config_from(&["products", "--max-scrolls", "3"]).unwrap();
        assert_eq!(config.max_scrolls, 3);
    }

    #[test]
    fn overrides_are_applied() {
        let config = config_from(&[
            "reviews",
            "--url",
            "http://localhost:8080/review",
            "--headed",
            "-p",
            "0.5",
            "--format",
            "json",
            "--timeout",
            "0",
        ])
        .unwrap();
        assert_eq!(config.url, "http://localhost:8080/review");
        assert!(!config.headless);
        assert_eq!(config.scroll_pause, Duration::from_millis(500));
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.timeout, 1);
    }

    #[test]
    fn rejects_bad_urls() {
        assert!(config_from(&["reviews", "--url", "not a url"]).is_err());
        assert!(config_from(&["reviews", "--url", "ftp://example.com/x"]).is_err());
    }

    #[test]
    fn rejects_negative_pause() {
        assert!(config_from(&["reviews", "--scroll-pause=-1"]).is_err());
    }

    #[test]
    fn rejects_oversized_pause() {
        let err = config_from(&["reviews", "--scroll-pause", "1e300"]).unwrap_err();
        assert!(err.to_string().contains("scroll pause"));
        assert!(config_from(&["reviews", "--scroll-pause", "inf"]).is_err());
    }
}
