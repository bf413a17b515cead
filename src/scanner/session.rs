use anyhow::{anyhow, bail, Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tokio::time;

const WINDOW_WIDTH: u32 = 1920;
const WINDOW_HEIGHT: u32 = 1080;

/// A running browser bound to a throwaway profile directory.
pub struct Session {
    browser: Browser,
    handler: JoinHandle<()>,
    profile: TempDir,
}

impl Session {
    pub async fn launch(chrome_binary: PathBuf, profile: TempDir, headless: bool) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .chrome_executable(chrome_binary)
            .user_data_dir(profile.path())
            .window_size(WINDOW_WIDTH, WINDOW_HEIGHT)
            .args(launch_args())
            .envs(browser_env(profile.path()));
        if !headless {
            builder = builder.with_head();
        }
        let browser_config = builder
            .build()
            .map_err(|e| anyhow!("Failed to build browser config: {}", e))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .context("Failed to launch browser")?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::trace!("cdp handler error: {}", e);
                }
            }
        });

        tracing::debug!(profile = %profile.path().display(), headless, "browser launched");

        Ok(Self {
            browser,
            handler,
            profile,
        })
    }

    /// Opens `url` in a new tab, giving up after `timeout_secs`.
    pub async fn open(&self, url: &str, timeout_secs: u64) -> Result<Page> {
        match time::timeout(Duration::from_secs(timeout_secs), self.browser.new_page(url)).await {
            Err(_) => bail!("Page navigation timeout after {}s", timeout_secs),
            Ok(Err(e)) => Err(anyhow!("Failed to create page: {}", e)),
            Ok(Ok(page)) => Ok(page),
        }
    }

    /// Shuts the browser down and removes the profile directory.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::warn!("browser close failed: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            tracing::warn!("waiting for browser exit failed: {}", e);
        }
        self.handler.abort();

        let path = self.profile.path().to_path_buf();
        if let Err(e) = self.profile.close() {
            tracing::warn!(profile = %path.display(), "could not remove profile dir: {}", e);
        }
    }
}

/// Keeps the browser's scratch files next to its profile, under the profile root.
fn browser_env(profile: &Path) -> Vec<(String, String)> {
    let scratch = profile.parent().unwrap_or(profile);
    vec![("TMPDIR".to_string(), scratch.display().to_string())]
}

fn launch_args() -> Vec<&'static str> {
    vec![
        "--disable-gpu",
        "--no-sandbox",
        "--disable-dev-shm-usage",
        "--no-first-run",
        "--disable-extensions",
        "--disable-sync",
    ]
}

/// Finds a Chrome/Chromium executable: the explicit path, then `CHROME_BIN` /
/// `CHROMIUM_BIN`, then the usual binary names on `PATH`, then `/usr/bin` and
/// snap installs.
pub fn resolve_chrome_binary(override_path: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        if path.is_file() {
            return Ok(path);
        }
        bail!(
            "Chrome/Chromium binary not found at provided path: {}",
            path.display()
        );
    }

    let from_env = ["CHROME_BIN", "CHROMIUM_BIN"]
        .into_iter()
        .filter_map(|key| env::var_os(key).map(PathBuf::from));
    let search_dirs: Vec<PathBuf> = env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).collect())
        .unwrap_or_default();
    let on_path = search_dirs
        .iter()
        .flat_map(|dir| BINARY_NAMES.iter().map(move |name| dir.join(name)));
    let installed = INSTALL_LOCATIONS.iter().map(PathBuf::from);

    from_env
        .chain(on_path)
        .chain(installed)
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| {
            anyhow!(
                "Could not locate Chrome/Chromium. Set --chrome-bin or CHROME_BIN (tried {} on PATH)",
                BINARY_NAMES.join(", ")
            )
        })
}

const BINARY_NAMES: [&str; 4] = [
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
];

const INSTALL_LOCATIONS: [&str; 3] = [
    "/usr/bin/google-chrome",
    "/usr/bin/chromium",
    "/snap/bin/chromium",
];
