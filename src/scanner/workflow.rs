use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::time;

use crate::config::{Config, OutputFormat, Target};
use crate::extractors;
use crate::reporting::{console, json as json_report};
use crate::scanner::page_utils::{self, ScrollOutcome};
use crate::scanner::profile;
use crate::scanner::session::{self, Session};
use crate::types::ScrapeReport;

struct Capture {
    html: String,
    scroll: ScrollOutcome,
}

pub async fn run(config: Config) -> Result<()> {
    let Config {
        target,
        url,
        headless,
        max_scrolls,
        scroll_pause,
        profile_root,
        chrome_bin,
        timeout,
        format,
        output,
        verbose: _,
    } = config;

    let chrome_binary = session::resolve_chrome_binary(chrome_bin)?;
    eprintln!(
        "{} Using Chrome binary: {}",
        "[*]".cyan(),
        chrome_binary.display()
    );

    let profile = profile::create(&profile_root)?;
    eprintln!("{} Profile dir: {}", "[*]".cyan(), profile.path().display());

    eprintln!(
        "{} Loading {} {}...",
        "[*]".cyan().bold(),
        target.label(),
        url
    );

    let start = Instant::now();
    let session = Session::launch(chrome_binary, profile, headless).await?;
    let captured = capture(&session, &url, timeout, max_scrolls, scroll_pause).await;
    session.close().await;
    let Capture { html, scroll } = captured?;

    eprintln!(
        "{} Page captured ({} bytes, {} scrolls, {:.2}s), parsing {}...",
        "[*]".cyan(),
        html.len(),
        scroll.scrolls,
        start.elapsed().as_secs_f64(),
        target.label()
    );

    let report = build_report(target, url, &html, scroll)?;
    let stdout = render_output(&report, format, output.as_deref())?;
    if let Some(path) = &output {
        eprintln!("{} Report saved to: {}", "[*]".cyan(), path.display());
    }
    print!("{stdout}");

    if report.listing.is_empty() {
        eprintln!(
            "{} No {} found on {}",
            "[!]".yellow().bold(),
            target.label(),
            report.url
        );
    } else {
        eprintln!(
            "{} Scraping completed: {} {}",
            "[✓]".green().bold(),
            report.count.to_string().bold(),
            target.label()
        );
    }

    Ok(())
}

fn build_report(
    target: Target,
    url: String,
    html: &str,
    scroll: ScrollOutcome,
) -> Result<ScrapeReport> {
    let listing = extractors::extract(target, html)
        .with_context(|| format!("Failed to extract {} from {}", target.label(), url))?;

    Ok(ScrapeReport {
        target,
        url,
        timestamp: Utc::now().to_rfc3339(),
        page_bytes: html.len(),
        scrolls: scroll.scrolls,
        count: listing.len(),
        listing,
    })
}

/// Writes the JSON report to `output` when given, whatever the stdout format,
/// and returns what belongs on stdout.
fn render_output(
    report: &ScrapeReport,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<String> {
    if let Some(path) = output {
        json_report::write(path, report)?;
    }

    Ok(match format {
        OutputFormat::Text => console::render(&report.listing)?,
        OutputFormat::Json => format!("{}\n", json_report::to_string(report)?),
    })
}

async fn capture(
    session: &Session,
    url: &str,
    timeout: u64,
    max_scrolls: u32,
    pause: Duration,
) -> Result<Capture> {
    let page = session.open(url, timeout).await?;

    // initial render
    time::sleep(pause).await;

    let scroll = page_utils::scroll_until_stable(&page, max_scrolls, pause).await?;
    tracing::info!(scrolls = scroll.scrolls, height = ?scroll.height, "scrolling finished");

    let html = page.content().await.context("Failed to get page content")?;
    Ok(Capture { html, scroll })
}
