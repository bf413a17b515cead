use anyhow::{Context, Result};
use chromiumoxide::Page;
use std::time::Duration;
use tokio::time;

const HEIGHT_SCRIPT: &str = "document.body.scrollHeight";
const SCROLL_SCRIPT: &str = "window.scrollTo(0, document.body.scrollHeight)";

/// The page operations the scroll loop needs.
pub trait Scrollable {
    async fn document_height(&self) -> Result<i64>;
    async fn scroll_to_bottom(&self) -> Result<()>;
}

impl Scrollable for Page {
    async fn document_height(&self) -> Result<i64> {
        let height: f64 = self
            .evaluate(HEIGHT_SCRIPT)
            .await
            .context("Failed to read document height")?
            .into_value()
            .context("Document height was not a number")?;
        Ok(height as i64)
    }

    async fn scroll_to_bottom(&self) -> Result<()> {
        self.evaluate(SCROLL_SCRIPT)
            .await
            .context("Failed to scroll page")?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollOutcome {
    pub scrolls: u32,
    pub height: Option<i64>,
}

/// Scrolls to the bottom up to `max_scrolls` times, pausing after each step,
/// and stops as soon as the document height stops growing.
pub async fn scroll_until_stable<P: Scrollable>(
    page: &P,
    max_scrolls: u32,
    pause: Duration,
) -> Result<ScrollOutcome> {
    if max_scrolls == 0 {
        return Ok(ScrollOutcome {
            scrolls: 0,
            height: None,
        });
    }

    let mut last_height = page.document_height().await?;
    let mut scrolls = 0;

    while scrolls < max_scrolls {
        page.scroll_to_bottom().await?;
        scrolls += 1;
        time::sleep(pause).await;

        let new_height = page.document_height().await?;
        tracing::debug!(scroll = scrolls, last_height, new_height, "scrolled");
        if new_height == last_height {
            break;
        }
        last_height = new_height;
    }

    Ok(ScrollOutcome {
        scrolls,
        height: Some(last_height),
    })
}
