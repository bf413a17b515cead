use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::types::ScrapeReport;

pub fn to_string(report: &ScrapeReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn write(path: &Path, report: &ScrapeReport) -> Result<()> {
    let contents = to_string(report)?;
    fs::write(path, contents)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Target;
    use crate::types::{Listing, Review};
    use serde_json::Value;

    fn report() -> ScrapeReport {
        ScrapeReport {
            target: Target::Reviews,
            url: Target::Reviews.default_url().to_string(),
            timestamp: "2026-01-01T00:00:00+00:00".to_string(),
            page_bytes: 1234,
            scrolls: 2,
            count: 1,
            listing: Listing::Reviews(vec![Review {
                username: Some("Budi".into()),
                review: Some("Mantap".into()),
                rating: None,
            }]),
        }
    }

    #[test]
    fn listing_is_keyed_by_target() {
        let value: Value = serde_json::from_str(&to_string(&report()).unwrap()).unwrap();
        assert_eq!(value["target"], "reviews");
        assert_eq!(value["count"], 1);
        assert_eq!(value["reviews"][0]["username"], "Budi");
        assert!(value["reviews"][0]["rating"].is_null());
        assert!(value.get("products").is_none());
    }

    #[test]
    fn writes_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        write(&path, &report()).unwrap();

        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["page_bytes"], 1234);
    }
}
