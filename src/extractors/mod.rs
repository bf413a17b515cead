//! Selector-driven extraction of listing records from rendered HTML.
//!
//! Every extractor walks the elements matching a container selector and reads
//! a fixed set of child fields. A missing child yields `None`; a child whose
//! text cannot be read as the expected number is an error.

pub mod products;
pub mod reviews;

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

use crate::config::Target;
use crate::types::Listing;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },

    #[error("field `{field}` is not a number: {text:?}")]
    Number { field: &'static str, text: String },
}

pub fn extract(target: Target, html: &str) -> Result<Listing, ExtractError> {
    let document = Html::parse_document(html);
    let listing = match target {
        Target::Products => Listing::Products(products::extract(&document)?),
        Target::Reviews => Listing::Reviews(reviews::extract(&document)?),
    };
    tracing::debug!(listing = target.label(), records = listing.len(), "extraction finished");
    Ok(listing)
}

pub(crate) fn compile(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::Selector {
        selector: selector.to_string(),
        reason: format!("{e:?}"),
    })
}

/// Every trimmed, non-empty text node under `element`, joined without separator.
pub(crate) fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

pub(crate) fn select_text(item: ElementRef<'_>, selector: &Selector) -> Option<String> {
    item.select(selector).next().map(stripped_text)
}

pub(crate) fn select_attr(
    item: ElementRef<'_>,
    selector: &Selector,
    attr: &str,
) -> Option<String> {
    item.select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::to_string)
}

/// Parses an amount like `Rp1.299.000` into whole rupiah.
pub(crate) fn parse_rupiah(field: &'static str, text: &str) -> Result<i64, ExtractError> {
    let digits = text.replace("Rp", "").replace('.', "");
    digits.trim().parse().map_err(|_| ExtractError::Number {
        field,
        text: text.to_string(),
    })
}

/// Parses a percentage like `25%` into `25.0`.
pub(crate) fn parse_percentage(field: &'static str, text: &str) -> Result<f64, ExtractError> {
    text.replace('%', "")
        .trim()
        .parse()
        .map_err(|_| ExtractError::Number {
            field,
            text: text.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rupiah_strips_currency_and_separators() {
        assert_eq!(parse_rupiah("price", "Rp1.299.000").unwrap(), 1_299_000);
        assert_eq!(parse_rupiah("price", "Rp950").unwrap(), 950);
    }

    #[test]
    fn rupiah_rejects_unexpected_formats() {
        let err = parse_rupiah("price", "Rp1,299,000").unwrap_err();
        assert!(matches!(err, ExtractError::Number { field: "price", .. }));
        assert!(parse_rupiah("price", "").is_err());
    }

    #[test]
    fn percentage_parses_signed_values() {
        assert_eq!(parse_percentage("discount_percentage", "25%").unwrap(), 25.0);
        assert_eq!(parse_percentage("discount_percentage", "-12.5%").unwrap(), -12.5);
        assert!(parse_percentage("discount_percentage", "ten%").is_err());
    }

    #[test]
    fn stripped_text_joins_trimmed_nodes() {
        let html = Html::parse_fragment("<p>  Hello <b> big </b>\n world  </p>");
        let p = compile("p").unwrap();
        let el = html.select(&p).next().unwrap();
        assert_eq!(stripped_text(el), "Hellobigworld");
    }

    #[test]
    fn invalid_selector_is_reported() {
        let err = compile("div..broken").unwrap_err();
        assert!(matches!(err, ExtractError::Selector { .. }));
    }
}
