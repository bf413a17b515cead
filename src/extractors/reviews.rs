use scraper::Html;

use super::{compile, select_attr, select_text, ExtractError};
use crate::types::Review;

const CARD: &str = ".css-1pr2lii";
const USERNAME: &str = "div.css-k4rf3m span.name";
const RATING: &str = "div.css-1w6pe1p div.rating";
const TEXT: &str = "p.css-34x6j7-unf-heading span";

pub fn extract(document: &Html) -> Result<Vec<Review>, ExtractError> {
    let card = compile(CARD)?;
    let username = compile(USERNAME)?;
    let rating = compile(RATING)?;
    let text = compile(TEXT)?;

    Ok(document
        .select(&card)
        .map(|item| Review {
            username: select_text(item, &username),
            review: select_text(item, &text),
            rating: select_attr(item, &rating, "aria-label"),
        })
        .collect())
}
