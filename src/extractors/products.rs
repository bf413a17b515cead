use scraper::Html;

use super::{compile, parse_percentage, parse_rupiah, select_attr, select_text, ExtractError};
use crate::types::Product;

const CARD: &str = ".css-79elbk";
const IMAGE: &str = r"img.wSt-NCwsL186UdS6D-IpAg\=\=";
const DISCOUNT: &str = r"span._7UCYdN8MrOTwg0MKcGu8zg\=\=";
const NAME: &str = r"div.SzILjt4fxHUFNVT48ZPhHA\=\= span.\+tnoqZhn89\+NHUA43BpiJg\=\=";
const PRICE: &str = r"div.urMOIDHH7I0Iy1Dv2oFaNw\=\=";
const ORIGINAL_PRICE: &str = r"div.e48Kml5BRW9dq8Mopwgv7w\=\= span.hC1B8wTAoPszbEZj80w6Qw\=\=";

pub fn extract(document: &Html) -> Result<Vec<Product>, ExtractError> {
    let card = compile(CARD)?;
    let image = compile(IMAGE)?;
    let discount = compile(DISCOUNT)?;
    let name = compile(NAME)?;
    let price = compile(PRICE)?;
    let original_price = compile(ORIGINAL_PRICE)?;

    let mut products = Vec::new();
    for item in document.select(&card) {
        products.push(Product {
            image: select_attr(item, &image, "src"),
            name: select_text(item, &name),
            price: select_text(item, &price)
                .map(|t| parse_rupiah("price", &t))
                .transpose()?,
            original_price: select_text(item, &original_price)
                .map(|t| parse_rupiah("original_price", &t))
                .transpose()?,
            discount_percentage: select_text(item, &discount)
                .map(|t| parse_percentage("discount_percentage", &t))
                .transpose()?,
        });
    }
    Ok(products)
}
