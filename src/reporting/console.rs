use std::fmt::{self, Display, Write};

use crate::types::{Listing, Product, Review};

fn or_none<T: Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "None".to_string(),
    }
}

fn product_entry(out: &mut String, index: usize, product: &Product) -> fmt::Result {
    let discount = match product.discount_percentage {
        Some(d) => format!("{d:?}"),
        None => "None".to_string(),
    };
    writeln!(
        out,
        "{index}. {} — {} IDR",
        or_none(&product.name),
        or_none(&product.price)
    )?;
    writeln!(
        out,
        "   Original Price: {} IDR, Discount: {discount}%",
        or_none(&product.original_price)
    )?;
    writeln!(out, "   Image URL: {}\n", or_none(&product.image))
}

fn review_entry(out: &mut String, index: usize, review: &Review) -> fmt::Result {
    writeln!(
        out,
        "{index}. {} — {}",
        or_none(&review.username),
        or_none(&review.rating)
    )?;
    writeln!(out, "   {}\n", or_none(&review.review))
}

/// Numbered, human-readable listing, one blank-line separated block per record.
pub fn render(listing: &Listing) -> Result<String, fmt::Error> {
    let mut out = String::new();
    match listing {
        Listing::Products(products) => {
            for (i, product) in products.iter().enumerate() {
                product_entry(&mut out, i + 1, product)?;
            }
        }
        Listing::Reviews(reviews) => {
            for (i, review) in reviews.iter().enumerate() {
                review_entry(&mut out, i + 1, review)?;
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_products() {
        let listing = Listing::Products(vec![
            Product {
                image: Some("https://img/1.jpg".into()),
                name: Some("MSI Modern 14".into()),
                price: Some(8_999_000),
                original_price: Some(10_999_000),
                discount_percentage: Some(18.0),
            },
            Product {
                image: None,
                name: Some("MSI Mouse".into()),
                price: Some(250_000),
                original_price: None,
                discount_percentage: None,
            },
        ]);

        let expected = "\
1. MSI Modern 14 — 8999000 IDR
   Original Price: 10999000 IDR, Discount: 18.0%
   Image URL: https://img/1.jpg

2. MSI Mouse — 250000 IDR
   Original Price: None IDR, Discount: None%
   Image URL: None

";
        assert_eq!(render(&listing).unwrap(), expected);
    }

    #[test]
    fn renders_reviews() {
        let listing = Listing::Reviews(vec![Review {
            username: Some("Budi".into()),
            review: None,
            rating: Some("bintang 5".into()),
        }]);
        assert_eq!(render(&listing).unwrap(), "1. Budi — bintang 5\n   None\n\n");
    }

    #[test]
    fn empty_listing_renders_nothing() {
        assert!(render(&Listing::Reviews(vec![])).unwrap().is_empty());
    }
}
