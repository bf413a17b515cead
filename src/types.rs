use serde::Serialize;

use crate::config::Target;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Product {
    pub image: Option<String>,
    pub name: Option<String>,
    pub price: Option<i64>,
    pub original_price: Option<i64>,
    pub discount_percentage: Option<f64>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Review {
    pub username: Option<String>,
    pub review: Option<String>,
    pub rating: Option<String>,
}

/// Records extracted from one page, in document order.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Listing {
    Products(Vec<Product>),
    Reviews(Vec<Review>),
}

impl Listing {
    pub fn len(&self) -> usize {
        match self {
            Listing::Products(items) => items.len(),
            Listing::Reviews(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct ScrapeReport {
    pub target: Target,
    pub url: String,
    pub timestamp: String,
    pub page_bytes: usize,
    pub scrolls: u32,
    pub count: usize,
    #[serde(flatten)]
    pub listing: Listing,
}
