use lazy_static::lazy_static;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SHRUG: &str = "🤷🏽‍♂️";

/// A single scraped item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRecord {
    pub title: String,
    pub price: Option<String>,
    pub discount: Option<u32>,
    pub link: Option<Url>,
    pub rating: Option<String>,
    pub description: Option<String>,
    pub tag: Option<String>,
}

impl ListingRecord {
    pub fn titled<T: Into<String>>(title: T) -> Self {
        ListingRecord {
            title: title.into(),
            price: None,
            discount: None,
            link: None,
            rating: None,
            description: None,
            tag: None,
        }
    }
}

/// A page-level grouping link, optionally carrying the sale items found on
/// the category page itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRecord {
    pub name: String,
    pub link: Url,
    pub items: Vec<ListingRecord>,
}

lazy_static! {
    static ref STEAM_REVIEWS: BTreeMap<String, String> = [
        ("Overwhelmingly Positive", "⭐⭐⭐⭐"),
        ("Very Positive", "⭐⭐⭐"),
        ("Positive", "⭐⭐"),
        ("Mostly Positive", "⭐"),
        ("Mixed", "❓"),
        ("Mostly Negative", "👎🏾"),
        ("Negative", "👎🏾👎🏾"),
        ("Very Negative", "👎🏾👎🏾👎🏾"),
        ("Overwhelmingly Negative", "👎🏾👎🏾👎🏾👎🏾"),
        ("", "⭐"),
    ]
    .into_iter()
    .map(|(label, glyph)| (label.to_string(), glyph.to_string()))
    .collect();
}

/// Maps a review label to a glyph string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingScale(BTreeMap<String, String>);

impl Default for RatingScale {
    fn default() -> Self {
        RatingScale(STEAM_REVIEWS.clone())
    }
}

impl RatingScale {
    pub fn new(table: BTreeMap<String, String>) -> Self {
        RatingScale(table)
    }

    /// Unmapped and absent labels fall back to a shrug.
    pub fn glyph(&self, rating: Option<&str>) -> &str {
        rating
            .and_then(|r| self.0.get(r.trim()))
            .map(String::as_str)
            .unwrap_or(SHRUG)
    }
}
