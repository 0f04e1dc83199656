use crate::{data::RatingScale, utils::PriceStyle, ScrapeError};
use chrono::{Datelike, NaiveDate};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_PRICE_FALLBACK: &str = "🔑";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchStrategy {
    /// Plain GET of server-rendered HTML.
    #[default]
    Static,
    /// Headless browser navigation, for pages built by scripts.
    Rendered,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Document,
    DiscountDesc,
}

/// Where a field's value comes from, relative to the element being read.
///
/// No `selector` means the element itself. No `attr` means its text content.
/// With `all`, every match is read and the values are joined with `, `.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSelector {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attr: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub all: bool,
}

impl FieldSelector {
    pub fn text(selector: &str) -> Self {
        FieldSelector {
            selector: Some(selector.to_string()),
            attr: None,
            all: false,
        }
    }

    pub fn attr(selector: &str, attr: &str) -> Self {
        FieldSelector {
            selector: Some(selector.to_string()),
            attr: Some(attr.to_string()),
            all: false,
        }
    }

    pub fn own_attr(attr: &str) -> Self {
        FieldSelector {
            selector: None,
            attr: Some(attr.to_string()),
            all: false,
        }
    }

    pub fn href(selector: &str) -> Self {
        Self::attr(selector, "href")
    }

    pub fn every(self) -> Self {
        FieldSelector { all: true, ..self }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingFields {
    pub title: FieldSelector,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<FieldSelector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<FieldSelector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<FieldSelector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<FieldSelector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<FieldSelector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<FieldSelector>,
}

/// Used when the item selector matches nothing. `fields` are read from the
/// whole document; when they are absent or find no title, a single record
/// titled `fallback_title` is produced instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<ListingFields>,
    pub fallback_title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemExtraction {
    pub item: String,
    pub fields: ListingFields,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_state: Option<EmptyState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    /// Drop repeats of the same title and link.
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub price_style: PriceStyle,
}

fn default_price_fallback() -> String {
    DEFAULT_PRICE_FALLBACK.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default)]
    pub sort: SortOrder,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_max: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
    #[serde(default = "default_price_fallback")]
    pub price_fallback: String,
    #[serde(default)]
    pub rating_scale: RatingScale,
    /// Show the full title as tooltip when there is no description.
    #[serde(default)]
    pub title_tooltip: bool,
    /// Tooltip for records with a description, e.g. `{title} - {description}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip_format: Option<String>,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            sort: SortOrder::default(),
            title_max: None,
            length: None,
            price_fallback: default_price_fallback(),
            rating_scale: RatingScale::default(),
            title_tooltip: false,
            tooltip_format: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingSource {
    /// May contain `{day}` and `{month}` placeholders.
    pub url: String,
    #[serde(default)]
    pub fetch: FetchStrategy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_for: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(flatten)]
    pub extract: ItemExtraction,
    #[serde(flatten)]
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryItems {
    #[serde(flatten)]
    pub extract: ItemExtraction,
    #[serde(flatten)]
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySource {
    pub url: String,
    #[serde(default)]
    pub fetch: FetchStrategy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_for: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    pub item: String,
    pub name: FieldSelector,
    pub link: FieldSelector,
    /// Regex whose first group is the category name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_pattern: Option<String>,
    /// Matched case-insensitively against the whole name.
    #[serde(default)]
    pub deny: Vec<String>,
    /// Sale items of each category page, shown as sub-items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<CategoryItems>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub name: String,
    /// Status-bar label, everything before the first separator.
    pub glyph: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listings: Option<ListingSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<CategorySource>,
    /// Append a `Refresh | refresh=true` footer.
    #[serde(default)]
    pub refresh: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(Box<SiteConfig>),
    Many(Vec<SiteConfig>),
}

/// Reads a JSON file holding either one site config or an array of them.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<SiteConfig>, ScrapeError> {
    let raw = std::fs::read_to_string(path.as_ref())?;
    parse(&raw)
}

pub fn parse(raw: &str) -> Result<Vec<SiteConfig>, ScrapeError> {
    Ok(match serde_json::from_str(raw)? {
        OneOrMany::One(site) => vec![*site],
        OneOrMany::Many(sites) => sites,
    })
}

/// Fills `{day}` and `{month}` from `date`, e.g. `DealoftheDay{day}{month}`
/// becomes `DealoftheDay16October`.
pub fn expand_url(template: &str, date: NaiveDate) -> Result<Url, ScrapeError> {
    let expanded = template
        .replace("{day}", &date.day().to_string())
        .replace("{month}", &date.format("%B").to_string());
    Url::parse(&expanded).map_err(|e| ScrapeError::InvalidUrl {
        url: expanded,
        reason: e.to_string(),
    })
}
