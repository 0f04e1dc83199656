use chrono::NaiveDate;
use futures::future::join_all;
use reqwest::Url;
use scraper::Html;
use tracing::{debug, warn};

pub mod config;
pub mod fetch;
pub mod menu;
pub mod sites;

mod data;
mod error;
mod extract;
mod utils;

pub use config::{FetchStrategy, SiteConfig};
pub use data::{CategoryRecord, ListingRecord, RatingScale};
pub use error::ScrapeError;
pub use extract::{CategoryExtractor, ListingExtractor};
pub use menu::Menu;
pub use utils::PriceStyle;

use config::{CategorySource, ListingSource};

pub struct PageRequest<'a> {
    pub url: &'a Url,
    pub strategy: FetchStrategy,
    /// Selector to wait for before reading a rendered page.
    pub wait_for: Option<&'a str>,
}

#[async_trait::async_trait]
pub trait PageSource {
    async fn fetch(&self, request: &PageRequest<'_>) -> Result<String, ScrapeError>;
}

/// Records of one page, with the page they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<T> {
    pub page: Url,
    pub records: Vec<T>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scraped {
    pub listings: Option<Section<ListingRecord>>,
    pub categories: Option<Section<CategoryRecord>>,
}

/// Fetches and extracts both phases of a site. They run concurrently but
/// nothing is emitted until both are done.
pub async fn scrape<S>(site: &SiteConfig, source: &S, today: NaiveDate) -> Result<Scraped, ScrapeError>
where
    S: PageSource + Sync,
{
    let listings = async {
        match &site.listings {
            Some(listings) => scrape_listings(listings, source, today).await.map(Some),
            None => Ok(None),
        }
    };
    let categories = async {
        match &site.categories {
            Some(categories) => scrape_categories(categories, source, today).await.map(Some),
            None => Ok(None),
        }
    };

    let (listings, categories) = futures::try_join!(listings, categories)?;
    Ok(Scraped {
        listings,
        categories,
    })
}

/// One full run: scrape, then lay the result out as a menu.
pub async fn run<S>(site: &SiteConfig, source: &S, today: NaiveDate) -> Result<Menu, ScrapeError>
where
    S: PageSource + Sync,
{
    let scraped = scrape(site, source, today).await?;
    Ok(Menu::for_site(site, &scraped))
}

async fn scrape_listings<S>(
    config: &ListingSource,
    source: &S,
    today: NaiveDate,
) -> Result<Section<ListingRecord>, ScrapeError>
where
    S: PageSource + Sync,
{
    let extractor = ListingExtractor::new(&config.extract)?;
    let page = config::expand_url(&config.url, today)?;

    let html = source
        .fetch(&PageRequest {
            url: &page,
            strategy: config.fetch,
            wait_for: config.wait_for.as_deref(),
        })
        .await?;

    let mut records = {
        let doc = Html::parse_document(&html);
        extractor.extract(&doc, &page)
    };
    menu::apply_sort(&mut records, config.layout.sort);

    Ok(Section { page, records })
}

async fn scrape_categories<S>(
    config: &CategorySource,
    source: &S,
    today: NaiveDate,
) -> Result<Section<CategoryRecord>, ScrapeError>
where
    S: PageSource + Sync,
{
    let extractor = CategoryExtractor::new(config)?;
    let page = config::expand_url(&config.url, today)?;

    let html = source
        .fetch(&PageRequest {
            url: &page,
            strategy: config.fetch,
            wait_for: config.wait_for.as_deref(),
        })
        .await?;

    let mut records = {
        let doc = Html::parse_document(&html);
        extractor.extract(&doc, &page)
    };

    if let (Some(items), Some(layout)) = (extractor.items(), config.items.as_ref().map(|i| &i.layout)) {
        let pages = join_all(records.iter().map(|category| async move {
            source
                .fetch(&PageRequest {
                    url: &category.link,
                    strategy: config.fetch,
                    wait_for: None,
                })
                .await
        }))
        .await;

        for (category, html) in records.iter_mut().zip(pages) {
            match html {
                Ok(html) => {
                    let mut found = {
                        let doc = Html::parse_document(&html);
                        items.extract(&doc, &category.link)
                    };
                    menu::apply_sort(&mut found, layout.sort);
                    debug!("{} items in category {}", found.len(), category.name);
                    category.items = found;
                }
                Err(e) => warn!("Drop items of category {}: {}", category.name, e),
            }
        }
    }

    Ok(Section { page, records })
}
