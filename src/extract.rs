use crate::{
    config::{CategorySource, FieldSelector, ItemExtraction, ListingFields},
    data::{CategoryRecord, ListingRecord},
    utils::{self, PriceStyle},
    ScrapeError,
};
use itertools::Itertools;
use lazy_regex::Regex;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};

pub(crate) fn compile(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|e| ScrapeError::InvalidSelector {
        selector: selector.to_string(),
        reason: format!("{:?}", e),
    })
}

#[derive(Debug)]
struct Field {
    selector: Option<Selector>,
    attr: Option<String>,
    all: bool,
}

impl Field {
    fn compile(field: &FieldSelector) -> Result<Self, ScrapeError> {
        Ok(Field {
            selector: field.selector.as_deref().map(compile).transpose()?,
            attr: field.attr.clone(),
            all: field.all,
        })
    }

    fn compile_opt(field: Option<&FieldSelector>) -> Result<Option<Self>, ScrapeError> {
        field.map(Field::compile).transpose()
    }

    /// Single-line value, or `None` when the sub-selector or attribute misses.
    fn read(&self, el: ElementRef) -> Option<String> {
        match (&self.selector, self.all) {
            (Some(selector), true) => {
                let values = el
                    .select(selector)
                    .filter_map(|target| self.value(target))
                    .filter(|v| !v.is_empty())
                    .join(", ");
                Some(values).filter(|v| !v.is_empty())
            }
            (Some(selector), false) => self.value(el.select(selector).next()?),
            (None, _) => self.value(el),
        }
    }

    fn value(&self, target: ElementRef) -> Option<String> {
        let raw = match &self.attr {
            Some(attr) => target.value().attr(attr)?.to_string(),
            None => target.text().collect::<String>(),
        };
        Some(utils::collapse_whitespace(&raw))
    }
}

#[derive(Debug)]
struct Fields {
    title: Field,
    price: Option<Field>,
    discount: Option<Field>,
    link: Option<Field>,
    rating: Option<Field>,
    description: Option<Field>,
    tag: Option<Field>,
}

impl Fields {
    fn compile(fields: &ListingFields) -> Result<Self, ScrapeError> {
        Ok(Fields {
            title: Field::compile(&fields.title)?,
            price: Field::compile_opt(fields.price.as_ref())?,
            discount: Field::compile_opt(fields.discount.as_ref())?,
            link: Field::compile_opt(fields.link.as_ref())?,
            rating: Field::compile_opt(fields.rating.as_ref())?,
            description: Field::compile_opt(fields.description.as_ref())?,
            tag: Field::compile_opt(fields.tag.as_ref())?,
        })
    }

    fn title(&self, el: ElementRef) -> Option<String> {
        self.title.read(el).filter(|t| !t.is_empty())
    }

    fn record(&self, el: ElementRef, page: &Url, style: PriceStyle, title: String) -> ListingRecord {
        let read = |field: &Option<Field>| field.as_ref().and_then(|f| f.read(el));

        ListingRecord {
            title,
            price: read(&self.price).and_then(|raw| utils::extract_price(&raw, style)),
            discount: read(&self.discount).and_then(|raw| utils::extract_percent(&raw)),
            link: read(&self.link).and_then(|href| utils::resolve_link(page, &href)),
            rating: read(&self.rating),
            description: read(&self.description)
                .map(|d| utils::clean_description(&d))
                .filter(|d| !d.is_empty()),
            tag: read(&self.tag).filter(|t| !t.is_empty()),
        }
    }
}

#[derive(Debug)]
struct EmptyState {
    fields: Option<Fields>,
    fallback_title: String,
}

/// Turns repeated item elements into listing records.
#[derive(Debug)]
pub struct ListingExtractor {
    item: Selector,
    fields: Fields,
    empty_state: Option<EmptyState>,
    limit: Option<usize>,
    unique: bool,
    price_style: PriceStyle,
}

impl ListingExtractor {
    pub fn new(config: &ItemExtraction) -> Result<Self, ScrapeError> {
        let empty_state = match &config.empty_state {
            Some(empty) => Some(EmptyState {
                fields: empty.fields.as_ref().map(Fields::compile).transpose()?,
                fallback_title: empty.fallback_title.clone(),
            }),
            None => None,
        };

        Ok(ListingExtractor {
            item: compile(&config.item)?,
            fields: Fields::compile(&config.fields)?,
            empty_state,
            limit: config.limit,
            unique: config.unique,
            price_style: config.price_style,
        })
    }

    pub fn extract(&self, doc: &Html, page: &Url) -> Vec<ListingRecord> {
        let mut records = vec![];
        let mut matched = 0;
        for el in doc.select(&self.item) {
            matched += 1;
            match self.fields.title(el) {
                Some(title) => records.push(self.fields.record(el, page, self.price_style, title)),
                None => warn!("Skip item {} without a title on {}", matched, page),
            }
        }

        if self.unique {
            records = records
                .into_iter()
                .unique_by(|r| (r.title.clone(), r.link.clone()))
                .collect();
        }
        if let Some(limit) = self.limit {
            records.truncate(limit);
        }

        if records.is_empty() {
            debug!("{} items matched on {}, no records", matched, page);
            return self.empty_state(doc, page).into_iter().collect();
        }

        info!("{} records from {}", records.len(), page);
        records
    }

    fn empty_state(&self, doc: &Html, page: &Url) -> Option<ListingRecord> {
        let empty = self.empty_state.as_ref()?;
        let root = doc.root_element();

        let mut record = match &empty.fields {
            Some(fields) => {
                let title = fields
                    .title(root)
                    .unwrap_or_else(|| empty.fallback_title.clone());
                fields.record(root, page, self.price_style, title)
            }
            None => ListingRecord::titled(empty.fallback_title.as_str()),
        };
        record.link.get_or_insert_with(|| page.clone());

        info!("Empty state on {}: {}", page, record.title);
        Some(record)
    }
}

pub fn is_denied(name: &str, deny: &[String]) -> bool {
    let name = name.trim().to_lowercase();
    deny.iter().any(|d| d.trim().to_lowercase() == name)
}

/// Turns page-level category links into category records.
#[derive(Debug)]
pub struct CategoryExtractor {
    item: Selector,
    name: Field,
    link: Field,
    pattern: Option<Regex>,
    deny: Vec<String>,
    items: Option<ListingExtractor>,
}

impl CategoryExtractor {
    pub fn new(config: &CategorySource) -> Result<Self, ScrapeError> {
        let pattern = config
            .name_pattern
            .as_deref()
            .map(|p| {
                Regex::new(p).map_err(|e| ScrapeError::InvalidPattern {
                    pattern: p.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        Ok(CategoryExtractor {
            item: compile(&config.item)?,
            name: Field::compile(&config.name)?,
            link: Field::compile(&config.link)?,
            pattern,
            deny: config.deny.clone(),
            items: config
                .items
                .as_ref()
                .map(|items| ListingExtractor::new(&items.extract))
                .transpose()?,
        })
    }

    /// Extractor for the sale items on each category page, if configured.
    pub fn items(&self) -> Option<&ListingExtractor> {
        self.items.as_ref()
    }

    pub fn extract(&self, doc: &Html, page: &Url) -> Vec<CategoryRecord> {
        let mut categories = vec![];
        for el in doc.select(&self.item) {
            let raw = match self.name.read(el) {
                Some(raw) => raw,
                None => continue,
            };
            let name = match &self.pattern {
                Some(pattern) => utils::capture(&raw, pattern),
                None => Some(raw.clone()).filter(|n| !n.is_empty()),
            };
            let Some(name) = name else {
                debug!("No category name in `{}`", raw);
                continue;
            };

            if is_denied(&name, &self.deny) {
                debug!("Denied category {}", name);
                continue;
            }

            let Some(link) = self
                .link
                .read(el)
                .and_then(|href| utils::resolve_link(page, &href))
            else {
                warn!("Skip category {} without a link", name);
                continue;
            };

            categories.push(CategoryRecord {
                name: utils::capitalize_first(&name),
                link,
                items: vec![],
            });
        }

        info!("{} categories from {}", categories.len(), page);
        categories
    }
}
