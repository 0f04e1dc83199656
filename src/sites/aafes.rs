use crate::{
    config::{
        CategoryItems, CategorySource, EmptyState, FieldSelector, FetchStrategy, ItemExtraction,
        Layout, ListingFields, ListingSource, SortOrder,
    },
    SiteConfig,
};

const GLYPH: &str = "BX";
const NO_SALES: &str = "No sales items found today";
const LINE_LENGTH: usize = 90;

const DENIED_CATEGORIES: [&str; 7] = [
    "bras",
    "garmin",
    "fujifilm",
    "military pride",
    "blue topaz",
    "burt's bees gift sets",
    "diamond jewelry",
];

fn deal_fields() -> ListingFields {
    ListingFields {
        title: FieldSelector::text(".aafes-item-name a"),
        price: Some(FieldSelector::text(".item-pricing .aafes-price-sale")),
        discount: Some(FieldSelector::text(".aafes-price-saved")),
        link: Some(FieldSelector::href("a")),
        ..Default::default()
    }
}

fn deal_layout() -> Layout {
    Layout {
        length: Some(LINE_LENGTH),
        ..Layout::default()
    }
}

/// The dated "DealoftheDay13December" search.
pub fn deal_of_the_day() -> SiteConfig {
    SiteConfig {
        name: "aafes-dotd".into(),
        glyph: GLYPH.into(),
        listings: Some(ListingSource {
            url: "https://www.shopmyexchange.com/s?Dy=1&Nty=1&Ntt=DealoftheDay{day}{month}".into(),
            fetch: FetchStrategy::Static,
            wait_for: None,
            header: Some("The Exchange".into()),
            extract: ItemExtraction {
                item: ".aafes-thumbnail-item".into(),
                fields: deal_fields(),
                empty_state: Some(EmptyState {
                    fields: None,
                    fallback_title: NO_SALES.into(),
                }),
                limit: None,
                unique: false,
                price_style: Default::default(),
            },
            layout: deal_layout(),
        }),
        categories: None,
        refresh: false,
    }
}

/// Deals of the day plus the weekly savings-center categories.
pub fn deals_and_categories() -> SiteConfig {
    SiteConfig {
        name: "aafes".into(),
        glyph: GLYPH.into(),
        listings: Some(ListingSource {
            url: "https://www.shopmyexchange.com/s?Dy=1&Nty=1&Ntt=dotd".into(),
            fetch: FetchStrategy::Static,
            wait_for: None,
            header: Some("Deals of the Day".into()),
            extract: ItemExtraction {
                item: ".aafes-thumbnail-item.col-xs-12".into(),
                fields: deal_fields(),
                // A single featured deal is shown as a page heading instead
                // of a thumbnail grid.
                empty_state: Some(EmptyState {
                    fields: Some(ListingFields {
                        title: FieldSelector::text(".aafes-page-head.mb-0"),
                        price: Some(FieldSelector::text(".aafes-price-sale")),
                        discount: Some(FieldSelector::text(".aafes-price-saved")),
                        ..Default::default()
                    }),
                    fallback_title: NO_SALES.into(),
                }),
                limit: None,
                unique: false,
                price_style: Default::default(),
            },
            layout: deal_layout(),
        }),
        categories: Some(CategorySource {
            url: "https://www.shopmyexchange.com/savings-center".into(),
            fetch: FetchStrategy::Static,
            wait_for: None,
            header: Some("Weekly Sale Categories".into()),
            item: ".item-content".into(),
            name: FieldSelector::text("a"),
            link: FieldSelector::href("a"),
            name_pattern: Some(r"(?i)\boff\s+(.+)$".into()),
            deny: DENIED_CATEGORIES.iter().map(ToString::to_string).collect(),
            items: Some(CategoryItems {
                extract: ItemExtraction {
                    item: ".aafes-thumbnail-item".into(),
                    fields: ListingFields {
                        link: Some(FieldSelector::href(".aafes-item-name a")),
                        ..deal_fields()
                    },
                    empty_state: None,
                    limit: Some(10),
                    unique: true,
                    price_style: Default::default(),
                },
                layout: Layout {
                    sort: SortOrder::DiscountDesc,
                    ..deal_layout()
                },
            }),
        }),
        refresh: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CategoryExtractor, ListingExtractor, ListingRecord};
    use pretty_assertions::assert_eq;
    use reqwest::Url;
    use scraper::Html;
    use std::fs;

    fn listings(site: &SiteConfig) -> ListingExtractor {
        ListingExtractor::new(&site.listings.as_ref().unwrap().extract).unwrap()
    }

    #[test]
    fn test_parsing_deals() {
        let page = Url::parse("https://www.shopmyexchange.com/s?Dy=1&Nty=1&Ntt=dotd").unwrap();
        let html = fs::read_to_string("tests/htmls/aafes_dotd.html").expect("Invalid file path");
        let doc = Html::parse_document(&html);

        let records = listings(&deals_and_categories()).extract(&doc, &page);

        assert_eq!(
            records,
            vec![
                ListingRecord {
                    price: Some("$249".into()),
                    discount: Some(40),
                    link: Some(Url::parse("https://www.shopmyexchange.com/weber-spirit-ii/1234").unwrap()),
                    ..ListingRecord::titled("Weber Spirit II Gas Grill")
                },
                ListingRecord {
                    price: Some("$19".into()),
                    discount: Some(25),
                    link: Some(Url::parse("https://www.shopmyexchange.com/yeti-rambler/5678").unwrap()),
                    ..ListingRecord::titled("Yeti Rambler 20 oz. Tumbler")
                },
                ListingRecord {
                    link: Some(Url::parse("https://www.shopmyexchange.com/mystery-box/9999").unwrap()),
                    ..ListingRecord::titled("Mystery Box")
                },
            ]
        );
    }

    #[test]
    fn test_parsing_featured_deal() {
        let page = Url::parse("https://www.shopmyexchange.com/s?Dy=1&Nty=1&Ntt=dotd").unwrap();
        let html =
            fs::read_to_string("tests/htmls/aafes_featured.html").expect("Invalid file path");
        let doc = Html::parse_document(&html);

        let records = listings(&deals_and_categories()).extract(&doc, &page);

        assert_eq!(
            records,
            vec![ListingRecord {
                price: Some("$1,099".into()),
                discount: Some(15),
                link: Some(page),
                ..ListingRecord::titled("Deal of the Day: Apple MacBook Air 13 in.")
            }]
        );
    }

    #[test]
    fn test_parsing_categories() {
        let site = deals_and_categories();
        let page = Url::parse("https://www.shopmyexchange.com/savings-center").unwrap();
        let html = fs::read_to_string("tests/htmls/aafes_savings_center.html")
            .expect("Invalid file path");
        let doc = Html::parse_document(&html);

        let categories = CategoryExtractor::new(site.categories.as_ref().unwrap())
            .unwrap()
            .extract(&doc, &page);

        let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Patio furniture", "Outdoor Power Tools"]);
    }
}
