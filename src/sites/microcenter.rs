use crate::{
    config::{
        EmptyState, FieldSelector, FetchStrategy, ItemExtraction, Layout, ListingFields,
        ListingSource,
    },
    PriceStyle, SiteConfig,
};

/// Product links carry the name, price and brand as data attributes, which
/// survive layout changes better than the visible markup.
pub fn config() -> SiteConfig {
    SiteConfig {
        name: "microcenter".into(),
        glyph: "💻".into(),
        listings: Some(ListingSource {
            url: "https://www.microcenter.com/search/search_results.aspx?fq=Micro+Center+Deals:Top+Deals"
                .into(),
            fetch: FetchStrategy::Static,
            wait_for: None,
            header: Some("Microcenter Top Deals".into()),
            extract: ItemExtraction {
                item: "a[data-id][data-price][data-name]".into(),
                fields: ListingFields {
                    title: FieldSelector::own_attr("data-name"),
                    price: Some(FieldSelector::own_attr("data-price")),
                    link: Some(FieldSelector::own_attr("href")),
                    tag: Some(FieldSelector::own_attr("data-brand")),
                    ..Default::default()
                },
                empty_state: Some(EmptyState {
                    fields: None,
                    fallback_title: "No deals found".into(),
                }),
                limit: None,
                unique: true,
                price_style: PriceStyle::Cents,
            },
            layout: Layout {
                title_max: Some(60),
                ..Layout::default()
            },
        }),
        categories: None,
        refresh: true,
    }
}
