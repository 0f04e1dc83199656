use crate::{
    config::{FieldSelector, FetchStrategy, ItemExtraction, Layout, ListingFields, ListingSource},
    SiteConfig,
};

pub fn config() -> SiteConfig {
    SiteConfig {
        name: "lobsters".into(),
        glyph: "🦞".into(),
        listings: Some(ListingSource {
            url: "https://lobste.rs/".into(),
            fetch: FetchStrategy::Static,
            wait_for: None,
            header: Some("Lobste.rs Home".into()),
            extract: ItemExtraction {
                item: "ol.stories > li".into(),
                fields: ListingFields {
                    title: FieldSelector::text(".link > a.u-url"),
                    link: Some(FieldSelector::href(".link > a.u-url")),
                    description: Some(FieldSelector::text(".tags > a").every()),
                    tag: Some(FieldSelector::text(".tags > a")),
                    ..Default::default()
                },
                empty_state: None,
                limit: Some(15),
                unique: false,
                price_style: Default::default(),
            },
            layout: Layout {
                title_max: Some(80),
                title_tooltip: true,
                tooltip_format: Some("{title} - Tags: [{description}]".into()),
                ..Layout::default()
            },
        }),
        categories: None,
        refresh: true,
    }
}
