use crate::{
    config::{FieldSelector, FetchStrategy, ItemExtraction, Layout, ListingFields, ListingSource},
    SiteConfig,
};

pub fn config() -> SiteConfig {
    SiteConfig {
        name: "techmeme".into(),
        glyph: "TM".into(),
        listings: Some(ListingSource {
            url: "https://www.techmeme.com/".into(),
            fetch: FetchStrategy::Static,
            wait_for: None,
            header: Some("Techmeme".into()),
            extract: ItemExtraction {
                item: ".clus".into(),
                fields: ListingFields {
                    title: FieldSelector::text(".ourh"),
                    link: Some(FieldSelector::href(".ourh")),
                    tag: Some(FieldSelector::text("cite a")),
                    ..Default::default()
                },
                empty_state: None,
                limit: None,
                unique: false,
                price_style: Default::default(),
            },
            layout: Layout {
                title_max: Some(70),
                length: Some(90),
                title_tooltip: true,
                ..Layout::default()
            },
        }),
        categories: None,
        refresh: false,
    }
}

#[cfg(test)]
mod tests {
    use crate::tests::{today, FixturePages};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_headlines() {
        let pages = FixturePages::default()
            .with_file("https://www.techmeme.com/", "tests/htmls/techmeme.html");

        let menu = crate::run(&super::config(), &pages, today()).await.unwrap();

        assert_eq!(
            menu.lines(),
            vec![
                "TM",
                "---",
                "Techmeme | href=https://www.techmeme.com/",
                "---",
                "[The Verge] Apple unveils M3 chips with hardware ray tracing across the MacBook... | href=https://www.theverge.com/2023/10/30/apple-m3 tooltip=\"Apple unveils M3 chips with hardware ray tracing across the MacBook Pro lineup\" length=90",
                "[Bloomberg] OpenAI hires a new CFO | href=https://www.bloomberg.com/news/openai-cfo tooltip=\"OpenAI hires a new CFO\" length=90",
            ]
        );
    }
}
