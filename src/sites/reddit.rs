use crate::{
    config::{FieldSelector, FetchStrategy, ItemExtraction, Layout, ListingFields, ListingSource},
    SiteConfig,
};

/// Top posts of the day in r/homelab.
pub fn config() -> SiteConfig {
    SiteConfig {
        name: "reddit".into(),
        glyph: "r/".into(),
        listings: Some(ListingSource {
            url: "https://www.reddit.com/r/homelab/top/?t=day".into(),
            fetch: FetchStrategy::Rendered,
            wait_for: Some("div a div h3".into()),
            header: Some("r/Homelab".into()),
            extract: ItemExtraction {
                item: ".rpBJOHq2PR60pnwJlUyP0 ._1oQyIsiPHYt6nx7VOmd1sz.bE7JgM2ex7W3aF3zci5bm.D3IyhBGwXo9jPwz-Ka0Ve"
                    .into(),
                fields: ListingFields {
                    title: FieldSelector::text("div a div h3"),
                    link: Some(FieldSelector::href(
                        "div.y8HYJ-y_lTUHkQIc1mdCq._2INHSNB8V5eaWp4P0rY_mE a",
                    )),
                    tag: Some(FieldSelector::text("div a span")),
                    ..Default::default()
                },
                empty_state: None,
                limit: None,
                unique: false,
                price_style: Default::default(),
            },
            layout: Layout::default(),
        }),
        categories: None,
        refresh: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{menu::ListingFormat, ListingRecord};
    use pretty_assertions::assert_eq;
    use reqwest::Url;
    use scraper::Html;
    use std::fs;

    #[test]
    fn test_parsing_posts() {
        let site = config();
        let listings = site.listings.as_ref().unwrap();
        let page = Url::parse(&listings.url).unwrap();
        let html = fs::read_to_string("tests/htmls/reddit.html").expect("Invalid file path");
        let doc = Html::parse_document(&html);

        let records = crate::ListingExtractor::new(&listings.extract)
            .unwrap()
            .extract(&doc, &page);

        assert_eq!(
            records,
            vec![
                ListingRecord {
                    link: Some(Url::parse("https://www.reddit.com/r/homelab/comments/abc123/my_first_rack/").unwrap()),
                    tag: Some("LabPorn".into()),
                    ..ListingRecord::titled("My first rack is finally done")
                },
                ListingRecord {
                    link: Some(Url::parse("https://www.reddit.com/r/homelab/comments/def456/proxmox_or_esxi/").unwrap()),
                    ..ListingRecord::titled("Proxmox or ESXi in 2023?")
                },
            ]
        );
    }

    #[test]
    fn test_flair_leads_the_title() {
        let site = config();
        let listings = site.listings.as_ref().unwrap();
        let format = ListingFormat::new(&listings.extract.fields, &listings.layout);
        let post = ListingRecord {
            tag: Some("LabPorn".into()),
            ..ListingRecord::titled("My first rack is finally done")
        };

        assert_eq!(format.label(&post), "[LabPorn] My first rack is finally done");
    }
}
