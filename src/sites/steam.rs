use crate::{
    config::{FieldSelector, FetchStrategy, ItemExtraction, Layout, ListingFields, ListingSource, SortOrder},
    SiteConfig,
};

const ROW: &str = ".salepreviewwidgets_SaleItemBrowserRow_y9MSd";

/// Mac games on sale, best discount first.
pub fn config() -> SiteConfig {
    SiteConfig {
        name: "steam".into(),
        glyph: "🕹️".into(),
        listings: Some(ListingSource {
            url: "https://store.steampowered.com/specials/?facets13268=6%3A2&offset=12".into(),
            fetch: FetchStrategy::Rendered,
            wait_for: Some(ROW.into()),
            header: Some("Steam Mac Deals".into()),
            extract: ItemExtraction {
                item: ROW.into(),
                fields: ListingFields {
                    title: FieldSelector::text(".salepreviewwidgets_StoreSaleWidgetTitle_3jI46"),
                    price: Some(FieldSelector::text(".salepreviewwidgets_StoreSalePriceBox_Wh0L8")),
                    discount: Some(FieldSelector::text(
                        ".salepreviewwidgets_StoreSaleDiscountBox_2fpFv",
                    )),
                    link: Some(FieldSelector::href(".salepreviewwidgets_TitleCtn_1F4bc a")),
                    rating: Some(FieldSelector::text(".gamehover_ReviewScoreValue_2SbZz div")),
                    description: Some(FieldSelector::text(
                        ".salepreviewwidgets_StoreSaleWidgetShortDesc_VvP06.StoreSaleWidgetShortDesc",
                    )),
                    tag: None,
                },
                empty_state: None,
                limit: None,
                unique: false,
                price_style: Default::default(),
            },
            layout: Layout {
                sort: SortOrder::DiscountDesc,
                ..Layout::default()
            },
        }),
        categories: None,
        refresh: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{menu::Menu, Scraped, Section};
    use pretty_assertions::assert_eq;
    use reqwest::Url;
    use scraper::Html;
    use std::fs;

    #[test]
    fn test_parsing_sale_rows() {
        let site = config();
        let listings = site.listings.as_ref().unwrap();
        let page = Url::parse(&listings.url).unwrap();
        let html = fs::read_to_string("tests/htmls/steam.html").expect("Invalid file path");
        let doc = Html::parse_document(&html);

        let mut records = crate::ListingExtractor::new(&listings.extract)
            .unwrap()
            .extract(&doc, &page);
        crate::menu::apply_sort(&mut records, listings.layout.sort);

        let menu = Menu::for_site(
            &site,
            &Scraped {
                listings: Some(Section { page, records }),
                categories: None,
            },
        );

        assert_eq!(
            menu.lines(),
            vec![
                "🕹️",
                "---",
                "Steam Mac Deals | href=https://store.steampowered.com/specials/?facets13268=6%3A2&offset=12",
                "---",
                "$4 [-80%] Dome Keeper ⭐⭐⭐ | href=https://store.steampowered.com/app/1637320/Dome_Keeper/ tooltip=\"A roguelike mining defense game. Dig for resources and protect your dome.\"",
                "$9 [-50%] Disco Elysium ⭐⭐⭐⭐ | href=https://store.steampowered.com/app/632470/Disco_Elysium/ tooltip=\"A detective RPG. Youre a cop with amnesia.\"",
                "$14 [-20%] Cities: Skylines 🤷🏽‍♂️ | href=https://store.steampowered.com/app/255710/Cities_Skylines/ tooltip=\"Build the city of your dreams.\"",
            ]
        );
    }
}
