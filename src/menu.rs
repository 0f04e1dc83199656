use crate::{
    config::{Layout, ListingFields, SiteConfig, SortOrder},
    data::{CategoryRecord, ListingRecord},
    utils, Scraped,
};
use reqwest::Url;
use std::{
    cmp::Reverse,
    fmt,
    io::{self, Write},
};

pub const SEPARATOR: &str = "---";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Item,
    /// Nested one level under the previous item.
    SubItem,
    /// Followed by a separator.
    Header,
}

/// One line of the host's menu syntax:
/// `<label> | href=<url> tooltip="<text>" length=<n> size=<n> refresh=true`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLine {
    pub style: LineStyle,
    pub label: String,
    pub href: Option<Url>,
    pub tooltip: Option<String>,
    pub length: Option<usize>,
    pub size: Option<u32>,
    pub refresh: bool,
}

impl MenuLine {
    pub fn new<L: Into<String>>(style: LineStyle, label: L) -> Self {
        MenuLine {
            style,
            label: label.into(),
            href: None,
            tooltip: None,
            length: None,
            size: None,
            refresh: false,
        }
    }

    pub fn item<L: Into<String>>(label: L) -> Self {
        Self::new(LineStyle::Item, label)
    }

    pub fn href(mut self, href: Option<Url>) -> Self {
        self.href = href;
        self
    }

    pub fn tooltip(mut self, tooltip: Option<String>) -> Self {
        self.tooltip = tooltip;
        self
    }

    pub fn length(mut self, length: Option<usize>) -> Self {
        self.length = length;
        self
    }

    pub fn refresh(mut self) -> Self {
        self.refresh = true;
        self
    }
}

impl fmt::Display for MenuLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.style == LineStyle::SubItem {
            write!(f, "--")?;
        }
        write!(f, "{}", utils::sanitize_label(&self.label))?;

        let mut params = vec![];
        if let Some(href) = &self.href {
            params.push(format!("href={}", href));
        }
        if let Some(tooltip) = &self.tooltip {
            params.push(format!("tooltip=\"{}\"", utils::clean_description(tooltip)));
        }
        if let Some(length) = self.length {
            params.push(format!("length={}", length));
        }
        if let Some(size) = self.size {
            params.push(format!("size={}", size));
        }
        if self.refresh {
            params.push("refresh=true".to_string());
        }

        if !params.is_empty() {
            write!(f, " | {}", params.join(" "))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Line(MenuLine),
    Separator,
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Line(line) => write!(f, "{}", line),
            Entry::Separator => write!(f, "{}", SEPARATOR),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Menu {
    entries: Vec<Entry>,
}

impl Menu {
    /// Starts with the status-bar label and the separator that ends it.
    pub fn new(glyph: &str) -> Self {
        let mut menu = Menu::default();
        menu.push(MenuLine::item(glyph));
        menu.separator();
        menu
    }

    pub fn push(&mut self, line: MenuLine) {
        let header = line.style == LineStyle::Header;
        self.entries.push(Entry::Line(line));
        if header {
            self.separator();
        }
    }

    pub fn separator(&mut self) {
        self.entries.push(Entry::Separator);
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }

    /// What the host shows when a run fails.
    pub fn failure(glyph: &str, site: &str, error: &dyn fmt::Display) -> Self {
        let mut menu = Menu::new(glyph);
        menu.push(MenuLine::item(format!("⚠️ Error fetching {}: {}", site, error)));
        menu.separator();
        menu.push(MenuLine::item("Refresh").refresh());
        menu
    }

    pub fn for_site(site: &SiteConfig, scraped: &Scraped) -> Self {
        let mut menu = Menu::new(&site.glyph);

        if let (Some(source), Some(listings)) = (&site.listings, &scraped.listings) {
            if let Some(header) = &source.header {
                menu.push(
                    MenuLine::new(LineStyle::Header, header.as_str())
                        .href(Some(listings.page.clone())),
                );
            }
            let format = ListingFormat::new(&source.extract.fields, &source.layout);
            for record in &listings.records {
                menu.push(format.line(record, LineStyle::Item));
            }
        }

        if let (Some(source), Some(categories)) = (&site.categories, &scraped.categories) {
            if let Some(header) = &source.header {
                menu.push(
                    MenuLine::new(LineStyle::Header, header.as_str())
                        .href(Some(categories.page.clone())),
                );
            }
            let format = source
                .items
                .as_ref()
                .map(|items| ListingFormat::new(&items.extract.fields, &items.layout));
            for category in &categories.records {
                menu.push(category_line(category));
                if let Some(format) = &format {
                    for record in &category.items {
                        menu.push(format.line(record, LineStyle::SubItem));
                    }
                }
            }
        }

        if site.refresh {
            menu.separator();
            menu.push(MenuLine::item("Refresh").refresh());
        }
        menu
    }
}

impl fmt::Display for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}", entry)?;
        }
        Ok(())
    }
}

/// Which label columns a site shows, and how.
pub struct ListingFormat<'a> {
    layout: &'a Layout,
    price: bool,
    discount: bool,
    rating: bool,
}

impl<'a> ListingFormat<'a> {
    pub fn new(fields: &ListingFields, layout: &'a Layout) -> Self {
        ListingFormat {
            layout,
            price: fields.price.is_some(),
            discount: fields.discount.is_some(),
            rating: fields.rating.is_some(),
        }
    }

    /// `<price> [-<nn>%] [<tag>] <title> <rating>`
    pub fn label(&self, record: &ListingRecord) -> String {
        let mut parts = vec![];
        if self.price {
            parts.push(
                record
                    .price
                    .clone()
                    .unwrap_or_else(|| self.layout.price_fallback.clone()),
            );
        }
        if self.discount {
            if let Some(discount) = record.discount {
                parts.push(format!("[-{}%]", discount));
            }
        }
        if let Some(tag) = &record.tag {
            parts.push(format!("[{}]", tag));
        }
        parts.push(match self.layout.title_max {
            Some(max) => utils::truncate(&record.title, max),
            None => record.title.clone(),
        });
        if self.rating {
            parts.push(
                self.layout
                    .rating_scale
                    .glyph(record.rating.as_deref())
                    .to_string(),
            );
        }
        parts.join(" ")
    }

    pub fn line(&self, record: &ListingRecord, style: LineStyle) -> MenuLine {
        let tooltip = match (&record.description, &self.layout.tooltip_format) {
            (Some(description), Some(format)) => Some(
                format
                    .replace("{title}", &record.title)
                    .replace("{description}", description),
            ),
            (Some(description), None) => Some(description.clone()),
            (None, _) => self
                .layout
                .title_tooltip
                .then(|| record.title.clone()),
        };
        MenuLine::new(style, self.label(record))
            .href(record.link.clone())
            .tooltip(tooltip)
            .length(self.layout.length)
    }
}

pub fn category_line(category: &CategoryRecord) -> MenuLine {
    MenuLine::item(category.name.as_str()).href(Some(category.link.clone()))
}

/// Highest discount first. Records without a discount keep their relative
/// order at the end.
pub fn sort_by_discount(records: &mut [ListingRecord]) {
    records.sort_by_key(|r| Reverse(r.discount));
}

pub fn apply_sort(records: &mut [ListingRecord], order: SortOrder) {
    match order {
        SortOrder::Document => {}
        SortOrder::DiscountDesc => sort_by_discount(records),
    }
}

/// Writes every line, in order, with a trailing newline.
pub fn emit<W: Write>(menu: &Menu, out: &mut W) -> io::Result<()> {
    for entry in menu.entries() {
        writeln!(out, "{}", entry)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::FieldSelector, data::SHRUG, utils::extract_percent};
    use pretty_assertions::assert_eq;

    fn deal_fields() -> ListingFields {
        ListingFields {
            title: FieldSelector::text(".name"),
            price: Some(FieldSelector::text(".price")),
            discount: Some(FieldSelector::text(".saved")),
            link: Some(FieldSelector::href("a")),
            ..Default::default()
        }
    }

    #[test]
    fn missing_price_uses_fallback_glyph() {
        let layout = Layout::default();
        let format = ListingFormat::new(&deal_fields(), &layout);
        let line = format
            .line(&ListingRecord::titled("Grill"), LineStyle::Item)
            .to_string();

        assert_eq!(line, "🔑 Grill");
        assert!(!line.contains("undefined"));
    }

    #[test]
    fn deal_line_shape() {
        let layout = Layout {
            length: Some(90),
            ..Layout::default()
        };
        let format = ListingFormat::new(&deal_fields(), &layout);
        let record = ListingRecord {
            price: Some("$89".into()),
            discount: Some(25),
            link: Some(Url::parse("https://www.shopmyexchange.com/p/1?a=1&b=2").unwrap()),
            ..ListingRecord::titled("Drill Kit")
        };

        assert_eq!(
            format.line(&record, LineStyle::Item).to_string(),
            "$89 [-25%] Drill Kit | href=https://www.shopmyexchange.com/p/1?a=1&b=2 length=90"
        );
        assert_eq!(
            format.line(&record, LineStyle::SubItem).to_string(),
            "--$89 [-25%] Drill Kit | href=https://www.shopmyexchange.com/p/1?a=1&b=2 length=90"
        );
    }

    #[test]
    fn link_with_query_is_kept_whole() {
        let href = "https://www.microcenter.com/search/search_results.aspx?Ntt=5206&Ntx=mode+matchpartial&Ntk=adv&N=0&myStore=true";
        let line = MenuLine::item("Sale Items")
            .href(Some(Url::parse(href).unwrap()))
            .to_string();
        assert_eq!(line, format!("Sale Items | href={}", href));
    }

    #[test]
    fn rating_and_tooltip() {
        let fields = ListingFields {
            rating: Some(FieldSelector::text(".rating")),
            description: Some(FieldSelector::text(".desc")),
            ..deal_fields()
        };
        let layout = Layout::default();
        let format = ListingFormat::new(&fields, &layout);
        let record = ListingRecord {
            price: Some("$4".into()),
            discount: Some(80),
            rating: Some("Very Positive".into()),
            description: Some("Dig deep.".into()),
            ..ListingRecord::titled("Dome Keeper")
        };
        assert_eq!(
            format.line(&record, LineStyle::Item).to_string(),
            "$4 [-80%] Dome Keeper ⭐⭐⭐ | tooltip=\"Dig deep.\""
        );

        let unrated = ListingRecord {
            rating: Some("3 user reviews".into()),
            ..record
        };
        assert!(format.label(&unrated).ends_with(SHRUG));
    }

    #[test]
    fn headline_truncation_and_title_tooltip() {
        let fields = ListingFields {
            title: FieldSelector::text(".ourh"),
            tag: Some(FieldSelector::text("cite a")),
            ..Default::default()
        };
        let layout = Layout {
            title_max: Some(70),
            title_tooltip: true,
            ..Layout::default()
        };
        let format = ListingFormat::new(&fields, &layout);
        let title = "x".repeat(70);
        let record = ListingRecord {
            tag: Some("The Verge".into()),
            ..ListingRecord::titled(title.as_str())
        };
        let line = format.line(&record, LineStyle::Item);

        assert_eq!(line.label, format!("[The Verge] {}...", "x".repeat(67)));
        assert_eq!(line.tooltip.as_deref(), Some(title.as_str()));
    }

    #[test]
    fn pipe_in_label_does_not_split_line() {
        let line = MenuLine::item("Rust | Go").to_string();
        assert_eq!(line, "Rust ¦ Go");
    }

    #[test]
    fn line_break_in_label_does_not_add_lines() {
        let line = MenuLine::item("GPU\n---\nSale")
            .href(Some(Url::parse("https://www.microcenter.com/product/1").unwrap()))
            .to_string();
        assert!(!line.contains('\n'));
        assert_eq!(line, "GPU --- Sale | href=https://www.microcenter.com/product/1");
    }

    #[test]
    fn tooltip_format_wraps_description() {
        let fields = ListingFields {
            title: FieldSelector::text(".link > a"),
            description: Some(FieldSelector::text(".tags > a").every()),
            ..Default::default()
        };
        let layout = Layout {
            title_max: Some(10),
            title_tooltip: true,
            tooltip_format: Some("{title} - Tags: [{description}]".into()),
            ..Layout::default()
        };
        let format = ListingFormat::new(&fields, &layout);

        let tagged = ListingRecord {
            description: Some("rust, linux".into()),
            ..ListingRecord::titled("Writing an OS in Rust")
        };
        assert_eq!(
            format.line(&tagged, LineStyle::Item).tooltip.as_deref(),
            Some("Writing an OS in Rust - Tags: [rust, linux]")
        );

        let bare = ListingRecord::titled("Ask: editors");
        assert_eq!(
            format.line(&bare, LineStyle::Item).tooltip.as_deref(),
            Some("Ask: editors")
        );
    }

    #[test]
    fn discount_sort_is_numeric_descending() {
        let mut records: Vec<_> = ["50%", "20%", "80%", "5%", "100%"]
            .iter()
            .map(|d| ListingRecord {
                discount: extract_percent(d),
                ..ListingRecord::titled(*d)
            })
            .collect();
        sort_by_discount(&mut records);

        let order: Vec<_> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(order, vec!["100%", "80%", "50%", "20%", "5%"]);
    }

    #[test]
    fn discount_sort_is_stable_and_puts_unknowns_last() {
        let record = |title: &str, discount: Option<u32>| ListingRecord {
            discount,
            ..ListingRecord::titled(title)
        };
        let mut records = vec![
            record("a", None),
            record("b", Some(30)),
            record("c", Some(30)),
            record("d", None),
            record("e", Some(60)),
        ];
        apply_sort(&mut records, SortOrder::DiscountDesc);

        let order: Vec<_> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(order, vec!["e", "b", "c", "a", "d"]);
    }

    #[test]
    fn header_is_followed_by_separator() {
        let mut menu = Menu::new("TM");
        menu.push(
            MenuLine::new(LineStyle::Header, "Techmeme")
                .href(Some(Url::parse("https://www.techmeme.com/").unwrap())),
        );
        menu.push(MenuLine::item("story"));

        assert_eq!(
            menu.lines(),
            vec![
                "TM",
                "---",
                "Techmeme | href=https://www.techmeme.com/",
                "---",
                "story"
            ]
        );
    }

    #[test]
    fn failure_menu() {
        let menu = Menu::failure("🦞", "lobsters", &"timed out");
        assert_eq!(
            menu.lines(),
            vec![
                "🦞",
                "---",
                "⚠️ Error fetching lobsters: timed out",
                "---",
                "Refresh | refresh=true"
            ]
        );
    }

    #[test]
    fn emits_lines_in_order() {
        let mut menu = Menu::new("BX");
        menu.push(MenuLine::item("one"));
        menu.push(MenuLine::item("two"));

        let mut out = Vec::new();
        emit(&menu, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "BX\n---\none\ntwo\n");
    }
}
