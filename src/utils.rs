use lazy_regex::{regex, Regex};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

pub(crate) const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceStyle {
    /// `$19`
    #[default]
    Whole,
    /// `$19.99`
    Cents,
}

pub(crate) fn collapse_whitespace(s: &str) -> String {
    regex!(r"\s+").replace_all(s.trim(), " ").into_owned()
}

/// Pulls the first currency amount out of text like `$1,799.99 Sale` or a bare
/// `199.99` attribute value.
pub fn extract_price(raw: &str, style: PriceStyle) -> Option<String> {
    let caps = regex!(r"(?P<whole>\d[\d,]*)(?:\.(?P<cents>\d{1,2}))?").captures(raw)?;
    let whole = caps.name("whole")?.as_str().trim_end_matches(',');
    match style {
        PriceStyle::Whole => Some(format!("${}", whole)),
        PriceStyle::Cents => {
            let cents = caps.name("cents").map_or("00", |c| c.as_str());
            Some(format!("${}.{:0<2}", whole, cents))
        }
    }
}

/// Pulls a percentage out of text like `-50%` or `You Save $5.00 (25%)`.
pub fn extract_percent(raw: &str) -> Option<u32> {
    regex!(r"(\d{1,3})(?:\.\d+)?\s*%")
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Makes free text safe to sit inside a `tooltip="..."` parameter.
pub fn clean_description(raw: &str) -> String {
    let s = regex!(r"[\r\n]+").replace_all(raw, " ");
    let s = regex!(r#"['"]"#).replace_all(s.borrow(), "");
    collapse_whitespace(s.borrow())
}

/// Titles shorter than `max` characters pass through. Anything else is cut so
/// that the result, ellipsis included, is exactly `max` characters. A `max`
/// too small to hold the ellipsis keeps just the first `max` characters.
pub fn truncate(title: &str, max: usize) -> String {
    if title.chars().count() < max {
        return title.to_string();
    }
    if max <= ELLIPSIS.len() {
        return title.chars().take(max).collect();
    }
    let mut out: String = title.chars().take(max - ELLIPSIS.len()).collect();
    out.push_str(ELLIPSIS);
    out
}

pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// First capture group of `pattern` (or the whole match when it has none).
pub fn capture(raw: &str, pattern: &Regex) -> Option<String> {
    let caps = pattern.captures(raw)?;
    caps.get(1)
        .or_else(|| caps.get(0))
        .map(|m| collapse_whitespace(m.as_str()))
        .filter(|s| !s.is_empty())
}

/// A `|` in label text would end the label early, a line break would start a
/// new menu line.
pub(crate) fn sanitize_label(s: &str) -> String {
    regex!(r"[\r\n]+").replace_all(s, " ").replace('|', "¦")
}

pub(crate) fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') || href.starts_with("javascript:") {
        return None;
    }
    base.join(href).ok()
}
