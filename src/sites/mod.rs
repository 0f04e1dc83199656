//! Built-in site configurations.

mod aafes;
mod lobsters;
mod microcenter;
mod reddit;
mod steam;
mod techmeme;

use crate::{ScrapeError, SiteConfig};

pub fn builtin_all() -> Vec<SiteConfig> {
    vec![
        aafes::deal_of_the_day(),
        aafes::deals_and_categories(),
        steam::config(),
        reddit::config(),
        techmeme::config(),
        microcenter::config(),
        lobsters::config(),
    ]
}

/// Names of the built-in sites followed by any extra ones not shadowing them.
pub fn names(extra: &[SiteConfig]) -> Vec<String> {
    let mut names: Vec<String> = builtin_all().into_iter().map(|s| s.name).collect();
    for site in extra {
        if !names.contains(&site.name) {
            names.push(site.name.clone());
        }
    }
    names
}

/// Sites from a config file take precedence over built-in ones of the same
/// name.
pub fn find(name: &str, extra: &[SiteConfig]) -> Result<SiteConfig, ScrapeError> {
    extra
        .iter()
        .find(|s| s.name == name)
        .cloned()
        .or_else(|| builtin_all().into_iter().find(|s| s.name == name))
        .ok_or_else(|| ScrapeError::UnknownSite(name.to_string()))
}
