use scraper::{Html, Selector};

use crate::domain::prospect::{collect_profiles, ProspectUrl};

/// One way of pulling candidate profile links out of a rendered search
/// results page. Strategies are tried in order until one yields profiles.
pub trait LocatorStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn candidate_urls(&self, document: &Html) -> Vec<String>;
}

/// Anchors nested inside the result title text of each search hit.
pub struct ResultTitleAnchors {
    anchors: Selector,
}

impl ResultTitleAnchors {
    pub fn new() -> Self {
        ResultTitleAnchors {
            anchors: Selector::parse(r#"span[class*="entity-result__title-text"] a"#).unwrap(),
        }
    }
}

impl LocatorStrategy for ResultTitleAnchors {
    fn name(&self) -> &'static str {
        "result-title-anchor"
    }

    fn candidate_urls(&self, document: &Html) -> Vec<String> {
        document
            .select(&self.anchors)
            .filter_map(|tag| tag.value().attr("href"))
            .map(|url| url.to_string())
            .collect()
    }
}

/// Broader fallback: any anchor carrying the app navigation marker
/// attribute. Profile-path filtering happens downstream.
pub struct AppAwareAnchors {
    anchors: Selector,
}

impl AppAwareAnchors {
    pub fn new() -> Self {
        AppAwareAnchors {
            anchors: Selector::parse("a[data-test-app-aware-link]").unwrap(),
        }
    }
}

impl LocatorStrategy for AppAwareAnchors {
    fn name(&self) -> &'static str {
        "app-aware-anchor"
    }

    fn candidate_urls(&self, document: &Html) -> Vec<String> {
        document
            .select(&self.anchors)
            .filter_map(|tag| tag.value().attr("href"))
            .map(|url| url.to_string())
            .collect()
    }
}

pub fn default_strategies() -> Vec<Box<dyn LocatorStrategy>> {
    vec![
        Box::new(ResultTitleAnchors::new()),
        Box::new(AppAwareAnchors::new()),
    ]
}

/// Applies each strategy in order, returning the first batch of profiles
/// that survives filtering and dedup.
pub fn discover_profiles(
    document: &Html,
    strategies: &[Box<dyn LocatorStrategy>],
    max_results: usize,
) -> Vec<ProspectUrl> {
    for strategy in strategies {
        let profiles = collect_profiles(strategy.candidate_urls(document), max_results);
        match profiles.is_empty() {
            true => log::info!("Strategy '{}' found no profile urls", strategy.name()),
            false => {
                log::info!(
                    "Strategy '{}' found {} profile urls",
                    strategy.name(),
                    profiles.len()
                );
                return profiles;
            }
        }
    }

    Vec::new()
}
