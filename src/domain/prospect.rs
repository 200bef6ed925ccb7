use std::fmt;

use itertools::Itertools;
use serde::Serialize;
use url::Url;

#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub job_title: String,
    pub location: String,
    pub max_results: usize,
}

impl SearchQuery {
    pub fn keywords(&self) -> String {
        format!("{} {}", self.job_title, self.location)
    }
}

/// Canonical profile url: absolute, `/in/` path segment, no query string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ProspectUrl(String);

impl ProspectUrl {
    pub fn parse(raw: &str) -> Option<ProspectUrl> {
        let mut parsed = Url::parse(raw).ok()?;
        if !parsed.path().contains("/in/") {
            return None;
        }
        parsed.set_query(None);
        parsed.set_fragment(None);

        Some(ProspectUrl(parsed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProspectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub fn collect_profiles<I>(candidate_urls: I, max_results: usize) -> Vec<ProspectUrl>
where
    I: IntoIterator<Item = String>,
{
    candidate_urls
        .into_iter()
        .filter_map(|url| ProspectUrl::parse(&url))
        .unique()
        .take(max_results)
        .collect()
}
