use async_trait::async_trait;
use thiserror::Error;

use crate::domain::campaign::{CampaignContext, CampaignResult, GeneratedMessage};
use crate::domain::prospect::{ProspectUrl, SearchQuery};
use crate::services::prospect_search::SearchOutcome;

/// Profiles with less text than this are considered scrape failures and
/// skipped rather than sent to the model.
pub const MIN_PROFILE_TEXT_CHARS: usize = 200;

#[async_trait]
pub trait ProspectSource: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> SearchOutcome;

    async fn extract(&self, profile: &ProspectUrl) -> String;
}

#[async_trait]
pub trait MessageComposer: Send + Sync {
    async fn compose(
        &self,
        profile_text: &str,
        campaign: &CampaignContext,
    ) -> anyhow::Result<GeneratedMessage>;
}

#[derive(Debug, Error)]
pub enum CampaignError {
    #[error("no prospects matched the search criteria")]
    NoProspects,
    #[error("prospect search failed: {0}")]
    SearchFailed(String),
}

/// Drives one campaign: a single search, then one extraction and one
/// generation per prospect, strictly in discovery order. Individual
/// profile failures skip that profile only.
pub async fn run_campaign<S, C>(
    source: &S,
    composer: &C,
    query: &SearchQuery,
    campaign: &CampaignContext,
) -> Result<Vec<CampaignResult>, CampaignError>
where
    S: ProspectSource,
    C: MessageComposer,
{
    let prospects = match source.search(query).await {
        SearchOutcome::Found(prospects) => prospects,
        SearchOutcome::NotFound => return Err(CampaignError::NoProspects),
        SearchOutcome::Failed(reason) => return Err(CampaignError::SearchFailed(reason)),
    };

    log::info!(
        "Found {} prospects. Now analyzing each profile.",
        prospects.len()
    );

    let mut results = Vec::new();
    let mut skipped_thin = 0;
    let mut skipped_generation = 0;

    for profile in &prospects {
        let profile_text = source.extract(profile).await;

        if profile_text.chars().count() < MIN_PROFILE_TEXT_CHARS {
            log::info!("Skipping profile {} due to insufficient data scraped.", profile);
            skipped_thin += 1;
            continue;
        }

        log::info!(
            "Scraped profile {}. Length: {} chars. Calling the model.",
            profile,
            profile_text.chars().count()
        );

        match composer.compose(&profile_text, campaign).await {
            Ok(message) => results.push(CampaignResult {
                message,
                profile_url: profile.clone(),
            }),
            Err(e) => {
                log::error!("Skipping profile {} due to generation error: {:?}", profile, e);
                skipped_generation += 1;
            }
        }
    }

    log::info!(
        "Campaign finished: {} messages generated, {} profiles skipped for thin content, {} for generation failures",
        results.len(),
        skipped_thin,
        skipped_generation
    );

    Ok(results)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::domain::campaign::{CampaignContext, GeneratedMessage};
    use crate::domain::prospect::{ProspectUrl, SearchQuery};
    use crate::services::prospect_search::SearchOutcome;

    use super::{run_campaign, CampaignError, MessageComposer, ProspectSource};

    fn query() -> SearchQuery {
        SearchQuery {
            job_title: "Head of HR".to_string(),
            location: "India".to_string(),
            max_results: 3,
        }
    }

    fn campaign() -> CampaignContext {
        CampaignContext {
            product_description: "Onboarding automation".to_string(),
            target_industry: "SaaS".to_string(),
            ideal_job_roles: "Head of HR".to_string(),
            outreach_goal: "Book a call".to_string(),
            brand_voice: "Friendly".to_string(),
        }
    }

    fn profile(slug: &str) -> ProspectUrl {
        ProspectUrl::parse(&format!("https://www.linkedin.com/in/{}", slug)).unwrap()
    }

    struct StubSource {
        outcome: SearchOutcome,
        texts: HashMap<String, String>,
        extract_calls: AtomicUsize,
    }

    impl StubSource {
        fn found(profiles: Vec<ProspectUrl>, texts: Vec<(&str, String)>) -> Self {
            StubSource {
                outcome: SearchOutcome::Found(profiles),
                texts: texts
                    .into_iter()
                    .map(|(slug, text)| (profile(slug).as_str().to_string(), text))
                    .collect(),
                extract_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ProspectSource for StubSource {
        async fn search(&self, _query: &SearchQuery) -> SearchOutcome {
            match &self.outcome {
                SearchOutcome::Found(profiles) => SearchOutcome::Found(profiles.clone()),
                SearchOutcome::NotFound => SearchOutcome::NotFound,
                SearchOutcome::Failed(reason) => SearchOutcome::Failed(reason.clone()),
            }
        }

        async fn extract(&self, profile: &ProspectUrl) -> String {
            self.extract_calls.fetch_add(1, Ordering::SeqCst);
            self.texts
                .get(profile.as_str())
                .cloned()
                .unwrap_or_default()
        }
    }

    struct StubComposer {
        compose_calls: AtomicUsize,
        fail_on_text_containing: Option<String>,
    }

    impl StubComposer {
        fn new() -> Self {
            StubComposer {
                compose_calls: AtomicUsize::new(0),
                fail_on_text_containing: None,
            }
        }
    }

    #[async_trait]
    impl MessageComposer for StubComposer {
        async fn compose(
            &self,
            profile_text: &str,
            _campaign: &CampaignContext,
        ) -> anyhow::Result<GeneratedMessage> {
            self.compose_calls.fetch_add(1, Ordering::SeqCst);

            if let Some(marker) = &self.fail_on_text_containing {
                if profile_text.contains(marker.as_str()) {
                    anyhow::bail!("model returned unparseable output");
                }
            }

            Ok(GeneratedMessage {
                thought_process: "hook found".to_string(),
                personalized_message: "Hi there!".to_string(),
            })
        }
    }

    fn long_text(seed: &str) -> String {
        format!("{} ", seed).repeat(60)
    }

    #[tokio::test]
    async fn empty_search_is_no_prospects_with_zero_downstream_calls() {
        let source = StubSource {
            outcome: SearchOutcome::NotFound,
            texts: HashMap::new(),
            extract_calls: AtomicUsize::new(0),
        };
        let composer = StubComposer::new();

        let result = run_campaign(&source, &composer, &query(), &campaign()).await;

        assert!(matches!(result, Err(CampaignError::NoProspects)));
        assert_eq!(source.extract_calls.load(Ordering::SeqCst), 0);
        assert_eq!(composer.compose_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failed_search_aborts_the_campaign() {
        let source = StubSource {
            outcome: SearchOutcome::Failed("results container never appeared".to_string()),
            texts: HashMap::new(),
            extract_calls: AtomicUsize::new(0),
        };
        let composer = StubComposer::new();

        let result = run_campaign(&source, &composer, &query(), &campaign()).await;

        match result {
            Err(CampaignError::SearchFailed(reason)) => {
                assert!(reason.contains("results container"))
            }
            other => panic!("expected SearchFailed, got {:?}", other.map(|r| r.len())),
        }
        assert_eq!(composer.compose_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn thin_profiles_are_skipped_without_generation() {
        let source = StubSource::found(
            vec![profile("alpha"), profile("beta"), profile("gamma")],
            vec![
                ("alpha", long_text("alpha profile")),
                ("beta", "x".repeat(150)),
                ("gamma", long_text("gamma profile")),
            ],
        );
        let composer = StubComposer::new();

        let results = run_campaign(&source, &composer, &query(), &campaign())
            .await
            .unwrap();

        assert_eq!(source.extract_calls.load(Ordering::SeqCst), 3);
        assert_eq!(composer.compose_calls.load(Ordering::SeqCst), 2);
        assert_eq!(results.len(), 2);
        assert_eq!(
            results[0].profile_url.as_str(),
            "https://www.linkedin.com/in/alpha"
        );
        assert_eq!(
            results[1].profile_url.as_str(),
            "https://www.linkedin.com/in/gamma"
        );
    }

    #[tokio::test]
    async fn generation_failure_skips_that_profile_only() {
        let source = StubSource::found(
            vec![profile("alpha"), profile("beta"), profile("gamma")],
            vec![
                ("alpha", long_text("alpha profile")),
                ("beta", long_text("broken profile")),
                ("gamma", long_text("gamma profile")),
            ],
        );
        let composer = StubComposer {
            compose_calls: AtomicUsize::new(0),
            fail_on_text_containing: Some("broken".to_string()),
        };

        let results = run_campaign(&source, &composer, &query(), &campaign())
            .await
            .unwrap();

        assert_eq!(composer.compose_calls.load(Ordering::SeqCst), 3);
        assert_eq!(results.len(), 2);
        assert_eq!(
            results[1].profile_url.as_str(),
            "https://www.linkedin.com/in/gamma"
        );
    }

    #[tokio::test]
    async fn results_keep_discovery_order() {
        let source = StubSource::found(
            vec![profile("first"), profile("second")],
            vec![
                ("first", long_text("first profile")),
                ("second", long_text("second profile")),
            ],
        );
        let composer = StubComposer::new();

        let results = run_campaign(&source, &composer, &query(), &campaign())
            .await
            .unwrap();

        let order: Vec<&str> = results.iter().map(|r| r.profile_url.as_str()).collect();
        assert_eq!(
            order,
            vec![
                "https://www.linkedin.com/in/first",
                "https://www.linkedin.com/in/second",
            ]
        );
    }
}
