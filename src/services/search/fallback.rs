use crate::ports::catalog::{Candidate, CatalogClient, SearchFilter};

/// A (filter, limit) pair tried against the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStrategy {
    pub filter: SearchFilter,
    pub limit: usize,
}

impl std::fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (limit {})", self.filter, self.limit)
    }
}

/// Strategies in the order they are tried. The first one producing an
/// acceptable candidate wins.
pub const SEARCH_STRATEGIES: [SearchStrategy; 3] = [
    SearchStrategy {
        filter: SearchFilter::Songs,
        limit: 5,
    },
    SearchStrategy {
        filter: SearchFilter::Videos,
        limit: 3,
    },
    SearchStrategy {
        filter: SearchFilter::None,
        limit: 2,
    },
];

/// Result kinds the catalog may surface that are not playable tracks.
const EXCLUDED_RESULT_TYPES: [&str; 3] = ["playlist", "channel", "podcast"];

/// Outcome of a single strategy call.
#[derive(Debug)]
pub enum StrategyOutcome {
    Accepted(Vec<Candidate>),
    Empty,
    Failed(String),
}

/// Candidates from the winning strategy, if any.
#[derive(Debug, Default)]
pub struct FallbackOutcome {
    pub strategy: Option<SearchStrategy>,
    pub candidates: Vec<Candidate>,
}

pub fn is_acceptable(candidate: &Candidate) -> bool {
    !candidate.video_id.is_empty()
        && !candidate.title.is_empty()
        && !candidate
            .result_type
            .as_deref()
            .is_some_and(|kind| EXCLUDED_RESULT_TYPES.contains(&kind))
}

async fn run_strategy(
    client: &dyn CatalogClient,
    query: &str,
    strategy: SearchStrategy,
) -> StrategyOutcome {
    match client.search(query, strategy.filter, strategy.limit).await {
        Ok(results) => {
            let accepted: Vec<Candidate> = results
                .into_iter()
                .filter(is_acceptable)
                .take(strategy.limit)
                .collect();
            if accepted.is_empty() {
                StrategyOutcome::Empty
            } else {
                StrategyOutcome::Accepted(accepted)
            }
        }
        Err(err) => StrategyOutcome::Failed(format!("{err:#}")),
    }
}

/// Try each strategy in order, one call at a time, and return the filtered
/// candidates of the first strategy that yields any. Failed calls are logged
/// and skipped.
pub async fn search_with_fallback(client: &dyn CatalogClient, query: &str) -> FallbackOutcome {
    for strategy in SEARCH_STRATEGIES {
        log::debug!("Trying search strategy {} for '{}'", strategy, query);

        match run_strategy(client, query, strategy).await {
            StrategyOutcome::Accepted(candidates) => {
                log::debug!(
                    "Search strategy {} returned {} candidates",
                    strategy,
                    candidates.len()
                );
                return FallbackOutcome {
                    strategy: Some(strategy),
                    candidates,
                };
            }
            StrategyOutcome::Empty => {
                log::debug!("Search strategy {} returned nothing usable", strategy);
            }
            StrategyOutcome::Failed(reason) => {
                log::warn!("Search strategy {} failed: {}", strategy, reason);
            }
        }
    }

    FallbackOutcome::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::catalog::MockCatalogClient;
    use crate::test_utils::{candidate, candidate_of_type};
    use color_eyre::eyre::eyre;
    use mockall::predicate::{always, eq};

    #[test]
    fn test_is_acceptable() {
        assert!(is_acceptable(&candidate("id1", "Title", &["Artist"])));
        assert!(!is_acceptable(&candidate("", "Title", &["Artist"])));
        assert!(!is_acceptable(&candidate("id1", "", &["Artist"])));
        assert!(is_acceptable(&candidate_of_type("id1", "Title", "song")));
        assert!(is_acceptable(&candidate_of_type("id1", "Title", "video")));
        assert!(!is_acceptable(&candidate_of_type("id1", "Title", "playlist")));
        assert!(!is_acceptable(&candidate_of_type("id1", "Title", "channel")));
        assert!(!is_acceptable(&candidate_of_type("id1", "Title", "podcast")));
    }

    #[tokio::test]
    async fn test_first_strategy_wins() {
        let mut client = MockCatalogClient::new();
        client
            .expect_search()
            .with(eq("believer"), eq(SearchFilter::Songs), eq(5))
            .times(1)
            .returning(|_, _, _| Ok(vec![candidate("song1", "Believer", &["Imagine Dragons"])]));
        client
            .expect_search()
            .with(always(), eq(SearchFilter::Videos), always())
            .never();
        client
            .expect_search()
            .with(always(), eq(SearchFilter::None), always())
            .never();

        let outcome = search_with_fallback(&client, "believer").await;

        assert_eq!(outcome.strategy, Some(SEARCH_STRATEGIES[0]));
        assert_eq!(outcome.candidates.len(), 1);
        assert_eq!(outcome.candidates[0].video_id, "song1");
    }

    #[tokio::test]
    async fn test_empty_songs_falls_back_to_videos_only() {
        let mut client = MockCatalogClient::new();
        client
            .expect_search()
            .with(always(), eq(SearchFilter::Songs), always())
            .times(1)
            .returning(|_, _, _| Ok(vec![]));
        client
            .expect_search()
            .with(always(), eq(SearchFilter::Videos), eq(3))
            .times(1)
            .returning(|_, _, _| {
                Ok(vec![
                    candidate("vid1", "Believer (Official Video)", &["Imagine Dragons"]),
                    candidate("vid2", "Believer (Lyrics)", &["Lyric Channel"]),
                ])
            });
        client
            .expect_search()
            .with(always(), eq(SearchFilter::None), always())
            .never();

        let outcome = search_with_fallback(&client, "believer").await;

        assert_eq!(outcome.strategy.map(|s| s.filter), Some(SearchFilter::Videos));
        let ids: Vec<_> = outcome.candidates.iter().map(|c| c.video_id.as_str()).collect();
        assert_eq!(ids, vec!["vid1", "vid2"]);
    }

    #[tokio::test]
    async fn test_only_unusable_results_fall_through() {
        let mut client = MockCatalogClient::new();
        client
            .expect_search()
            .with(always(), eq(SearchFilter::Songs), always())
            .returning(|_, _, _| {
                Ok(vec![
                    candidate_of_type("pl1", "Believer Mix", "playlist"),
                    candidate_of_type("ch1", "Imagine Dragons", "channel"),
                ])
            });
        client
            .expect_search()
            .with(always(), eq(SearchFilter::Videos), always())
            .returning(|_, _, _| Ok(vec![candidate_of_type("", "No id", "video")]));
        client
            .expect_search()
            .with(always(), eq(SearchFilter::None), eq(2))
            .times(1)
            .returning(|_, _, _| {
                Ok(vec![
                    candidate_of_type("pod1", "A podcast", "podcast"),
                    candidate_of_type("song1", "Believer", "song"),
                ])
            });

        let outcome = search_with_fallback(&client, "believer").await;

        assert_eq!(outcome.strategy.map(|s| s.filter), Some(SearchFilter::None));
        assert_eq!(outcome.candidates.len(), 1);
        assert_eq!(outcome.candidates[0].video_id, "song1");
    }

    #[tokio::test]
    async fn test_provider_failure_is_skipped() {
        let mut client = MockCatalogClient::new();
        client
            .expect_search()
            .with(always(), eq(SearchFilter::Songs), always())
            .returning(|_, _, _| Err(eyre!("connection reset")));
        client
            .expect_search()
            .with(always(), eq(SearchFilter::Videos), always())
            .returning(|_, _, _| Ok(vec![candidate("vid1", "Believer", &["Imagine Dragons"])]));

        let outcome = search_with_fallback(&client, "believer").await;

        assert_eq!(outcome.strategy.map(|s| s.filter), Some(SearchFilter::Videos));
        assert_eq!(outcome.candidates[0].video_id, "vid1");
    }

    #[tokio::test]
    async fn test_all_strategies_exhausted() {
        let mut client = MockCatalogClient::new();
        client
            .expect_search()
            .times(3)
            .returning(|_, _, _| Err(eyre!("rate limited")));

        let outcome = search_with_fallback(&client, "believer").await;

        assert!(outcome.strategy.is_none());
        assert!(outcome.candidates.is_empty());
    }

    #[tokio::test]
    async fn test_results_truncated_to_strategy_limit() {
        let mut client = MockCatalogClient::new();
        client
            .expect_search()
            .with(always(), eq(SearchFilter::Songs), always())
            .returning(|_, _, _| {
                Ok((0..8)
                    .map(|i| candidate(&format!("id{i}"), "Believer", &["Imagine Dragons"]))
                    .collect())
            });

        let outcome = search_with_fallback(&client, "believer").await;

        assert_eq!(outcome.candidates.len(), 5);
        assert_eq!(outcome.candidates[0].video_id, "id0");
        assert_eq!(outcome.candidates[4].video_id, "id4");
    }
}
