pub mod client;
pub mod error;
pub mod fallback;
pub mod normalize;
pub mod ranking;
pub mod thumbnail;
pub mod types;

use std::sync::Arc;

use crate::ports::catalog::CatalogClient;
use crate::services::search::error::SearchError;
use crate::services::search::fallback::search_with_fallback;
use crate::services::search::normalize::normalize_query;
use crate::services::search::ranking::rank_candidates;
use crate::services::search::types::{
    NoResults, RankedResults, SEARCH_STRATEGY_NAME, SearchResponse, TrackResult,
};

/// Queries shorter than this (after trimming) are rejected.
const MIN_QUERY_CHARS: usize = 2;

/// Runs the search pipeline against an injected catalog client.
///
/// The client is shared by every request and never mutated. A service built
/// without a client answers every search with `ProviderUnavailable`.
#[derive(Clone)]
pub struct SearchService {
    client: Option<Arc<dyn CatalogClient>>,
    max_results: usize,
}

impl SearchService {
    pub fn new(client: Arc<dyn CatalogClient>, max_results: usize) -> Self {
        Self {
            client: Some(client),
            max_results: max_results.max(1),
        }
    }

    pub fn unavailable(max_results: usize) -> Self {
        Self {
            client: None,
            max_results: max_results.max(1),
        }
    }

    pub fn is_available(&self) -> bool {
        self.client.is_some()
    }

    pub async fn search(&self, query: &str) -> Result<SearchResponse, SearchError> {
        let client = self
            .client
            .as_deref()
            .ok_or(SearchError::ProviderUnavailable)?;

        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Err(SearchError::EmptyQuery);
        }

        let search_query = normalize_query(query);
        let outcome = search_with_fallback(client, &search_query).await;

        if outcome.candidates.is_empty() {
            log::info!("No results found for '{}'", query);
            return Ok(SearchResponse::NoResults(NoResults::for_query(query)));
        }

        let total_found = outcome.candidates.len();
        let results: Vec<TrackResult> = rank_candidates(outcome.candidates, query, self.max_results)
            .into_iter()
            .map(TrackResult::from)
            .collect();

        log::info!(
            "Search for '{}' matched {} candidates via {}, returning {}",
            query,
            total_found,
            outcome
                .strategy
                .map(|strategy| strategy.to_string())
                .unwrap_or_default(),
            results.len()
        );

        Ok(SearchResponse::Ranked(RankedResults {
            results,
            query: query.to_string(),
            total_found,
            search_strategy: SEARCH_STRATEGY_NAME.to_string(),
        }))
    }
}
