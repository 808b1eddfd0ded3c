use serde::Serialize;

use crate::ports::catalog::Thumbnail;
use crate::services::search::ranking::{ScoredCandidate, round_score};
use crate::services::search::thumbnail::best_thumbnail;

/// Name of the scoring scheme reported in detailed responses.
pub const SEARCH_STRATEGY_NAME: &str = "enhanced_track_artist_album";

/// A ranked track as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackResult {
    pub video_id: String,
    pub title: String,
    pub artists: Vec<String>,
    pub thumbnail: Option<String>,
    pub thumbnails: Vec<Thumbnail>,
    pub relevance_score: f64,
    pub duration: Option<u64>,
    pub album: Option<String>,
    pub result_type: String,
}

impl From<ScoredCandidate> for TrackResult {
    fn from(scored: ScoredCandidate) -> Self {
        let ScoredCandidate { candidate, score } = scored;
        Self {
            thumbnail: best_thumbnail(&candidate.thumbnails),
            artists: candidate
                .artists
                .into_iter()
                .map(|artist| artist.name)
                .filter(|name| !name.is_empty())
                .collect(),
            album: candidate
                .album
                .map(|album| album.name)
                .filter(|name| !name.is_empty()),
            relevance_score: round_score(score),
            duration: candidate.duration_seconds,
            result_type: candidate.result_type.unwrap_or_else(|| "song".to_string()),
            video_id: candidate.video_id,
            title: candidate.title,
            thumbnails: candidate.thumbnails,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResults {
    pub results: Vec<TrackResult>,
    pub query: String,
    /// Candidates produced by the winning strategy, before truncation.
    pub total_found: usize,
    pub search_strategy: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoResults {
    pub results: Vec<TrackResult>,
    pub message: String,
}

impl NoResults {
    pub fn for_query(query: &str) -> Self {
        Self {
            results: Vec::new(),
            message: format!("No results found for: {}", query),
        }
    }
}

/// Full payload of a search, as served by the detailed endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchResponse {
    Ranked(RankedResults),
    NoResults(NoResults),
}

impl SearchResponse {
    pub fn results(&self) -> &[TrackResult] {
        match self {
            SearchResponse::Ranked(ranked) => &ranked.results,
            SearchResponse::NoResults(empty) => &empty.results,
        }
    }

    /// The single-result shape older clients expect, if anything was found.
    pub fn to_compat(&self) -> Option<CompatResponse> {
        let first = self.results().first()?;
        Some(CompatResponse {
            results: vec![CompatTrack {
                video_id: first.video_id.clone(),
                thumbnails: first.thumbnails.clone(),
                title: first.title.clone(),
                artists: first.artists.clone(),
                thumbnail: first.thumbnail.clone(),
                album: first.album.clone(),
            }],
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatTrack {
    pub video_id: String,
    pub thumbnails: Vec<Thumbnail>,
    pub title: String,
    pub artists: Vec<String>,
    pub thumbnail: Option<String>,
    pub album: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompatResponse {
    pub results: Vec<CompatTrack>,
}

/// Error payload shared by the HTTP server and the CLI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
