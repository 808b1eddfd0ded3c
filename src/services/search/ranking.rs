use std::cmp::Ordering;
use std::collections::HashSet;

use crate::ports::catalog::Candidate;

const TITLE_SUBSTRING_WEIGHT: f64 = 0.6;
const TITLE_OVERLAP_WEIGHT: f64 = 0.4;
const ARTIST_OVERLAP_WEIGHT: f64 = 0.3;
const ARTIST_EXACT_MATCH_BONUS: f64 = 0.2;
const ALBUM_OVERLAP_WEIGHT: f64 = 0.15;
const DURATION_BONUS: f64 = 0.05;
const LONG_TITLE_CHARS: usize = 100;
const LONG_TITLE_PENALTY: f64 = 0.9;

#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub score: f64,
}

/// Fraction of the query words that also appear in `text`.
fn word_overlap(query_words: &HashSet<&str>, text: &str) -> f64 {
    if query_words.is_empty() {
        return 0.0;
    }
    let text_words: HashSet<&str> = text.split_whitespace().collect();
    let shared = query_words.intersection(&text_words).count();
    shared as f64 / query_words.len() as f64
}

/// Score how well a candidate matches the query the user typed.
///
/// The query is compared as given (lower-cased), not in its normalized search
/// form, so punctuation the user typed still counts. Candidate fields are only
/// lower-cased and split on whitespace.
pub fn score_candidate(candidate: &Candidate, original_query: &str) -> f64 {
    let query = original_query.to_lowercase();
    let query_words: HashSet<&str> = query.split_whitespace().collect();
    let mut score = 0.0;

    let title = candidate.title.to_lowercase();
    if !title.is_empty() {
        if title.contains(&query) || query.contains(&title) {
            score += TITLE_SUBSTRING_WEIGHT;
        }
        score += word_overlap(&query_words, &title) * TITLE_OVERLAP_WEIGHT;
    }

    if !candidate.artists.is_empty() {
        let artist_names = candidate
            .artists
            .iter()
            .map(|artist| artist.name.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        score += word_overlap(&query_words, &artist_names) * ARTIST_OVERLAP_WEIGHT;

        for artist in &candidate.artists {
            let name = artist.name.to_lowercase();
            if !name.is_empty() && query.contains(&name) {
                score += ARTIST_EXACT_MATCH_BONUS;
            }
        }
    }

    if let Some(album) = &candidate.album {
        let album_name = album.name.to_lowercase();
        if !album_name.is_empty() {
            score += word_overlap(&query_words, &album_name) * ALBUM_OVERLAP_WEIGHT;
        }
    }

    if title.chars().count() > LONG_TITLE_CHARS {
        score *= LONG_TITLE_PENALTY;
    }

    if candidate.duration_seconds.is_some_and(|seconds| seconds > 0) {
        score += DURATION_BONUS;
    }

    score.clamp(0.0, 1.0)
}

/// Score every candidate, sort by descending score and keep the best `top_n`.
/// Equal scores keep the catalog's order.
pub fn rank_candidates(
    candidates: Vec<Candidate>,
    original_query: &str,
    top_n: usize,
) -> Vec<ScoredCandidate> {
    let mut scored: Vec<ScoredCandidate> = candidates
        .into_iter()
        .map(|candidate| {
            let score = score_candidate(&candidate, original_query);
            ScoredCandidate { candidate, score }
        })
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(top_n);
    scored
}

/// Round a score to three decimals for output.
pub fn round_score(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}
