use color_eyre::eyre::Result;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Category filter passed to the catalog search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchFilter {
    Songs,
    Videos,
    /// No filter, the catalog mixes every result kind.
    None,
}

impl SearchFilter {
    /// Wire name of the filter, `None` when unfiltered.
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            SearchFilter::Songs => Some("songs"),
            SearchFilter::Videos => Some("videos"),
            SearchFilter::None => None,
        }
    }
}

impl std::fmt::Display for SearchFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str().unwrap_or("none"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistRef {
    pub name: String,
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumRef {
    pub name: String,
    pub id: Option<String>,
}

/// A single image variant, serialized back to clients as-is.
///
/// Missing, null or malformed fields read as an empty url or a zero size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    #[serde(default, deserialize_with = "lenient_url")]
    pub url: String,
    #[serde(default, deserialize_with = "lenient_dimension")]
    pub width: u32,
    #[serde(default, deserialize_with = "lenient_dimension")]
    pub height: u32,
}

fn lenient_url<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().unwrap_or_default().to_string())
}

fn lenient_dimension<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let dimension = match value.as_u64() {
        Some(pixels) => u32::try_from(pixels).unwrap_or(u32::MAX),
        None => value
            .as_f64()
            .filter(|pixels| pixels.is_finite() && *pixels > 0.0)
            .map(|pixels| pixels.min(f64::from(u32::MAX)) as u32)
            .unwrap_or(0),
    };
    Ok(dimension)
}

/// Decoupled representation of a raw catalog search result.
///
/// Fields mirror what the catalog returns and may be empty; the search
/// pipeline decides which candidates are usable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidate {
    pub video_id: String,
    pub title: String,
    pub artists: Vec<ArtistRef>,
    pub album: Option<AlbumRef>,
    pub thumbnails: Vec<Thumbnail>,
    /// Display duration such as `3:24`.
    pub duration: Option<String>,
    pub duration_seconds: Option<u64>,
    /// Result kind tag (`song`, `video`, `playlist`, ...).
    pub result_type: Option<String>,
}

/// Port trait wrapping the music catalog search used by the search pipeline.
///
/// Implementations live in `services::search::client` (production) or test mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    async fn search(&self, query: &str, filter: SearchFilter, limit: usize)
    -> Result<Vec<Candidate>>;
}
