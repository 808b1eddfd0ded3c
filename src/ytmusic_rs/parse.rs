use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::ports::catalog::{AlbumRef, ArtistRef, Candidate, SearchFilter, Thumbnail};

static DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(:\d{2}){1,2}$").expect("duration pattern is valid"));

/// Labels the unfiltered search puts in front of each result's details.
const RESULT_TYPE_LABELS: [&str; 12] = [
    "song", "video", "album", "artist", "playlist", "single", "ep", "episode", "podcast",
    "profile", "channel", "station",
];

const ARTIST_BROWSE_PREFIX: &str = "UC";
const ALBUM_BROWSE_PREFIX: &str = "MPRE";

const PLAY_BUTTON_VIDEO_ID: &str = "/overlay/musicItemThumbnailOverlayRenderer/content/musicPlayButtonRenderer/playNavigationEndpoint/watchEndpoint/videoId";

/// A text run, optionally linking to a browse page or a video.
#[derive(Debug)]
struct Run<'a> {
    text: &'a str,
    browse_id: Option<&'a str>,
    video_id: Option<&'a str>,
}

#[derive(Debug, Default)]
struct Details {
    artists: Vec<ArtistRef>,
    album: Option<AlbumRef>,
    duration: Option<String>,
    label: Option<String>,
}

fn runs(text: Option<&Value>) -> Vec<Run<'_>> {
    text.and_then(|text| text.get("runs"))
        .and_then(Value::as_array)
        .map(|runs| {
            runs.iter()
                .filter_map(|run| {
                    Some(Run {
                        text: run.get("text")?.as_str()?,
                        browse_id: run
                            .pointer("/navigationEndpoint/browseEndpoint/browseId")
                            .and_then(Value::as_str),
                        video_id: run
                            .pointer("/navigationEndpoint/watchEndpoint/videoId")
                            .and_then(Value::as_str),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

fn flex_column_runs(renderer: &Value, index: usize) -> Vec<Run<'_>> {
    runs(
        renderer
            .get("flexColumns")
            .and_then(|columns| columns.get(index))
            .and_then(|column| column.pointer("/musicResponsiveListItemFlexColumnRenderer/text")),
    )
}

fn is_separator(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || trimmed == "•"
}

fn result_type_label(text: &str) -> Option<String> {
    let label = text.trim().to_lowercase();
    RESULT_TYPE_LABELS
        .contains(&label.as_str())
        .then_some(label)
}

/// Split a details line like `Song • Artist • Album • 3:24` into its parts.
fn parse_details(runs: &[Run<'_>]) -> Details {
    let mut details = Details::default();
    let mut unlinked = Vec::new();

    for (position, run) in runs.iter().filter(|run| !is_separator(run.text)).enumerate() {
        let text = run.text.trim();
        match run.browse_id {
            Some(id) if id.starts_with(ARTIST_BROWSE_PREFIX) => details.artists.push(ArtistRef {
                name: text.to_string(),
                id: Some(id.to_string()),
            }),
            Some(id) if id.starts_with(ALBUM_BROWSE_PREFIX) => {
                details.album = Some(AlbumRef {
                    name: text.to_string(),
                    id: Some(id.to_string()),
                })
            }
            _ if DURATION.is_match(text) => details.duration = Some(text.to_string()),
            None if position == 0 && result_type_label(text).is_some() => {
                details.label = result_type_label(text);
            }
            _ => unlinked.push(text),
        }
    }

    // Channels without a linked artist page only show up as plain text.
    if details.artists.is_empty() {
        if let Some(name) = unlinked.first() {
            details.artists.push(ArtistRef {
                name: name.to_string(),
                id: None,
            });
        }
    }

    details
}

/// Convert `m:ss` or `h:mm:ss` into seconds.
pub fn parse_duration_seconds(duration: &str) -> Option<u64> {
    if !DURATION.is_match(duration) {
        return None;
    }
    duration
        .split(':')
        .try_fold(0u64, |total, part| {
            total.checked_mul(60)?.checked_add(part.parse().ok()?)
        })
}

fn parse_thumbnails(renderer: &Value) -> Vec<Thumbnail> {
    renderer
        .pointer("/thumbnail/musicThumbnailRenderer/thumbnail/thumbnails")
        .and_then(Value::as_array)
        .map(|thumbnails| {
            thumbnails
                .iter()
                .filter_map(|thumbnail| serde_json::from_value(thumbnail.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

fn result_type(filter: SearchFilter, label: Option<String>, has_video: bool) -> Option<String> {
    match filter {
        SearchFilter::Songs => Some("song".to_string()),
        SearchFilter::Videos => Some("video".to_string()),
        SearchFilter::None => label.or_else(|| has_video.then(|| "song".to_string())),
    }
}

fn build_candidate(
    video_id: Option<&str>,
    title: &str,
    details: Details,
    thumbnails: Vec<Thumbnail>,
    filter: SearchFilter,
) -> Candidate {
    let duration_seconds = details
        .duration
        .as_deref()
        .and_then(parse_duration_seconds);

    Candidate {
        video_id: video_id.unwrap_or_default().to_string(),
        title: title.to_string(),
        artists: details.artists,
        album: details.album,
        thumbnails,
        duration: details.duration,
        duration_seconds,
        result_type: result_type(filter, details.label, video_id.is_some()),
    }
}

fn parse_list_item(renderer: &Value, filter: SearchFilter) -> Option<Candidate> {
    let title_runs = flex_column_runs(renderer, 0);
    let title_run = title_runs.first()?;

    let video_id = renderer
        .pointer("/playlistItemData/videoId")
        .or_else(|| renderer.pointer(PLAY_BUTTON_VIDEO_ID))
        .and_then(Value::as_str)
        .or(title_run.video_id);

    let mut details = parse_details(&flex_column_runs(renderer, 1));
    if details.duration.is_none() {
        details.duration = renderer
            .pointer("/fixedColumns/0/musicResponsiveListItemFixedColumnRenderer/text/runs/0/text")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| DURATION.is_match(text))
            .map(str::to_string);
    }

    Some(build_candidate(
        video_id,
        title_run.text,
        details,
        parse_thumbnails(renderer),
        filter,
    ))
}

/// The highlighted "top result" card of unfiltered searches.
fn parse_card(card: &Value, filter: SearchFilter) -> Option<Candidate> {
    let title_runs = runs(card.get("title"));
    let title_run = title_runs.first()?;
    let video_id = title_run.video_id?;
    let details = parse_details(&runs(card.get("subtitle")));

    Some(build_candidate(
        Some(video_id),
        title_run.text,
        details,
        parse_thumbnails(card),
        filter,
    ))
}

fn list_items(items: Option<&Value>, filter: SearchFilter) -> Vec<Candidate> {
    items
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("musicResponsiveListItemRenderer"))
                .filter_map(|renderer| parse_list_item(renderer, filter))
                .collect()
        })
        .unwrap_or_default()
}

fn sections(response: &Value) -> Vec<&Value> {
    let section_lists: Vec<&Value> =
        match response.pointer("/contents/tabbedSearchResultsRenderer/tabs") {
            Some(tabs) => tabs
                .as_array()
                .into_iter()
                .flatten()
                .filter_map(|tab| tab.pointer("/tabRenderer/content/sectionListRenderer/contents"))
                .collect(),
            None => response
                .pointer("/contents/sectionListRenderer/contents")
                .into_iter()
                .collect(),
        };

    section_lists
        .into_iter()
        .filter_map(Value::as_array)
        .flatten()
        .collect()
}

/// Extract candidates, in page order, from a raw search response.
///
/// Entries that cannot be read are skipped; an unexpected response shape
/// yields no candidates rather than an error.
pub fn parse_search_response(response: &Value, filter: SearchFilter) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for section in sections(response) {
        if let Some(card) = section.get("musicCardShelfRenderer") {
            candidates.extend(parse_card(card, filter));
            candidates.extend(list_items(card.get("contents"), filter));
        }
        candidates.extend(list_items(
            section.pointer("/musicShelfRenderer/contents"),
            filter,
        ));
    }

    candidates
}
