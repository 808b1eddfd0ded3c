use std::sync::LazyLock;

use regex::Regex;

use crate::ports::catalog::Thumbnail;

static SIZE_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"w\d+-h\d+").expect("size segment pattern is valid"));

const MAX_SIZE_SEGMENT: &str = "w1080-h1080";
const MAX_RES_NAME: &str = "maxresdefault";

fn area(thumbnail: &Thumbnail) -> u64 {
    u64::from(thumbnail.width) * u64::from(thumbnail.height)
}

/// Pick the largest thumbnail by pixel area and rewrite its URL to request
/// the highest resolution variant. The first of several equally large
/// entries wins.
pub fn best_thumbnail(thumbnails: &[Thumbnail]) -> Option<String> {
    let best = thumbnails
        .iter()
        .fold(None::<&Thumbnail>, |best, candidate| match best {
            Some(current) if area(current) >= area(candidate) => Some(current),
            _ => Some(candidate),
        })?;

    Some(upgrade_thumbnail_url(&best.url))
}

/// Rewrite size hints in a thumbnail URL. Unknown URL shapes pass through.
pub fn upgrade_thumbnail_url(url: &str) -> String {
    let upgraded = SIZE_SEGMENT.replace_all(url, MAX_SIZE_SEGMENT);

    if upgraded.contains("mqdefault") {
        upgraded.replace("mqdefault", MAX_RES_NAME)
    } else if upgraded.contains("hqdefault") {
        upgraded.replace("hqdefault", MAX_RES_NAME)
    } else {
        upgraded.into_owned()
    }
}
