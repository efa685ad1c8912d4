use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::types::ProgressRecord;
use crate::core::feed::types::FeedItem;

/// Size token every emitted cover URL carries.
pub const COVER_SIZE_TOKEN: &str = "._SX180_";

static PROGRESS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"is ([0-9]+)% done with (.+)").expect("Invalid progress pattern")
});

static COVER_SOURCE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"src="([^"]+)""#).expect("Invalid cover source pattern"));

static COVER_SIZE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\._S[XY][0-9]+_").expect("Invalid cover size pattern"));

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("title does not match the progress pattern")]
    NoProgressMatch,
    #[error("progress value {0:?} is not a valid integer")]
    InvalidProgress(String),
    #[error("item body has no image source")]
    NoCoverImage,
}

/// Collapses whitespace runs to a single space and trims both ends.
pub fn normalize_title(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Coarse pre-filter applied before the progress pattern.
pub fn is_progress_title(title: &str) -> bool {
    title.contains("is") && title.contains("done with")
}

/// Returns `(progress, book title)` for a normalized title.
pub fn parse_progress_title(title: &str) -> Result<(u32, String), ExtractError> {
    let captures = PROGRESS_PATTERN
        .captures(title)
        .ok_or(ExtractError::NoProgressMatch)?;
    let digits = &captures[1];
    let progress = digits
        .parse::<u32>()
        .map_err(|_| ExtractError::InvalidProgress(digits.to_string()))?;
    let book_title = captures[2].trim().to_string();
    if book_title.is_empty() {
        return Err(ExtractError::NoProgressMatch);
    }
    Ok((progress, book_title))
}

pub fn decode_entities(html: &str) -> Cow<'_, str> {
    html_escape::decode_html_entities(html)
}

/// First `src="..."` attribute value in the given HTML.
pub fn find_cover_source(html: &str) -> Option<&str> {
    COVER_SOURCE_PATTERN
        .captures(html)
        .and_then(|captures| captures.get(1))
        .map(|source| source.as_str())
}

/// Replaces the first `._SX<n>_` / `._SY<n>_` token with the display size.
/// URLs without a size token come back unchanged.
pub fn rewrite_cover_size(url: &str) -> String {
    COVER_SIZE_PATTERN
        .replace(url, COVER_SIZE_TOKEN)
        .into_owned()
}

/// Builds a record from an item whose title has already gone through [`normalize_title`].
pub fn extract_record(clean_title: &str, item: &FeedItem) -> Result<ProgressRecord, ExtractError> {
    let (progress, title) = parse_progress_title(clean_title)?;

    let body = decode_entities(item.body_html().unwrap_or_default());
    let cover = find_cover_source(&body).ok_or(ExtractError::NoCoverImage)?;

    Ok(ProgressRecord {
        title,
        progress,
        cover_image: rewrite_cover_size(cover),
    })
}

/// Turns feed items into progress records, keeping feed order.
///
/// Items that fail extraction are logged and skipped. When two items yield the
/// same book title only the first one is kept.
pub fn extract_progress_records(items: &[FeedItem]) -> Vec<ProgressRecord> {
    let mut seen_titles = HashSet::new();
    let mut records = Vec::new();

    for item in items {
        let Some(raw_title) = item.title.as_deref() else {
            tracing::debug!("Skipping item without a title");
            continue;
        };
        let clean_title = normalize_title(raw_title);
        if !is_progress_title(&clean_title) {
            continue;
        }

        match extract_record(&clean_title, item) {
            Ok(record) => {
                if seen_titles.insert(record.title.clone()) {
                    records.push(record);
                } else {
                    tracing::debug!(title = %record.title, "Skipping duplicate progress update");
                }
            }
            Err(error) => {
                tracing::warn!(
                    title = %clean_title,
                    description = item.body_html().unwrap_or_default(),
                    %error,
                    "Skipping item"
                );
            }
        }
    }

    records
}
