use feed_rs::model::Entry;

use super::types::FeedItem;

#[derive(Debug, thiserror::Error)]
pub enum FeedParseError {
    #[error("feed payload is empty")]
    EmptyPayload,
    #[error("xml feed parse error: {0}")]
    Xml(#[from] feed_rs::parser::ParseFeedError),
}

/// Parses a raw feed document into its items, in document order.
///
/// The result is always a list, whether the channel holds zero, one or many items.
pub fn parse_feed_bytes(raw: &[u8]) -> Result<Vec<FeedItem>, FeedParseError> {
    let trimmed = trim_leading_ascii_whitespace(raw);
    if trimmed.is_empty() {
        return Err(FeedParseError::EmptyPayload);
    }
    let feed = feed_rs::parser::parse(trimmed)?;
    Ok(feed.entries.iter().map(item_from_entry).collect())
}

fn item_from_entry(entry: &Entry) -> FeedItem {
    let title = entry.title.as_ref().map(|text| text.content.clone());
    let description = entry.summary.as_ref().map(|text| text.content.clone());
    let content_encoded = entry
        .content
        .as_ref()
        .and_then(|content| content.body.clone());

    FeedItem {
        title,
        description,
        content_encoded,
    }
}

fn trim_leading_ascii_whitespace(raw: &[u8]) -> &[u8] {
    let mut index = 0;
    while index < raw.len() && raw[index].is_ascii_whitespace() {
        index += 1;
    }
    &raw[index..]
}
