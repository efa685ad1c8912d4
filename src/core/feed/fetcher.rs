use reqwest::header::CONTENT_TYPE;

use super::parser::parse_feed_bytes;
use super::types::FeedItem;

#[derive(Debug, Clone)]
pub struct FetchedFeed {
    pub body: Vec<u8>,
    pub content_type: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status code: {0}")]
    HttpStatus(u16),
}

pub async fn fetch_feed(client: &reqwest::Client, url: &str) -> Result<FetchedFeed, FetchError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus(status.as_u16()));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string);
    let body = response.bytes().await?.to_vec();

    Ok(FetchedFeed { body, content_type })
}

/// Fetches and parses the feed. Transport, status and parse failures are logged
/// and collapse to an empty list; this never fails.
pub async fn fetch_feed_items(client: &reqwest::Client, url: &str) -> Vec<FeedItem> {
    let fetched = match fetch_feed(client, url).await {
        Ok(fetched) => fetched,
        Err(error) => {
            tracing::error!(%url, %error, "Error fetching RSS feed");
            return Vec::new();
        }
    };

    match parse_feed_bytes(&fetched.body) {
        Ok(items) => {
            tracing::debug!(
                %url,
                content_type = fetched.content_type.as_deref().unwrap_or("unknown"),
                item_count = items.len(),
                "parsed RSS feed"
            );
            items
        }
        Err(error) => {
            tracing::error!(%url, %error, "Error parsing RSS feed");
            Vec::new()
        }
    }
}
