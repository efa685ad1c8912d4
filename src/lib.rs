pub mod core;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::core::config::AppConfig;
use crate::core::feed::fetcher::fetch_feed_items;
use crate::core::progress::extractor::extract_progress_records;
use crate::core::progress::samples;
use crate::core::progress::types::ProgressRecord;

#[derive(Debug, Clone)]
pub struct AppState {
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid feed url {url:?}: {reason}")]
    InvalidFeedUrl { url: String, reason: String },
    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to fetch book progress" })),
        )
            .into_response()
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/currently-reading", get(currently_reading))
        .route("/testThreeItems", get(test_three_items))
        .route("/testTwoItems", get(test_two_items))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the configured host and port. The host may be a name; it is resolved here.
pub async fn bind_listener(config: &AppConfig) -> std::io::Result<tokio::net::TcpListener> {
    tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await
}

pub async fn run(config: AppConfig) -> std::io::Result<()> {
    let listener = bind_listener(&config).await?;
    let app = create_router(AppState::new(config));

    tracing::info!("Server running at http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn currently_reading(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProgressRecord>>, ApiError> {
    let books = load_progress_records(&state.config)
        .await
        .inspect_err(|error| tracing::error!(%error, "Error fetching book progress"))?;
    tracing::info!("Fetched {} items from RSS feed.", books.len());
    Ok(Json(books))
}

async fn test_three_items() -> Json<Vec<ProgressRecord>> {
    Json(samples::three_items())
}

async fn test_two_items() -> Json<Vec<ProgressRecord>> {
    Json(samples::two_items())
}

/// One fetch/parse/extract cycle. Upstream failures come back as an empty list;
/// only a bad feed URL or an unusable HTTP client is an error here.
async fn load_progress_records(config: &AppConfig) -> Result<Vec<ProgressRecord>, ApiError> {
    let feed_url =
        reqwest::Url::parse(&config.feed_url).map_err(|error| ApiError::InvalidFeedUrl {
            url: config.feed_url.clone(),
            reason: error.to_string(),
        })?;
    let client = reqwest::Client::builder()
        .timeout(config.fetch_timeout)
        .build()?;

    let items = fetch_feed_items(&client, feed_url.as_str()).await;
    Ok(extract_progress_records(&items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header::CONTENT_TYPE, Request};
    use serde_json::Value;
    use std::time::Duration;
    use tower::ServiceExt;

    const FIXTURE: &str = include_str!("../fixtures/goodreads-updates.rss.xml");
    const NO_PROGRESS_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Updates</title>
    <item>
      <title>Jane wants to read Piranesi</title>
      <description><![CDATA[<img src="https://example.com/piranesi._SY75_.jpg" />]]></description>
    </item>
  </channel>
</rss>"#;

    async fn spawn_upstream() -> (String, tokio::task::JoinHandle<()>) {
        let app = Router::new()
            .route(
                "/feed.xml",
                get(|| async { ([(CONTENT_TYPE, "application/rss+xml")], FIXTURE) }),
            )
            .route(
                "/quiet.xml",
                get(|| async { ([(CONTENT_TYPE, "application/rss+xml")], NO_PROGRESS_FEED) }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("listener should bind");
        let address = listener.local_addr().expect("local addr should exist");
        let join_handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("server should run");
        });
        (format!("http://{address}"), join_handle)
    }

    fn router_for(feed_url: &str) -> Router {
        create_router(AppState::new(AppConfig {
            feed_url: feed_url.to_string(),
            fetch_timeout: Duration::from_secs(5),
            ..AppConfig::default()
        }))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request must build"),
            )
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body must be readable");
        let body = serde_json::from_slice(&bytes).expect("body must be json");
        (status, body)
    }

    #[tokio::test]
    async fn currently_reading_serves_extracted_records() {
        let (base_url, server_task) = spawn_upstream().await;

        let (status, body) = get_json(
            router_for(&format!("{base_url}/feed.xml")),
            "/currently-reading",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                {
                    "title": "Sunrise on the Reaping",
                    "progress": 61,
                    "coverImage": "https://i.gr-assets.com/images/S/compressed.photo.goodreads.com/books/1729090282l/214333691._SX180_.jpg"
                },
                {
                    "title": "King Leopold's Ghost",
                    "progress": 55,
                    "coverImage": "https://i.gr-assets.com/images/S/compressed.photo.goodreads.com/books/1328315558i/10474352._SX180_.jpg"
                },
                {
                    "title": "Swimming in the Dark",
                    "progress": 38,
                    "coverImage": "https://covers.example.com/books/54496088.jpg"
                }
            ])
        );

        server_task.abort();
    }

    #[tokio::test]
    async fn currently_reading_without_progress_items_is_empty() {
        let (base_url, server_task) = spawn_upstream().await;

        let (status, body) = get_json(
            router_for(&format!("{base_url}/quiet.xml")),
            "/currently-reading",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        server_task.abort();
    }

    #[tokio::test]
    async fn currently_reading_with_unreachable_upstream_is_empty() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("listener should bind");
        let address = listener.local_addr().expect("local addr should exist");
        drop(listener);

        let (status, body) = get_json(
            router_for(&format!("http://{address}/feed.xml")),
            "/currently-reading",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn currently_reading_with_invalid_feed_url_is_server_error() {
        let (status, body) = get_json(router_for("not a url"), "/currently-reading").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to fetch book progress" }));
    }

    #[tokio::test]
    async fn bind_listener_resolves_host_names() {
        let config = AppConfig {
            host: "localhost".to_string(),
            port: 0,
            ..AppConfig::default()
        };
        let listener = bind_listener(&config)
            .await
            .expect("localhost should resolve and bind");
        let address = listener.local_addr().expect("local addr should exist");
        assert!(address.ip().is_loopback());
        assert_ne!(address.port(), 0);
    }

    #[tokio::test]
    async fn fixture_routes_ignore_upstream() {
        let app = router_for("not a url");

        let (status, body) = get_json(app.clone(), "/testThreeItems").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::to_value(samples::three_items()).expect("samples serialize")
        );
        assert_eq!(body[0]["title"], "Sunrise on the Reaping");
        assert_eq!(body[0]["coverImage"], "https://i.gr-assets.com/images/S/compressed.photo.goodreads.com/books/1729090282l/214333691._SX180_.jpg");

        let (status, body) = get_json(app, "/testTwoItems").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(2));
        assert_eq!(body[0]["title"], "King Leopold's Ghost");
        assert_eq!(body[1]["progress"], 38);
    }
}
