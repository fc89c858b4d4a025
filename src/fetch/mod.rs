//! Lichess API client.
//!
//! Fetches user profiles and NDJSON game exports from lichess.org. Games are
//! parsed line by line and sorted chronologically before being handed to the
//! aggregator; retry/backoff is deliberately out of scope.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::config::LichessConfig;
use crate::models::GameRecord;

/// Errors that can occur while talking to Lichess.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("user not found")]
    UserNotFound,

    #[error("no games found")]
    NoGames,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Source of profiles and game histories.
///
/// The HTTP handlers depend on this seam instead of the concrete client so
/// tests can substitute canned data.
#[async_trait]
pub trait GamesProvider: Send + Sync {
    /// Raw profile JSON for verbatim passthrough.
    async fn profile(&self, username: &str) -> Result<Value, FetchError>;

    /// The user's games in the configured window, sorted by creation time
    /// ascending.
    async fn games(&self, username: &str) -> Result<Vec<GameRecord>, FetchError>;
}

/// HTTP client for the Lichess API.
pub struct LichessClient {
    client: Client,
    config: LichessConfig,
}

impl LichessClient {
    /// Create a new client with the given configuration.
    pub fn new(config: LichessConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("lichess-stats/0.1.0")),
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        self.config
            .base_url
            .join(path)
            .map_err(|e| FetchError::InvalidUrl(format!("{path}: {e}")))
    }
}

#[async_trait]
impl GamesProvider for LichessClient {
    async fn profile(&self, username: &str) -> Result<Value, FetchError> {
        let url = self.endpoint(&format!("/api/user/{username}"))?;
        debug!("Fetching profile {}", url);

        let response = self.client.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(FetchError::UserNotFound);
        }

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        Ok(response.json().await?)
    }

    async fn games(&self, username: &str) -> Result<Vec<GameRecord>, FetchError> {
        let url = self.endpoint(&format!("/api/games/user/{username}"))?;
        info!("Fetching games for {}", username);

        let response = self
            .client
            .get(url)
            .query(&[
                ("since", self.config.since_ms.to_string()),
                ("max", self.config.max_games.to_string()),
                ("opening", "true".to_string()),
                ("pgnInJson", "true".to_string()),
            ])
            .header(ACCEPT, "application/x-ndjson")
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(FetchError::UserNotFound);
        }

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.text().await?;
        let mut games = parse_ndjson(&body)?;
        games.sort_by_key(|g| g.created_at);

        debug!("Fetched {} games for {}", games.len(), username);
        Ok(games)
    }
}

/// Parse a newline-delimited JSON game export.
///
/// An empty body means the user has no games in the window, which the
/// handlers surface as a 404 rather than an empty summary.
pub fn parse_ndjson(body: &str) -> Result<Vec<GameRecord>, FetchError> {
    let body = body.trim();
    if body.is_empty() {
        return Err(FetchError::NoGames);
    }

    body.lines()
        .map(|line| serde_json::from_str(line).map_err(FetchError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, created_at: i64) -> String {
        format!(r#"{{"id": "{id}", "players": {{}}, "createdAt": {created_at}}}"#)
    }

    #[test]
    fn test_parse_ndjson() {
        let body = format!("{}\n{}\n", line("g1", 100), line("g2", 200));
        let games = parse_ndjson(&body).unwrap();

        assert_eq!(games.len(), 2);
        assert_eq!(games[0].id, "g1");
        assert_eq!(games[1].id, "g2");
    }

    #[test]
    fn test_parse_ndjson_empty_body() {
        assert!(matches!(parse_ndjson(""), Err(FetchError::NoGames)));
        assert!(matches!(parse_ndjson("  \n "), Err(FetchError::NoGames)));
    }

    #[test]
    fn test_parse_ndjson_bad_line_fails() {
        let body = format!("{}\nnot json\n", line("g1", 100));
        assert!(matches!(parse_ndjson(&body), Err(FetchError::Json(_))));
    }

    #[test]
    fn test_games_sort_key_is_created_at() {
        let body = format!("{}\n{}\n{}", line("g3", 300), line("g1", 100), line("g2", 200));
        let mut games = parse_ndjson(&body).unwrap();
        games.sort_by_key(|g| g.created_at);

        let ids: Vec<&str> = games.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["g1", "g2", "g3"]);
    }

    #[test]
    fn test_client_construction() {
        let client = LichessClient::new(LichessConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let client = LichessClient::new(LichessConfig::default()).unwrap();
        let url = client.endpoint("/api/user/alice").unwrap();
        assert_eq!(url.as_str(), "https://lichess.org/api/user/alice");
    }
}
