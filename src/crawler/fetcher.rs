//! HTTP fetcher
//!
//! One blocking-from-the-worker's-view request per document: build the
//! client once at startup, then `fetch_page` awaits a single GET and
//! classifies the outcome. Failures are values, not errors — the walker
//! records them and moves on.

use crate::config::FetchConfig;
use reqwest::Client;
use std::time::Duration;

/// Result of fetching one document.
#[derive(Debug)]
pub enum FetchOutcome {
    /// 2xx response with its body.
    Success { body: String },

    /// Non-success HTTP status.
    HttpError { status: u16 },

    /// Transport-level failure (timeout, refused connection, TLS, ...).
    NetworkError { error: String },
}

/// Builds the shared HTTP client with the configured user agent and
/// timeouts. A hung remote stalls one worker for at most the request
/// timeout, never the whole pool.
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one page and returns its body or the classified failure.
pub async fn fetch_page(client: &Client, url: &str) -> FetchOutcome {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();
            if !status.is_success() {
                return FetchOutcome::HttpError {
                    status: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => FetchOutcome::Success { body },
                Err(e) => FetchOutcome::NetworkError {
                    error: e.to_string(),
                },
            }
        }
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection refused".to_string()
            } else {
                e.to_string()
            };
            FetchOutcome::NetworkError { error }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let config = FetchConfig::default();
        assert!(build_http_client(&config).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_classifies_http_error() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = build_http_client(&FetchConfig::default()).unwrap();
        let outcome = fetch_page(&client, &format!("{}/missing", server.uri())).await;
        assert!(matches!(outcome, FetchOutcome::HttpError { status: 404 }));
    }

    #[tokio::test]
    async fn test_fetch_returns_body_on_success() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let client = build_http_client(&FetchConfig::default()).unwrap();
        let outcome = fetch_page(&client, &server.uri()).await;
        match outcome {
            FetchOutcome::Success { body } => assert_eq!(body, "<html></html>"),
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_classifies_connection_failure() {
        let client = build_http_client(&FetchConfig::default()).unwrap();
        // Port 1 is never listening
        let outcome = fetch_page(&client, "http://127.0.0.1:1/").await;
        assert!(matches!(outcome, FetchOutcome::NetworkError { .. }));
    }
}
