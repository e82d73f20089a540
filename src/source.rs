//! Exchange sources - where the inspector gets its records from
//!
//! The list component only needs "something that yields a collection of
//! exchanges once". In production that is an HTTP GET against the capture
//! server's `/data` endpoint; tests plug in fixed collections.

use crate::model::Exchange;
use anyhow::{bail, Context, Result};
use std::future::Future;
use std::time::Duration;

/// A one-shot provider of exchange records
pub trait ExchangeSource: Send + Sync + 'static {
    /// Fetch the full collection
    ///
    /// A JSON `null` body counts as an empty collection; anything that is not
    /// an array of exchanges is an error.
    fn fetch(&self) -> impl Future<Output = Result<Vec<Exchange>>> + Send;

    /// Human-readable origin for status display
    fn describe(&self) -> String;
}

/// Fetches exchanges from a `/data` endpoint
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ExchangeSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<Exchange>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("GET {} failed", self.url))?;

        let status = response.status();
        if !status.is_success() {
            bail!("GET {} returned {}", self.url, status);
        }

        let exchanges: Option<Vec<Exchange>> = response
            .json()
            .await
            .with_context(|| format!("GET {} did not return an exchange array", self.url))?;

        Ok(exchanges.unwrap_or_default())
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Fixed in-memory collection
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    exchanges: Vec<Exchange>,
}

impl StaticSource {
    pub fn new(exchanges: Vec<Exchange>) -> Self {
        Self { exchanges }
    }
}

impl ExchangeSource for StaticSource {
    async fn fetch(&self) -> Result<Vec<Exchange>> {
        Ok(self.exchanges.clone())
    }

    fn describe(&self) -> String {
        format!("{} in-memory exchange(s)", self.exchanges.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Message, StatusCode};
    use axum::{http::StatusCode as HttpStatus, routing::get, Router};
    use tokio::net::TcpListener;

    async fn spawn(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/data", addr)
    }

    fn source(url: String) -> HttpSource {
        HttpSource::new(url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_array() {
        let body = r#"[{"method":"POST","path":"/login","status":401,
            "request":{"raw_headers":"A: b\r\n","body":"x"},
            "response":{"raw_headers":"","body":null}}]"#;
        let url = spawn(Router::new().route("/data", get(move || async move { body }))).await;

        let exchanges = source(url).fetch().await.unwrap();
        assert_eq!(
            exchanges,
            vec![Exchange {
                method: "POST".to_string(),
                path: "/login".to_string(),
                status: StatusCode::from(401),
                request: Message::new("A: b\r\n", Some("x".to_string())),
                response: Message::new("", None),
            }]
        );
    }

    #[tokio::test]
    async fn test_fetch_null_is_empty() {
        let url = spawn(Router::new().route("/data", get(|| async { "null" }))).await;
        assert!(source(url).fetch().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_non_array_is_error() {
        let url = spawn(Router::new().route("/data", get(|| async { r#"{"a":1}"# }))).await;
        assert!(source(url).fetch().await.is_err());
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_error() {
        let url = spawn(Router::new().route(
            "/data",
            get(|| async { (HttpStatus::INTERNAL_SERVER_ERROR, "[]") }),
        ))
        .await;
        assert!(source(url).fetch().await.is_err());
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_error() {
        // Bind then drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = source(format!("http://{}/data", addr)).fetch().await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_static_source_returns_copy() {
        let source = StaticSource::new(Vec::new());
        assert!(source.fetch().await.unwrap().is_empty());
        assert_eq!(source.describe(), "0 in-memory exchange(s)");
    }
}
