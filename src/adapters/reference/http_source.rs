//! HTTP Reference Source Adapter
//!
//! Fetches a JSON or YAML reference document over HTTP(S) with `reqwest`.
//! Any non-2xx response is treated as a miss.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value as JsonValue;
use std::time::Duration;

use super::DocumentFormat;
use crate::ports::{ReferenceSource, SourceError};

/// Reference document served over HTTP.
#[derive(Debug, Clone)]
pub struct HttpReferenceSource {
    url: String,
    timeout: Duration,
    client: Client,
}

impl HttpReferenceSource {
    /// Creates a source with its own client.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self::with_client(url, timeout, Client::new())
    }

    /// Creates a source that shares an existing client.
    pub fn with_client(url: impl Into<String>, timeout: Duration, client: Client) -> Self {
        Self {
            url: url.into(),
            timeout,
            client,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ReferenceSource for HttpReferenceSource {
    async fn fetch(&self) -> Result<JsonValue, SourceError> {
        let response = self
            .client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                let message = if e.is_timeout() {
                    format!("timed out after {}s", self.timeout.as_secs())
                } else if e.is_connect() {
                    format!("connection failed: {}", e)
                } else {
                    e.to_string()
                };
                SourceError::Http {
                    location: self.url.clone(),
                    message,
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                location: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let text = response.text().await.map_err(|e| SourceError::Http {
            location: self.url.clone(),
            message: e.to_string(),
        })?;

        DocumentFormat::from_location(&self.url).parse(&self.url, &text)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one canned HTTP response and returns the base URL.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn fetches_json_document() {
        let base = serve_once("200 OK", r#"{"categories": ["Mind"]}"#).await;
        let source = HttpReferenceSource::new(format!("{}/bundle.json", base), Duration::from_secs(5));

        let doc = source.fetch().await.unwrap();

        assert_eq!(doc, json!({"categories": ["Mind"]}));
    }

    #[tokio::test]
    async fn non_success_status_is_a_miss() {
        let base = serve_once("404 Not Found", "").await;
        let source = HttpReferenceSource::new(format!("{}/missing.json", base), Duration::from_secs(5));

        let err = source.fetch().await.unwrap_err();

        assert!(matches!(err, SourceError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn unreachable_host_is_an_http_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = HttpReferenceSource::new(format!("http://{}/x.json", addr), Duration::from_secs(2));
        let err = source.fetch().await.unwrap_err();

        assert!(matches!(err, SourceError::Http { .. }));
    }

    #[test]
    fn describe_returns_url() {
        let source = HttpReferenceSource::new("https://example.test/a.json", Duration::from_secs(1));
        assert_eq!(source.describe(), "https://example.test/a.json");
        assert_eq!(source.url(), "https://example.test/a.json");
    }
}
