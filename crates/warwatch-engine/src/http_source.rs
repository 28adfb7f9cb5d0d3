//! Blocking HTTP feed source.

#![allow(clippy::result_large_err)]

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderValue, ACCEPT, USER_AGENT};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use warwatch_core::errors::{ExError, ExErrorKind};
use warwatch_core::FeedSource;

pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_USER_AGENT: &str = concat!("warwatch/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSourceConfig {
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// [`FeedSource`] backed by a blocking `reqwest` client.
///
/// A non-success status maps to `ERR_HTTP_STATUS`, a body that is not JSON
/// to `ERR_DECODE`, anything else to `ERR_FETCH`.
pub struct HttpFeedSource {
    client: Client,
}

impl HttpFeedSource {
    /// # Errors
    ///
    /// Returns `ExErrorKind::InvalidConfig` if the user agent is not a valid
    /// header value or the client cannot be built.
    pub fn new(config: &HttpSourceConfig) -> Result<Self, ExError> {
        let user_agent = HeaderValue::from_str(&config.user_agent).map_err(|e| {
            ExError::new(ExErrorKind::InvalidConfig)
                .with_op("http_source_new")
                .with_message(format!("invalid user agent: {}", e))
        })?;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(USER_AGENT, user_agent);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms.max(1)))
            .default_headers(headers)
            .build()
            .map_err(|e| {
                ExError::new(ExErrorKind::InvalidConfig)
                    .with_op("http_source_new")
                    .with_message(e.to_string())
            })?;

        Ok(Self { client })
    }
}

impl FeedSource for HttpFeedSource {
    fn fetch_json(&self, url: &str) -> Result<Value, ExError> {
        let fetch_error = |kind: ExErrorKind, message: String| {
            ExError::new(kind)
                .with_op("fetch_json")
                .with_url(url)
                .with_message(message)
        };

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| fetch_error(ExErrorKind::Fetch, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(
                ExErrorKind::HttpStatus,
                format!("status {}", status.as_u16()),
            ));
        }

        let body = response
            .text()
            .map_err(|e| fetch_error(ExErrorKind::Fetch, e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| fetch_error(ExErrorKind::Decode, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::JoinHandle;

    /// Answer one request with a canned response; the thread yields the raw request.
    fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/api/WarSeason/801/Status", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&request).to_lowercase()
        });
        (url, handle)
    }

    fn source() -> HttpFeedSource {
        HttpFeedSource::new(&HttpSourceConfig {
            timeout_ms: 5_000,
            ..HttpSourceConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_success_body_is_parsed_and_headers_sent() {
        let (url, server) = serve_once("200 OK", r#"{"storyBeatId32": 42}"#);

        let value = source().fetch_json(&url).unwrap();

        assert_eq!(value, serde_json::json!({"storyBeatId32": 42}));
        let request = server.join().unwrap();
        assert!(request.contains("user-agent: warwatch/"));
        assert!(request.contains("accept: application/json"));
    }

    #[test]
    fn test_non_success_status_maps_to_http_status() {
        let (url, server) = serve_once("503 Service Unavailable", "{}");

        let err = source().fetch_json(&url).unwrap_err();
        server.join().unwrap();

        assert_eq!(err.kind(), ExErrorKind::HttpStatus);
        assert!(err.message().contains("503"));
        assert_eq!(err.url(), Some(url.as_str()));
    }

    #[test]
    fn test_non_json_body_maps_to_decode() {
        let (url, server) = serve_once("200 OK", "<html>maintenance</html>");

        let err = source().fetch_json(&url).unwrap_err();
        server.join().unwrap();

        assert_eq!(err.kind(), ExErrorKind::Decode);
        assert_eq!(err.op(), Some("fetch_json"));
    }

    #[test]
    fn test_refused_connection_maps_to_fetch() {
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let url = format!("http://127.0.0.1:{}/api/Configuration/GameClient", port);

        let err = source().fetch_json(&url).unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::Fetch);
        assert_eq!(err.url(), Some(url.as_str()));
    }

    #[test]
    fn test_default_config() {
        let config = HttpSourceConfig::default();
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert!(config.user_agent.starts_with("warwatch/"));
    }

    #[test]
    fn test_invalid_user_agent_is_rejected() {
        let config = HttpSourceConfig {
            user_agent: "bad\nagent".to_string(),
            ..HttpSourceConfig::default()
        };
        let err = HttpFeedSource::new(&config).err().unwrap();
        assert_eq!(err.kind(), ExErrorKind::InvalidConfig);
    }
}
