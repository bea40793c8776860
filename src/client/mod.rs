//! HTTP client for the Go stats endpoint.
//!
//! One outbound call per invocation, no retries, no caching. Retry policy
//! belongs to the poll loop, not here.

use std::time::Duration;

use reqwest::Method;
use reqwest::blocking::Client as HttpClient;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::stats::{Stats, StatsSource};

/// Default stats endpoint exposed by `golang-stats-api-handler`.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/stats";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Stats endpoint URL.
    pub endpoint: String,
    /// Log outgoing payloads and response bodies.
    pub debug: bool,
    /// Bound on every request/response cycle.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            debug: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Error type for stats endpoint calls.
#[derive(Debug)]
pub enum ClientError {
    /// Request body could not be serialized.
    Marshal(serde_json::Error),
    /// Network or connection failure.
    Transport(reqwest::Error),
    /// Endpoint answered with a non-success status. Body is best-effort.
    UnexpectedStatus { status: u16, body: String },
    /// Response body did not decode into the expected structure.
    Decode(serde_json::Error),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Marshal(e) => write!(f, "failed to marshal request: {}", e),
            ClientError::Transport(e) => write!(f, "request failed: {}", e),
            ClientError::UnexpectedStatus { status, body } => {
                write!(f, "status code: {}, body: {}", status, body)
            }
            ClientError::Decode(e) => write!(f, "failed to decode response: {}", e),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Marshal(e) | ClientError::Decode(e) => Some(e),
            ClientError::Transport(e) => Some(e),
            ClientError::UnexpectedStatus { .. } => None,
        }
    }
}

/// Typed client for the stats endpoint.
///
/// Each call is independent; the client carries no state beyond the
/// connection pool inside [`reqwest::blocking::Client`].
pub struct StatsClient {
    http: HttpClient,
    config: Config,
}

impl StatsClient {
    /// Creates a client. The configured timeout applies to every call.
    pub fn new(config: Config) -> Result<Self, ClientError> {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ClientError::Transport)?;
        Ok(Self { http, config })
    }

    /// Fetches one stats snapshot.
    pub fn stats(&self) -> Result<Stats, ClientError> {
        self.call::<Stats, ()>(Method::GET, None)
    }

    /// One request/response cycle against the configured endpoint.
    ///
    /// `request`, when present, is serialized to JSON and attached as the
    /// body. A non-success status fails with the status code and whatever
    /// body could be read. The response is buffered before decoding; debug
    /// mode logs the raw body.
    fn call<T, B>(&self, method: Method, request: Option<&B>) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut req = self.http.request(method, &self.config.endpoint);
        if let Some(body) = request {
            let payload = serde_json::to_vec(body).map_err(ClientError::Marshal)?;
            if self.config.debug {
                debug!(payload = %String::from_utf8_lossy(&payload), "request");
            }
            req = req
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(payload);
        }

        let res = req.send().map_err(ClientError::Transport)?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().unwrap_or_default();
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = res.text().map_err(ClientError::Transport)?;
        if self.config.debug {
            debug!(response = %body, "response");
        }
        serde_json::from_str(&body).map_err(ClientError::Decode)
    }
}

impl StatsSource for StatsClient {
    fn fetch(&self) -> Result<Stats, ClientError> {
        self.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serves one canned HTTP response on an ephemeral port and returns the
    /// endpoint URL.
    fn serve_once(status_line: &str, body: &str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{}", addr)
    }

    fn client_for(endpoint: String) -> StatsClient {
        StatsClient::new(Config {
            endpoint,
            debug: false,
            timeout: Duration::from_secs(2),
        })
        .unwrap()
    }

    #[test]
    fn decodes_success_response() {
        let endpoint = serve_once(
            "200 OK",
            r#"{"time":1,"go_version":"go1.22.1","goroutine_num":5,"memory_alloc":1000}"#,
        );
        let stats = client_for(endpoint).stats().unwrap();
        assert_eq!(stats.time, 1);
        assert_eq!(stats.go_version, "go1.22.1");
        assert_eq!(stats.goroutine_num, 5);
        assert_eq!(stats.memory_alloc, 1000);
        // Absent fields decode to zero.
        assert_eq!(stats.heap_alloc, 0);
    }

    #[test]
    fn non_success_status_preserves_code_and_body() {
        let endpoint = serve_once("500 Internal Server Error", "boom");
        let err = client_for(endpoint).stats().unwrap_err();
        match err {
            ClientError::UnexpectedStatus { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected UnexpectedStatus, got {:?}", other),
        }
    }

    #[test]
    fn malformed_body_is_decode_error() {
        let endpoint = serve_once("200 OK", "not json");
        let err = client_for(endpoint).stats().unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn unreachable_endpoint_is_transport_error() {
        // Bind then drop to get a port nothing listens on.
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let err = client_for(format!("http://{}", addr)).stats().unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }
}
