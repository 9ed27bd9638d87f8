//! HTTP client shared foundation
//!
//! A thin wrapper over reqwest with a fixed per-request deadline and a
//! custom User-Agent. Calls are single-shot; a timed-out call is treated
//! like any other failure at the caller's granularity.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Fixed deadline for every outbound request (10 seconds)
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default User-Agent header
const USER_AGENT: &str = concat!("pubwatch/", env!("CARGO_PKG_VERSION"));

/// Failure modes shared by all collaborators; each adapter maps these onto
/// its own error type
#[derive(Debug)]
pub enum HttpFailure {
    /// The resource does not exist (HTTP 404)
    NotFound,
    /// Any other non-success status
    Status(StatusCode),
    /// The request exceeded the per-request deadline
    Timeout,
    /// Connection-level failure
    Transport(String),
    /// The body could not be decoded
    Decode(String),
}

impl std::fmt::Display for HttpFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpFailure::NotFound => write!(f, "not found"),
            HttpFailure::Status(status) => write!(f, "HTTP {}", status),
            HttpFailure::Timeout => write!(f, "request timed out"),
            HttpFailure::Transport(msg) => write!(f, "{}", msg),
            HttpFailure::Decode(msg) => write!(f, "invalid response body: {}", msg),
        }
    }
}

impl std::error::Error for HttpFailure {}

/// HTTP client wrapper shared by all adapters
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with the fixed deadline and User-Agent
    pub fn new() -> Result<Self, HttpFailure> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                HttpFailure::Transport(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }

    /// Perform a GET request and parse the JSON response
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<T, HttpFailure> {
        let response = self
            .client
            .get(url)
            .headers(build_headers(headers)?)
            .send()
            .await
            .map_err(map_send_error)?;

        let response = check_status(response)?;
        response
            .json::<T>()
            .await
            .map_err(|e| HttpFailure::Decode(e.to_string()))
    }

    /// Perform a POST request with a JSON body and parse the JSON response
    pub async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &serde_json::Value,
    ) -> Result<T, HttpFailure> {
        let response = self
            .client
            .post(url)
            .headers(build_headers(headers)?)
            .json(body)
            .send()
            .await
            .map_err(map_send_error)?;

        let response = check_status(response)?;
        response
            .json::<T>()
            .await
            .map_err(|e| HttpFailure::Decode(e.to_string()))
    }

    /// Upload a binary body to a pre-authorized URL
    pub async fn put_bytes(
        &self,
        url: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<(), HttpFailure> {
        let response = self
            .client
            .put(url)
            .header("Content-Type", content_type)
            .body(body)
            .send()
            .await
            .map_err(map_send_error)?;

        check_status(response).map(|_| ())
    }
}

fn build_headers(pairs: &[(&str, &str)]) -> Result<HeaderMap, HttpFailure> {
    let mut headers = HeaderMap::new();
    for (name, value) in pairs {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| HttpFailure::Transport(format!("invalid header name: {}", e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| HttpFailure::Transport(format!("invalid header value: {}", e)))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

fn map_send_error(error: reqwest::Error) -> HttpFailure {
    if error.is_timeout() {
        HttpFailure::Timeout
    } else {
        HttpFailure::Transport(error.to_string())
    }
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, HttpFailure> {
    match response.status() {
        StatusCode::NOT_FOUND => Err(HttpFailure::NotFound),
        status if !status.is_success() => Err(HttpFailure::Status(status)),
        _ => Ok(response),
    }
}
