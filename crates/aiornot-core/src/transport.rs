//! HTTP transport adapter.
//!
//! One request in, one raw response out. The trait seam exists so client
//! operations can be exercised against a canned transport in tests; the
//! production implementation wraps a single pooled `reqwest::Client` that
//! lives as long as the API client that owns it.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{AiornotError, Result};

/// A single outbound API request.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: reqwest::Method,
    pub url: String,
    /// Bearer token, omitted for unauthenticated endpoints.
    pub bearer: Option<String>,
    /// Query pairs; repeated keys are sent as repeated parameters.
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    pub timeout: Duration,
}

impl ApiRequest {
    pub fn new(method: reqwest::Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            bearer: None,
            query: Vec::new(),
            body: RequestBody::Empty,
            timeout: crate::settings::DEFAULT_TIMEOUT,
        }
    }

    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Request payload variants the API uses.
#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    /// JSON object body (URL submissions)
    Json(serde_json::Value),
    /// `application/x-www-form-urlencoded` pairs (text submissions)
    Form(Vec<(String, String)>),
    /// Multipart upload with a single file part
    File {
        field: &'static str,
        filename: String,
        data: Vec<u8>,
    },
}

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues one HTTP request. No retries: a failure surfaces immediately.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse>;
}

/// Production transport over a pooled `reqwest::Client`.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .timeout(request.timeout);

        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Form(pairs) => builder.form(&pairs),
            RequestBody::File {
                field,
                filename,
                data,
            } => {
                let part = reqwest::multipart::Part::bytes(data).file_name(filename);
                builder.multipart(reqwest::multipart::Form::new().part(field, part))
            }
        };

        let response = builder.send().await.map_err(map_request_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_request_error)?;

        tracing::debug!(url = %request.url, status, "api response");
        Ok(RawResponse { status, body })
    }
}

fn map_request_error(err: reqwest::Error) -> AiornotError {
    if err.is_timeout() {
        AiornotError::Timeout(err.to_string())
    } else {
        AiornotError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder_chains() {
        let req = ApiRequest::new(reqwest::Method::POST, "https://api.example.com/v2/image/sync")
            .bearer("key")
            .query("only", "ai_generated")
            .query("only", "deepfake")
            .timeout(Duration::from_secs(30));

        assert_eq!(req.bearer.as_deref(), Some("key"));
        assert_eq!(req.query.len(), 2);
        assert_eq!(req.query[0].0, "only");
        assert_eq!(req.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_raw_response_success_range() {
        assert!(RawResponse {
            status: 200,
            body: String::new()
        }
        .is_success());
        assert!(RawResponse {
            status: 299,
            body: String::new()
        }
        .is_success());
        assert!(!RawResponse {
            status: 301,
            body: String::new()
        }
        .is_success());
        assert!(!RawResponse {
            status: 422,
            body: String::new()
        }
        .is_success());
    }
}
