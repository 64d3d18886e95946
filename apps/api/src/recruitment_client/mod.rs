//! Recruitment client: the single point of entry for all calls to recruitment-service.
//!
//! No other module talks to the upstream API directly. Every response passes
//! through here, which is where envelopes are unwrapped and errors classified.
use std::time::Duration;

use reqwest::{header, Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::RecordError;

pub mod applications;
pub mod candidates;
pub mod interviews;
pub mod jobs;
pub mod screenings;

pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request timeout")]
    Timeout,

    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        body: Option<Value>,
    },

    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid record from recruitment-service: {0}")]
    Record(#[from] RecordError),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Network(err)
        }
    }
}

/// Typed HTTP wrapper around recruitment-service.
///
/// Cheap to clone: the underlying `reqwest::Client` is reference counted.
/// A per-caller bearer token is attached with [`RecruitmentClient::with_token`].
#[derive(Clone)]
pub struct RecruitmentClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    token: Option<String>,
}

impl RecruitmentClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            token: None,
        })
    }

    /// Returns a copy that authenticates as the given token. `None` sends
    /// requests unauthenticated.
    pub fn with_token(&self, token: Option<String>) -> Self {
        Self {
            token,
            ..self.clone()
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self
            .client
            .request(method, url)
            .timeout(self.timeout)
            .header(header::ACCEPT, "application/json");
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.send(self.request(Method::GET, path).query(query)).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(self.request(Method::PATCH, path).json(body)).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let _: Value = self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await.map_err(|e| {
            warn!("recruitment-service request failed: {e}");
            ApiError::from(e)
        })?;

        let status = response.status();
        let url = response.url().path().to_string();
        let text = response.text().await?;

        if !status.is_success() {
            warn!("recruitment-service returned {} for {}", status, url);
            return Err(http_error(status.as_u16(), &text));
        }

        debug!("recruitment-service {} ok ({} bytes)", url, text.len());
        decode_payload(&text)
    }
}

/// Decodes a successful body, unwrapping the `{data, statusCode, ...}` envelope.
/// An empty body decodes as JSON null.
fn decode_payload<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    let value = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(text)?
    };
    Ok(serde_json::from_value(unwrap_envelope(value))?)
}

fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") && map.contains_key("statusCode") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn http_error(status: u16, text: &str) -> ApiError {
    let body = serde_json::from_str::<Value>(text).ok();
    let message = body
        .as_ref()
        .and_then(extract_message)
        .unwrap_or_else(|| format!("HTTP {status}"));
    ApiError::Http {
        status,
        message,
        body,
    }
}

fn extract_message(body: &Value) -> Option<String> {
    let from_field = |field: &str| match body.get(field)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        _ => None,
    };
    from_field("message").or_else(|| from_field("error"))
}
