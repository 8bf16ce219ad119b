//! Webhook transport.
//!
//! [`WebhookDelivery`] sends a JSON-encoded [`EventPayload`] to an external
//! URL via HTTP POST and classifies the response into a [`DispatchResult`].
//! There is exactly one attempt per call: no retry, no backoff, and no
//! timeout beyond what the [`HttpClient`] enforces.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use artisan_core::payload::EventPayload;
use artisan_core::DispatchResult;

use crate::activity::{ActivityLog, ActivityStatus};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for webhook delivery failures.
///
/// Never returned to dispatch callers; its `Display` text becomes the
/// `error` message of a failed [`DispatchResult`].
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("Webhook failed: {reason}")]
    HttpStatus { status: u16, reason: String },

    /// The payload could not be encoded as JSON.
    #[error("Failed to encode payload: {0}")]
    Encode(serde_json::Error),

    /// The response body was not valid JSON.
    #[error("Invalid JSON response: {0}")]
    InvalidBody(serde_json::Error),
}

impl WebhookError {
    /// Build an [`HttpStatus`](Self::HttpStatus) error, using the canonical
    /// reason phrase (e.g. `Internal Server Error`) when one exists.
    pub fn http_status(status: u16) -> Self {
        let reason = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {status}"));
        Self::HttpStatus { status, reason }
    }
}

// ---------------------------------------------------------------------------
// HttpClient
// ---------------------------------------------------------------------------

/// Status and raw body of an HTTP response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The single outbound call a webhook delivery needs.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// POST `body` to `url` with `Content-Type: application/json`.
    async fn post_json(&self, url: &str, body: &Value) -> Result<RawResponse, WebhookError>;
}

#[async_trait]
impl<T: HttpClient + ?Sized> HttpClient for Arc<T> {
    async fn post_json(&self, url: &str, body: &Value) -> Result<RawResponse, WebhookError> {
        (**self).post_json(url, body).await
    }
}

/// [`HttpClient`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Create a client. `timeout` of `None` keeps reqwest's default (no
    /// overall request timeout).
    pub fn new(timeout: Option<Duration>) -> Result<Self, WebhookError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn post_json(&self, url: &str, body: &Value) -> Result<RawResponse, WebhookError> {
        let response = self.client.post(url).json(body).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(RawResponse { status, body })
    }
}

// ---------------------------------------------------------------------------
// WebhookDelivery
// ---------------------------------------------------------------------------

/// Delivers event payloads to webhook endpoints and records every attempt.
pub struct WebhookDelivery<C = ReqwestClient> {
    client: C,
    activity: Arc<ActivityLog>,
}

impl<C: HttpClient> WebhookDelivery<C> {
    pub fn new(client: C, activity: Arc<ActivityLog>) -> Self {
        Self { client, activity }
    }

    pub fn activity(&self) -> &Arc<ActivityLog> {
        &self.activity
    }

    /// Deliver `payload` to `url`.
    ///
    /// A 2xx response whose body parses as JSON yields a delivered result
    /// carrying the parsed body. Anything else yields a failed result with
    /// a non-empty message. The attempt is recorded in the activity log
    /// before this returns.
    pub async fn send_webhook(&self, url: &str, payload: &EventPayload) -> DispatchResult {
        let trigger = payload.trigger;

        match self.try_send(url, payload).await {
            Ok(data) => {
                tracing::debug!(%trigger, url, "Webhook delivered");
                self.activity
                    .record(trigger, ActivityStatus::Success, data.clone());
                DispatchResult::delivered(data)
            }
            Err(e) => {
                tracing::debug!(%trigger, url, error = %e, "Webhook delivery failed");
                let message = e.to_string();
                self.activity.record(
                    trigger,
                    ActivityStatus::Failed,
                    Value::String(message.clone()),
                );
                DispatchResult::failed(message)
            }
        }
    }

    /// Execute a single POST request and interpret the response.
    async fn try_send(&self, url: &str, payload: &EventPayload) -> Result<Value, WebhookError> {
        let body = serde_json::to_value(payload).map_err(WebhookError::Encode)?;
        let response = self.client.post_json(url, &body).await?;
        if !response.is_success() {
            return Err(WebhookError::http_status(response.status));
        }
        serde_json::from_slice(&response.body).map_err(WebhookError::InvalidBody)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
