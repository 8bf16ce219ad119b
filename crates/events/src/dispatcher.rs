//! Event notification dispatcher.
//!
//! [`WebhookDispatcher`] is the caller-facing entry point: one generic
//! [`send`](WebhookDispatcher::send) serves every [`EventName`]. Each call
//! shapes the input into a payload, resolves the event's endpoint, delivers
//! it once, records the outcome, and returns a [`DispatchResult`].

use std::sync::Arc;

use serde_json::Value;

use artisan_core::payload::{build_payload, EventPayload};
use artisan_core::{DispatchResult, DispatcherConfig, EventName};

use crate::activity::ActivityLog;
use crate::transport::{HttpClient, ReqwestClient, WebhookDelivery, WebhookError};

/// Dispatches business events to their configured webhook endpoints.
///
/// Concurrent calls are independent; the activity log is the only state
/// they share.
pub struct WebhookDispatcher<C = ReqwestClient> {
    config: DispatcherConfig,
    delivery: WebhookDelivery<C>,
}

impl WebhookDispatcher<ReqwestClient> {
    /// Create a dispatcher that posts through `reqwest`, honouring the
    /// configured request timeout.
    pub fn new(config: DispatcherConfig) -> Result<Self, WebhookError> {
        let client = ReqwestClient::new(config.request_timeout)?;
        Ok(Self::with_client(config, client))
    }
}

impl<C: HttpClient> WebhookDispatcher<C> {
    /// Create a dispatcher that posts through `client`.
    pub fn with_client(config: DispatcherConfig, client: C) -> Self {
        Self::with_activity_log(config, client, Arc::new(ActivityLog::default()))
    }

    /// Create a dispatcher that records into an existing activity log.
    pub fn with_activity_log(config: DispatcherConfig, client: C, activity: Arc<ActivityLog>) -> Self {
        Self {
            config,
            delivery: WebhookDelivery::new(client, activity),
        }
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    pub fn activity(&self) -> &Arc<ActivityLog> {
        self.delivery.activity()
    }

    /// Shape `data` into the payload for `event` and deliver it.
    ///
    /// Fields missing from `data` are left out of the payload; they are
    /// logged at debug level and do not fail the dispatch.
    pub async fn send(&self, event: EventName, data: &Value) -> DispatchResult {
        let shaped = build_payload(event, data, self.config.site_origin.as_deref());
        if !shaped.missing.is_empty() {
            tracing::debug!(
                trigger = %event,
                missing = ?shaped.missing,
                "Payload built with missing fields"
            );
        }
        self.send_payload(&shaped.payload).await
    }

    /// Deliver an already-built payload to its trigger's endpoint.
    pub async fn send_payload(&self, payload: &EventPayload) -> DispatchResult {
        let url = self.config.endpoints.url_for(payload.trigger);
        self.delivery.send_webhook(url, payload).await
    }
}
