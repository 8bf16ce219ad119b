//! Webhook delivery for artisan marketplace events.
//!
//! - [`WebhookDispatcher`]: shapes an event, posts it, returns the outcome.
//! - [`transport`]: the HTTP seam ([`HttpClient`]) and [`WebhookDelivery`].
//! - [`ActivityLog`]: append-only, observable record of every attempt.

pub mod activity;
pub mod dispatcher;
pub mod transport;

pub use activity::{ActivityLog, ActivityRecord, ActivityStatus};
pub use dispatcher::WebhookDispatcher;
pub use transport::{HttpClient, RawResponse, ReqwestClient, WebhookDelivery, WebhookError};
