//! Domain building blocks for the artisan marketplace webhook dispatcher.
//!
//! Everything here is pure: no I/O, no async.
//!
//! - [`EventName`]: the closed set of business events.
//! - [`payload`]: shapes an input record into an [`EventPayload`].
//! - [`EndpointRegistry`]: the fixed event-to-URL mapping.
//! - [`DispatcherConfig`]: explicit configuration, loadable from env.
//! - [`DispatchResult`]: the outcome handed back to callers.

pub mod config;
pub mod endpoints;
pub mod error;
pub mod event;
pub mod payload;
pub mod result;
pub mod types;

pub use config::DispatcherConfig;
pub use endpoints::EndpointRegistry;
pub use error::{ConfigError, CoreError};
pub use event::EventName;
pub use payload::{build_payload, EventPayload, ShapedPayload};
pub use result::DispatchResult;
