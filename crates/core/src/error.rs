use crate::event::EventName;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Errors raised while assembling a [`DispatcherConfig`](crate::config::DispatcherConfig).
///
/// These are the only errors the dispatcher surfaces as `Err`; everything
/// that happens after construction degrades into a failed dispatch result.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    MissingVar(&'static str),

    #[error("{var} must be a valid {expected}, got '{value}'")]
    InvalidValue {
        var: String,
        expected: &'static str,
        value: String,
    },

    #[error("No endpoint configured for {0}")]
    MissingEndpoint(EventName),

    #[error("Invalid endpoint URL for {event}: '{url}' ({reason})")]
    InvalidUrl {
        event: EventName,
        url: String,
        reason: String,
    },
}
