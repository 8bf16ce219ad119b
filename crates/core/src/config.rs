use std::time::Duration;

use crate::endpoints::EndpointRegistry;
use crate::error::ConfigError;
use crate::event::EventName;

/// Dispatcher configuration, passed explicitly to the dispatcher at
/// construction time.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Destination URL for every event.
    pub endpoints: EndpointRegistry,
    /// Public origin of the storefront, used to build `cartUrl` and
    /// `productUrl` links. Links are omitted when unset.
    pub site_origin: Option<String>,
    /// Per-request timeout. `None` leaves the HTTP client default in place.
    pub request_timeout: Option<Duration>,
}

impl DispatcherConfig {
    pub fn new(endpoints: EndpointRegistry) -> Self {
        Self {
            endpoints,
            site_origin: None,
            request_timeout: None,
        }
    }

    pub fn with_site_origin(mut self, origin: impl Into<String>) -> Self {
        self.site_origin = Some(origin.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Load configuration from environment variables.
    ///
    /// | Env Var                 | Default  |
    /// |-------------------------|----------|
    /// | `WEBHOOK_BASE_URL`      | required |
    /// | `WEBHOOK_URL_<EVENT>`   | `{WEBHOOK_BASE_URL}/{slug}` |
    /// | `SITE_ORIGIN`           | unset    |
    /// | `WEBHOOK_TIMEOUT_SECS`  | unset    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads variables through
    /// `lookup`, so callers can supply their own source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base = get("WEBHOOK_BASE_URL").ok_or(ConfigError::MissingVar("WEBHOOK_BASE_URL"))?;
        let mut endpoints = EndpointRegistry::from_base_url(&base)?;
        for event in EventName::ALL {
            if let Some(url) = get(&event.env_key()) {
                endpoints = endpoints.with_override(event, &url)?;
            }
        }

        let request_timeout = match get("WEBHOOK_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    var: "WEBHOOK_TIMEOUT_SECS".to_string(),
                    expected: "number of seconds",
                    value: raw.clone(),
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            endpoints,
            site_origin: get("SITE_ORIGIN").map(|s| s.trim().to_string()),
            request_timeout,
        })
    }
}
