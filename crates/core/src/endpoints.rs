//! Endpoint registry: the fixed `EventName -> URL` mapping a dispatcher
//! posts to.
//!
//! The registry is total. Every [`EventName`] resolves to exactly one
//! absolute `http`/`https` URL, and the mapping cannot change once built.

use url::Url;

use crate::error::ConfigError;
use crate::event::EventName;

/// Immutable mapping from every [`EventName`] to its webhook URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRegistry {
    /// Indexed by position in [`EventName::ALL`].
    urls: Vec<Url>,
}

impl EndpointRegistry {
    /// Map each event to `{base}/{slug}`.
    ///
    /// The slug is appended as a path segment, so a trailing slash on `base`
    /// is ignored and any query string or fragment is kept:
    /// `https://hooks.example.com/webhook?token=abc` yields
    /// `https://hooks.example.com/webhook/order-placed?token=abc`.
    pub fn from_base_url(base: &str) -> Result<Self, ConfigError> {
        let urls = EventName::ALL
            .into_iter()
            .map(|event| -> Result<Url, ConfigError> {
                let mut url = parse_endpoint(event, base)?;
                url.path_segments_mut()
                    .map_err(|()| invalid_url(event, base, "cannot be a base URL".to_string()))?
                    .pop_if_empty()
                    .push(event.slug());
                Ok(url)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { urls })
    }

    /// Build from an explicit mapping, which must cover every event.
    ///
    /// Later entries for the same event replace earlier ones.
    pub fn from_map<I, S>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (EventName, S)>,
        S: AsRef<str>,
    {
        let mut slots: Vec<Option<Url>> = vec![None; EventName::COUNT];
        for (event, url) in entries {
            slots[event.index()] = Some(parse_endpoint(event, url.as_ref())?);
        }

        let urls = EventName::ALL
            .into_iter()
            .zip(slots)
            .map(|(event, slot)| slot.ok_or(ConfigError::MissingEndpoint(event)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { urls })
    }

    /// Replace the URL of a single event.
    pub fn with_override(mut self, event: EventName, url: &str) -> Result<Self, ConfigError> {
        self.urls[event.index()] = parse_endpoint(event, url)?;
        Ok(self)
    }

    /// Resolve the endpoint for `event`.
    pub fn url_for(&self, event: EventName) -> &str {
        self.urls[event.index()].as_str()
    }

    /// Iterate over every `(event, url)` pair in [`EventName::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (EventName, &str)> + '_ {
        EventName::ALL
            .into_iter()
            .zip(self.urls.iter().map(Url::as_str))
    }
}

fn parse_endpoint(event: EventName, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| invalid_url(event, raw, e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid_url(event, raw, format!("unsupported scheme '{other}'"))),
    }
}

fn invalid_url(event: EventName, raw: &str, reason: String) -> ConfigError {
    ConfigError::InvalidUrl {
        event,
        url: raw.to_string(),
        reason,
    }
}
