#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use artisan_core::{DispatcherConfig, EndpointRegistry};
use artisan_events::{HttpClient, RawResponse, WebhookError};

pub const BASE_URL: &str = "https://hooks.example.com/webhook";

/// Build a test `DispatcherConfig` pointing every event at [`BASE_URL`].
pub fn test_config() -> DispatcherConfig {
    let endpoints = EndpointRegistry::from_base_url(BASE_URL).expect("valid base url");
    DispatcherConfig::new(endpoints)
}

/// What a [`MockClient`] answers with.
pub enum Reply {
    Status(u16, &'static str),
    NetworkError,
}

/// In-memory [`HttpClient`] that records every request and answers with a
/// fixed [`Reply`].
pub struct MockClient {
    reply: Reply,
    requests: Mutex<Vec<(String, Value)>>,
}

impl MockClient {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn ok_json(body: &'static str) -> Self {
        Self::new(Reply::Status(200, body))
    }

    pub fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for MockClient {
    async fn post_json(&self, url: &str, body: &Value) -> Result<RawResponse, WebhookError> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), body.clone()));

        match self.reply {
            Reply::Status(status, body) => Ok(RawResponse {
                status,
                body: body.as_bytes().to_vec(),
            }),
            Reply::NetworkError => {
                // Build a reqwest error from an invalid URL.
                let err = reqwest::Client::new().get("://bad").build().unwrap_err();
                Err(WebhookError::Request(err))
            }
        }
    }
}
