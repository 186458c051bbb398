//! HTTP transport used by [`SieClient`](crate::data::SieClient).
//!
//! The client only needs "GET this URL and give me the JSON back", so that is
//! the whole trait. Tests plug in a stub that returns canned documents.

use reqwest::Url;
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;

use crate::data::config::ClientConfig;
use crate::error::SieError;

pub trait Transport {
    /// Issue a GET for `url` and decode the body as JSON.
    ///
    /// Non-2xx responses must be reported as [`SieError::Status`].
    fn get_json(&self, url: &Url) -> Result<Value, SieError>;
}

/// Blocking `reqwest` transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, SieError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get_json(&self, url: &Url) -> Result<Value, SieError> {
        let resp = self.client.get(url.clone()).send()?;
        let status = resp.status();
        debug!(%status, "SIE response received");

        // Read as text first so a failed request keeps its body.
        let body = resp.text()?;
        if !status.is_success() {
            return Err(SieError::Status { status, body });
        }

        serde_json::from_str(&body).map_err(|e| SieError::Decode(e.to_string()))
    }
}
