//! HTTP transport for catalog requests.

use log::{debug, warn};
use reqwest::{Client, Url};
use std::time::Duration;

use crate::error::TransportError;

/// Request timeout applied by [`HttpClient::default_client`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const USER_AGENT: &str = concat!("contentdb-rs/", env!("CARGO_PKG_VERSION"));

/// Thin wrapper over a reqwest Client that maps failures onto [`TransportError`].
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a reqwest Client with the crate's user agent and timeout.
    pub fn default_client() -> Result<Client, TransportError> {
        Client::builder()
            .user_agent(USER_AGENT)
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(TransportError::Client)
    }

    /// Performs a GET request and returns the body of a 2xx response.
    #[tracing::instrument(skip(self))]
    pub async fn get_text(&self, url: &Url) -> Result<String, TransportError> {
        debug!("GET {}...", url);

        let request_failed = |source: reqwest::Error| TransportError::Request {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(request_failed)?;

        let status = response.status();
        if !status.is_success() {
            warn!("GET {} returned {}", url, status);
            return Err(TransportError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(request_failed)?;
        debug!("Received {} bytes from {}", body.len(), url);

        Ok(body)
    }
}
