//! DigitalOcean client

use reqwest::{Client, StatusCode};
use teardown_core::domain::droplet::Droplet;
use teardown_core::dto::droplet::DropletEnvelope;

use crate::error::Result;
use crate::retry::RetryPolicy;
use crate::{handle_response, require_non_empty, trim_base_url};

/// HTTP client for the DigitalOcean API
#[derive(Debug, Clone)]
pub struct DigitalOceanClient {
    /// Base URL of the API (e.g., "https://api.digitalocean.com/v2")
    base_url: String,
    token: String,
    client: Client,
    retry: RetryPolicy,
}

impl DigitalOceanClient {
    /// Create a new client with the default retry policy
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(base_url, token, Client::new())
    }

    /// Create a new client with a custom HTTP client
    pub fn with_client(base_url: impl Into<String>, token: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: trim_base_url(base_url),
            token: token.into(),
            client,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Get a droplet by ID
    ///
    /// A missing droplet is reported as an API error with status 404; see
    /// [`ClientError::is_not_found`](crate::ClientError::is_not_found).
    pub async fn get_droplet(&self, droplet_id: &str) -> Result<Droplet> {
        require_non_empty(droplet_id, "droplet id")?;

        let url = format!("{}/droplets/{}", self.base_url, droplet_id);
        let request = self.client.get(&url).bearer_auth(&self.token);
        let response = self.retry.execute(request).await?;
        let envelope: DropletEnvelope = handle_response(response, StatusCode::OK).await?;

        Ok(envelope.into())
    }
}
