//! Terraform Cloud client

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder};

use crate::retry::RetryPolicy;
use crate::trim_base_url;

/// JSON:API media type required by Terraform Cloud
const JSON_API: &str = "application/vnd.api+json";

/// HTTP client for the Terraform Cloud API
///
/// Endpoints are grouped by resource:
/// - Workspaces (lookup by organization and name)
/// - State versions (current outputs)
/// - Runs (create, read) and their plan/apply log locations
#[derive(Debug, Clone)]
pub struct TerraformCloudClient {
    /// Base URL of the API (e.g., "https://app.terraform.io/api/v2")
    pub(crate) base_url: String,
    token: String,
    pub(crate) client: Client,
    pub(crate) retry: RetryPolicy,
}

impl TerraformCloudClient {
    /// Create a new client with the default retry policy
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the API
    /// * `token` - Bearer token for authorization
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(base_url, token, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, token: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: trim_base_url(base_url),
            token: token.into(),
            client,
            retry: RetryPolicy::default(),
        }
    }

    /// Replace the retry policy used for idempotent lookups and run creation
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds an authorized JSON:API request for a path below the base URL
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, url)
            .bearer_auth(&self.token)
            .header(CONTENT_TYPE, JSON_API)
    }
}
