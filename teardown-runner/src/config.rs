//! Teardown configuration
//!
//! Credentials, API endpoints, workspace names and the retry/poll tuning
//! for one invocation. Everything is read once at startup and passed down
//! explicitly.

use std::time::Duration;
use teardown_client::RetryPolicy;
use tracing::warn;

use crate::scheduler::PollPolicy;

pub const DEFAULT_TFC_API_URL: &str = "https://app.terraform.io/api/v2";
pub const DEFAULT_DIGITALOCEAN_API_URL: &str = "https://api.digitalocean.com/v2";

/// Teardown configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Terraform Cloud bearer token
    pub tfc_token: String,

    /// DigitalOcean bearer token, also handed to runs as `do_token`
    pub digitalocean_token: String,

    /// Terraform Cloud organization owning the workspaces
    pub organization: String,

    pub tfc_api_url: String,

    pub digitalocean_api_url: String,

    /// Workspace managing the droplet
    pub droplet_workspace: String,

    /// Workspace whose apply takes the snapshot
    pub snapshot_workspace: String,

    /// State output holding the droplet ID
    pub droplet_output: String,

    /// Run status polling
    pub poll: PollPolicy,

    /// Transport retries for lookups and run creation
    pub http_max_retries: u32,

    /// Base backoff between transport retries
    pub http_backoff: Duration,

    /// Poll the destroy run until it finishes instead of returning once it is queued
    pub wait_for_destroy: bool,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(tfc_token: String, digitalocean_token: String) -> Self {
        Self {
            tfc_token,
            digitalocean_token,
            organization: "digitalocean-shra012".to_string(),
            tfc_api_url: DEFAULT_TFC_API_URL.to_string(),
            digitalocean_api_url: DEFAULT_DIGITALOCEAN_API_URL.to_string(),
            droplet_workspace: "development-droplet".to_string(),
            snapshot_workspace: "development-snapshot".to_string(),
            droplet_output: "droplet_id".to_string(),
            poll: PollPolicy::default(),
            http_max_retries: 3,
            http_backoff: Duration::from_millis(300),
            wait_for_destroy: false,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - TFC_TOKEN, DIGITALOCEAN_TOKEN (a missing token is only warned about)
    /// - TFC_ORGANIZATION (optional, default: digitalocean-shra012)
    /// - TFC_API_URL, DIGITALOCEAN_API_URL (optional)
    /// - DROPLET_WORKSPACE (optional, default: development-droplet)
    /// - SNAPSHOT_WORKSPACE (optional, default: development-snapshot)
    /// - DROPLET_OUTPUT (optional, default: droplet_id)
    /// - POLL_MAX_ATTEMPTS (optional, default: 10)
    /// - POLL_INTERVAL (optional, seconds, default: 30)
    /// - HTTP_MAX_RETRIES (optional, default: 3)
    /// - HTTP_BACKOFF_MS (optional, default: 300)
    /// - WAIT_FOR_DESTROY (optional, default: false)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let tfc_token = token(&lookup, "TFC_TOKEN");
        let digitalocean_token = token(&lookup, "DIGITALOCEAN_TOKEN");

        let mut config = Self::new(tfc_token, digitalocean_token);

        if let Some(organization) = lookup("TFC_ORGANIZATION") {
            config.organization = organization;
        }
        if let Some(url) = lookup("TFC_API_URL") {
            config.tfc_api_url = url;
        }
        if let Some(url) = lookup("DIGITALOCEAN_API_URL") {
            config.digitalocean_api_url = url;
        }
        if let Some(name) = lookup("DROPLET_WORKSPACE") {
            config.droplet_workspace = name;
        }
        if let Some(name) = lookup("SNAPSHOT_WORKSPACE") {
            config.snapshot_workspace = name;
        }
        if let Some(name) = lookup("DROPLET_OUTPUT") {
            config.droplet_output = name;
        }

        if let Some(attempts) = parse(&lookup, "POLL_MAX_ATTEMPTS")? {
            config.poll.max_attempts = attempts;
        }
        if let Some(secs) = parse::<u64, _>(&lookup, "POLL_INTERVAL")? {
            config.poll.interval = Duration::from_secs(secs);
        }
        if let Some(retries) = parse(&lookup, "HTTP_MAX_RETRIES")? {
            config.http_max_retries = retries;
        }
        if let Some(ms) = parse::<u64, _>(&lookup, "HTTP_BACKOFF_MS")? {
            config.http_backoff = Duration::from_millis(ms);
        }
        if let Some(wait) = parse(&lookup, "WAIT_FOR_DESTROY")? {
            config.wait_for_destroy = wait;
        }

        Ok(config)
    }

    /// Transport retry policy derived from this configuration
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.http_max_retries, self.http_backoff)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, url) in [
            ("tfc_api_url", &self.tfc_api_url),
            ("digitalocean_api_url", &self.digitalocean_api_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("{} must start with http:// or https://", name);
            }
        }

        if self.organization.is_empty() {
            anyhow::bail!("organization cannot be empty");
        }

        if self.droplet_workspace.is_empty() || self.snapshot_workspace.is_empty() {
            anyhow::bail!("workspace names cannot be empty");
        }

        if self.droplet_output.is_empty() {
            anyhow::bail!("droplet_output cannot be empty");
        }

        if self.poll.max_attempts == 0 {
            anyhow::bail!("poll max_attempts must be greater than 0");
        }

        Ok(())
    }
}

fn token<F>(lookup: &F, key: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| {
        warn!("{} is not set; requests will fail authorization", key);
        String::new()
    })
}

fn parse<T, F>(lookup: &F, key: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| anyhow::anyhow!("invalid {} '{}': {}", key, raw, e))
        })
        .transpose()
}
