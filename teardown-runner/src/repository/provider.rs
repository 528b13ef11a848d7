//! Provider repository
//!
//! Answers whether a droplet still exists at DigitalOcean.

use async_trait::async_trait;
use teardown_client::DigitalOceanClient;
use tracing::{error, info};

#[cfg(test)]
use mockall::automock;

/// Repository trait for cloud provider lookups
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProviderRepository: Send + Sync {
    /// Checks whether the droplet exists
    ///
    /// Any failure other than a successful lookup counts as "does not
    /// exist", including provider errors.
    async fn droplet_exists(&self, droplet_id: &str) -> bool;
}

/// HTTP implementation of ProviderRepository
pub struct HttpProviderRepository {
    client: DigitalOceanClient,
}

impl HttpProviderRepository {
    pub fn new(client: DigitalOceanClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProviderRepository for HttpProviderRepository {
    async fn droplet_exists(&self, droplet_id: &str) -> bool {
        info!("Checking if droplet with ID '{}' exists...", droplet_id);

        match self.client.get_droplet(droplet_id).await {
            Ok(droplet) => {
                info!(
                    "Droplet with ID '{}' exists (name: {}, status: {})",
                    droplet_id, droplet.name, droplet.status
                );
                true
            }
            Err(e) if e.is_not_found() => {
                info!("Droplet with ID '{}' not found", droplet_id);
                false
            }
            Err(e) => {
                error!("Failed to check droplet existence: {}", e);
                false
            }
        }
    }
}
