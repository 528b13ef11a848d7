//! Teardown HTTP Clients
//!
//! Typed async clients for the two services the teardown workflow talks to:
//! - [`TerraformCloudClient`]: workspaces, state outputs, runs and log locations
//! - [`DigitalOceanClient`]: droplet lookup
//!
//! Idempotent lookups go through a [`RetryPolicy`]; run polling does not,
//! since waiting on a remote state transition is the caller's concern.
//!
//! # Example
//!
//! ```no_run
//! use teardown_client::TerraformCloudClient;
//!
//! # async fn example() -> teardown_client::Result<()> {
//! let client = TerraformCloudClient::new("https://app.terraform.io/api/v2", "token");
//! let workspace = client.get_workspace("my-org", "development-droplet").await?;
//! println!("Workspace: {}", workspace.id);
//! # Ok(())
//! # }
//! ```

mod digitalocean;
pub mod error;
pub mod retry;
mod runs;
mod state;
mod terraform;
mod workspaces;

pub use digitalocean::DigitalOceanClient;
pub use error::{ClientError, Result};
pub use retry::RetryPolicy;
pub use terraform::TerraformCloudClient;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

/// Checks the status code and deserializes the JSON body
///
/// Any status other than `expected` is turned into an API error carrying the
/// response body.
async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
    expected: StatusCode,
) -> Result<T> {
    let status = response.status();

    if status != expected {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ClientError::unexpected_status(status, expected, error_text));
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

/// Rejects empty path parameters before a request is built
fn require_non_empty(value: &str, what: &'static str) -> Result<()> {
    if value.is_empty() {
        return Err(ClientError::EmptyParameter(what));
    }
    Ok(())
}

fn trim_base_url(base_url: impl Into<String>) -> String {
    base_url.into().trim_end_matches('/').to_string()
}
