//! Droplet Teardown
//!
//! Snapshots a DigitalOcean droplet through Terraform Cloud and then
//! destroys it, once per invocation.
//!
//! Architecture:
//! - Configuration: Tokens, endpoints and tuning from the environment
//! - Repositories: Terraform Cloud and DigitalOcean access reduced to absent/present results
//! - Scheduler: Fixed-interval run polling
//! - Services: The teardown workflow
//!
//! The event is taken from `--event` (or `TEARDOWN_EVENT`) or built from
//! `--droplet-name`; the result object is printed to stdout as JSON.

mod config;
mod repository;
mod scheduler;
mod service;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use teardown_client::{DigitalOceanClient, TerraformCloudClient};
use teardown_core::dto::event::TeardownEvent;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::repository::{
    ControlPlaneRepository, HttpControlPlaneRepository, HttpProviderRepository,
};
use crate::scheduler::RunPoller;
use crate::service::{TeardownService, TeardownSettings};

#[derive(Parser)]
#[command(name = "droplet-teardown")]
#[command(about = "Snapshot and destroy a droplet via Terraform Cloud", long_about = None)]
struct Cli {
    /// Invocation event as JSON, e.g. '{"droplet_name": "dev-web"}'
    #[arg(long, env = "TEARDOWN_EVENT", conflicts_with = "droplet_name")]
    event: Option<String>,

    /// Droplet name, shorthand for an event carrying only this field
    #[arg(long)]
    droplet_name: Option<String>,
}

impl Cli {
    fn into_event(self) -> Result<TeardownEvent> {
        match self.event {
            Some(raw) => serde_json::from_str(&raw).context("Failed to parse event JSON"),
            None => Ok(TeardownEvent {
                droplet_name: self.droplet_name,
            }),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only the result
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "droplet_teardown=info,teardown_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let event = Cli::parse().into_event()?;

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate()?;
    info!(
        "Loaded configuration: organization={}, droplet_workspace={}, snapshot_workspace={}",
        config.organization, config.droplet_workspace, config.snapshot_workspace
    );

    let service = build_service(&config);
    let result = service.execute(&event).await;

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}

/// Wires clients, repositories and the poller from configuration
fn build_service(config: &Config) -> TeardownService {
    let tfc_client = TerraformCloudClient::new(&config.tfc_api_url, &config.tfc_token)
        .with_retry_policy(config.retry_policy());
    let do_client = DigitalOceanClient::new(&config.digitalocean_api_url, &config.digitalocean_token)
        .with_retry_policy(config.retry_policy());

    let control_plane: Arc<dyn ControlPlaneRepository> = Arc::new(HttpControlPlaneRepository::new(
        tfc_client,
        &config.organization,
        &config.digitalocean_token,
    ));
    let provider = Arc::new(HttpProviderRepository::new(do_client));
    let poller = RunPoller::new(Arc::clone(&control_plane), config.poll);

    TeardownService::new(control_plane, provider, poller, TeardownSettings::from(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_from_flag() {
        let cli = Cli::try_parse_from(["droplet-teardown", "--droplet-name", "dev-web"]).unwrap();
        let event = cli.into_event().unwrap();
        assert_eq!(event.droplet_name(), Some("dev-web"));
    }

    #[test]
    fn test_event_from_json() {
        let cli = Cli::try_parse_from([
            "droplet-teardown",
            "--event",
            r#"{"droplet_name": "dev-db"}"#,
        ])
        .unwrap();
        let event = cli.into_event().unwrap();
        assert_eq!(event.droplet_name(), Some("dev-db"));
    }

    #[test]
    fn test_event_json_must_parse() {
        let cli = Cli::try_parse_from(["droplet-teardown", "--event", "not json"]).unwrap();
        assert!(cli.into_event().is_err());
    }
}
