//! DigitalOcean droplet DTOs

use serde::{Deserialize, Serialize};

use crate::domain::droplet::Droplet;

/// Body of `GET /droplets/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropletEnvelope {
    pub droplet: DropletResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropletResource {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub status: String,
}

impl From<DropletEnvelope> for Droplet {
    fn from(envelope: DropletEnvelope) -> Self {
        Self {
            id: envelope.droplet.id,
            name: envelope.droplet.name,
            status: envelope.droplet.status,
        }
    }
}
