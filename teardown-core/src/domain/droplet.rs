//! Droplet domain types

use serde::{Deserialize, Serialize};

/// A DigitalOcean virtual compute instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Droplet {
    pub id: u64,
    pub name: String,
    pub status: String,
}
