//! Plan and apply DTOs
//!
//! Only the log location is read from these sub-resources.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSourceResource {
    pub id: String,
    pub attributes: LogSourceAttributes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LogSourceAttributes {
    pub log_read_url: String,
}
