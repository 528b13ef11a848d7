//! Data transfer objects
//!
//! Wire formats exchanged with Terraform Cloud (JSON:API), DigitalOcean,
//! and the function runtime.

pub mod droplet;
pub mod event;
pub mod jsonapi;
pub mod log;
pub mod run;
pub mod state;
pub mod workspace;
