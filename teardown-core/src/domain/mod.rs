//! Core domain types
//!
//! These types represent the entities the teardown workflow reads from the
//! control plane and the cloud provider. None of them are persisted; every
//! invocation fetches them fresh.

pub mod droplet;
pub mod output;
pub mod run;
pub mod workspace;
