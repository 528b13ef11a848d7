//! Teardown Core
//!
//! Core types shared by the droplet teardown client and runner.
//!
//! This crate contains:
//! - Domain types: Workspaces, runs, state outputs and droplets
//! - DTOs: JSON:API documents exchanged with the control plane, plus the
//!   invocation event and result

pub mod domain;
pub mod dto;
