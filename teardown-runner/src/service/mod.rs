//! Service layer
//!
//! The teardown workflow: the business logic that sequences repository
//! calls and decides which failures end an invocation.

mod teardown;

pub use teardown::{TeardownService, TeardownSettings};
