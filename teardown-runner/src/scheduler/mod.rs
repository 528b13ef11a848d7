//! Scheduler layer for the runner
//!
//! Waits on remote run state transitions. This is separate from the
//! transport retries in `teardown-client`: those replay one idempotent
//! request, this re-reads a run until it stops changing.

pub mod poller;

pub use poller::{PollPolicy, RunPoller};
