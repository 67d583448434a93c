//! The sweep: fetch, classify and act, refetch, refill.
//!
//! Everything here is synchronous and single threaded. Instances are swept
//! in configuration order, one at a time, and a failure in one instance
//! never blocks the next.

mod report;
mod run;
mod source;

pub use report::{InstanceOutcome, SweepSummary};
pub use run::{sweep_all, sweep_instance, unix_now};
pub use source::JobSource;
