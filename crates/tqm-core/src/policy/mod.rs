//! Sweep policy: per-torrent classification and active-set admission.
//!
//! Everything here is pure decision logic over a snapshot: [`classify`] maps
//! one torrent to a verdict given explicit thresholds, and
//! [`plan_admissions`] picks which idle torrents to start against a
//! concurrency limit. Applying the decisions to a daemon is the sweep
//! orchestrator's job.

mod admit;
mod classify;

pub use admit::{plan_admissions, AdmissionPlan};
pub use classify::{classify, SweepThresholds, Verdict, SLOW_PROGRESS_CUTOFF};
