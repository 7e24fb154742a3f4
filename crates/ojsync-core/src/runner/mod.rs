//! Resilient job runner.
//!
//! Wraps a long-running batch job so any uncaught failure restarts it from
//! the top. Paired with the progress ledger, a restart skips everything
//! already recorded as done, so wasted work is bounded to the items in
//! flight when the failure hit. Backoff between restarts is governed by
//! `RestartPolicy`.

mod policy;
mod run;

pub use policy::{RestartDecision, RestartPolicy};
pub use run::run_with_restart;
