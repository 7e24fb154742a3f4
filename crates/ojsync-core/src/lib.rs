pub mod config;
pub mod logging;

pub mod batch;
pub mod ledger;
pub mod queue;
pub mod runner;
