//! `ojsync reset` – drop interrupted entries so the next run redoes them.

use anyhow::Result;
use ojsync_core::ledger::Ledger;
use std::path::Path;

pub fn run_reset(ledger_path: &Path, key: Option<&str>) -> Result<()> {
    let mut ledger = Ledger::open(ledger_path)?;
    let removed = ledger.clear_in_progress(key)?;
    match key {
        Some(key) if removed == 0 => {
            println!("Key {key} is not in progress; nothing to reset.")
        }
        Some(key) => println!("Reset key {key}."),
        None => println!("Reset {removed} in-progress entries."),
    }
    tracing::info!(removed, ledger = %ledger_path.display(), "reset in-progress entries");
    Ok(())
}
