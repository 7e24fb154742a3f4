//! `ojsync mark-done` – record an item as completed.

use anyhow::Result;
use ojsync_core::ledger::Ledger;
use std::path::Path;

pub fn run_mark_done(ledger_path: &Path, key: &str) -> Result<()> {
    let mut ledger = Ledger::open(ledger_path)?;
    if ledger.is_done(key) {
        println!("Key {key} is already done.");
        return Ok(());
    }
    ledger.mark_done(key)?;
    println!("Marked {key} done.");
    tracing::info!(key, ledger = %ledger_path.display(), "manually marked done");
    Ok(())
}
