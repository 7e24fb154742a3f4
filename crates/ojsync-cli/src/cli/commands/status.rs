//! `ojsync status` – show ledger entries and summary counts.

use anyhow::Result;
use ojsync_core::ledger::Ledger;
use std::path::Path;

pub fn run_status(ledger_path: &Path) -> Result<()> {
    let ledger = Ledger::open(ledger_path)?;
    let summary = ledger.summary();
    if summary.done + summary.in_progress == 0 {
        println!("Ledger {} is empty.", ledger_path.display());
        return Ok(());
    }

    println!("{:<12} {}", "STATE", "KEY");
    for (key, status) in ledger.entries() {
        println!("{:<12} {}", status.as_str(), key);
    }
    println!();
    println!("{} done, {} in progress", summary.done, summary.in_progress);
    Ok(())
}
