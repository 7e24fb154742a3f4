//! Persistent per-item progress ledger.
//!
//! Maps item keys to a tri-state completion status and rewrites the backing
//! JSON file after every transition, so a crash at any point leaves the file
//! consistent with what has definitely completed. Keys are logical item
//! identities chosen by the caller; the ledger never interprets them.

pub mod types;

#[cfg(test)]
mod tests;

pub use types::{ItemStatus, LedgerSummary};

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Write-through progress ledger backed by a JSON file (key → bool, where
/// `false` means started-but-not-finished and `true` means done).
///
/// The whole file is rewritten on every mutation. That is wasteful for huge
/// item counts but exact for the hundreds-to-low-thousands this is built for,
/// and it keeps the on-disk state trivially inspectable.
#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    entries: BTreeMap<String, bool>,
}

impl Ledger {
    /// Open the ledger at `path`, loading existing entries if the file is
    /// present. A missing file is an empty ledger; the file is created on
    /// the first mutation.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("read ledger {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parse ledger {}", path.display()))?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Status of `key`: absent = `Unseen`, `false` = `InProgress`,
    /// `true` = `Done`.
    pub fn status(&self, key: &str) -> ItemStatus {
        match self.entries.get(key) {
            None => ItemStatus::Unseen,
            Some(false) => ItemStatus::InProgress,
            Some(true) => ItemStatus::Done,
        }
    }

    /// Whether `key` has fully completed. `InProgress` counts as not done:
    /// a run interrupted mid-item must redo that item.
    pub fn is_done(&self, key: &str) -> bool {
        self.status(key) == ItemStatus::Done
    }

    /// Record that work on `key` has started (sets `false` and flushes).
    /// A key already `Done` is left untouched; done is terminal.
    pub fn mark_in_progress(&mut self, key: &str) -> Result<()> {
        if self.is_done(key) {
            return Ok(());
        }
        self.entries.insert(key.to_string(), false);
        self.flush()
    }

    /// Record that work on `key` has fully completed, side effects included
    /// (sets `true` and flushes).
    pub fn mark_done(&mut self, key: &str) -> Result<()> {
        self.entries.insert(key.to_string(), true);
        self.flush()
    }

    /// All entries, in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, ItemStatus)> {
        self.entries.iter().map(|(k, done)| {
            let status = if *done {
                ItemStatus::Done
            } else {
                ItemStatus::InProgress
            };
            (k.as_str(), status)
        })
    }

    /// Counts of done and in-progress entries.
    pub fn summary(&self) -> LedgerSummary {
        let done = self.entries.values().filter(|done| **done).count();
        LedgerSummary {
            done,
            in_progress: self.entries.len() - done,
        }
    }

    /// Drop every `InProgress` entry (or just `key`, if given), so the next
    /// run treats the affected items as never started. Returns the number of
    /// entries removed. Flushes only when something changed.
    pub fn clear_in_progress(&mut self, key: Option<&str>) -> Result<usize> {
        let before = self.entries.len();
        match key {
            Some(key) => {
                if self.status(key) == ItemStatus::InProgress {
                    self.entries.remove(key);
                }
            }
            None => self.entries.retain(|_, done| *done),
        }
        let removed = before - self.entries.len();
        if removed > 0 {
            self.flush()?;
        }
        Ok(removed)
    }

    /// Rewrite the backing file with the current entries, creating parent
    /// directories on first use. Pretty-printed so the file stays hand-
    /// inspectable and diffs cleanly.
    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create ledger dir {}", parent.display()))?;
            }
        }
        let raw = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("write ledger {}", self.path.display()))
    }
}
