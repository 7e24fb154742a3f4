//! Types used by the progress ledger.

/// Per-item completion state.
///
/// On disk only two of these exist (`false` = in progress, `true` = done);
/// an absent key reads as `Unseen`. `Done` is terminal; re-observing
/// `InProgress` after a restart means the item's work was interrupted and
/// must be redone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    Unseen,
    InProgress,
    Done,
}

impl ItemStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemStatus::Unseen => "unseen",
            ItemStatus::InProgress => "in-progress",
            ItemStatus::Done => "done",
        }
    }
}

/// Entry counts used by the CLI `status` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerSummary {
    pub done: usize,
    pub in_progress: usize,
}
