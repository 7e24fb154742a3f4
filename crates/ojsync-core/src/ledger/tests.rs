//! Tests for the progress ledger (temp-dir files via tempfile).

use super::{ItemStatus, Ledger};
use tempfile::tempdir;

#[test]
fn missing_file_is_empty_ledger() {
    let dir = tempdir().unwrap();
    let ledger = Ledger::open(dir.path().join("progress.json")).unwrap();
    assert_eq!(ledger.status("anything"), ItemStatus::Unseen);
    assert_eq!(ledger.summary().done, 0);
    assert_eq!(ledger.summary().in_progress, 0);
}

#[test]
fn transitions_and_status() {
    let dir = tempdir().unwrap();
    let mut ledger = Ledger::open(dir.path().join("progress.json")).unwrap();

    assert_eq!(ledger.status("a"), ItemStatus::Unseen);
    ledger.mark_in_progress("a").unwrap();
    assert_eq!(ledger.status("a"), ItemStatus::InProgress);
    assert!(!ledger.is_done("a"));
    ledger.mark_done("a").unwrap();
    assert_eq!(ledger.status("a"), ItemStatus::Done);
    assert!(ledger.is_done("a"));
}

#[test]
fn done_is_terminal() {
    let dir = tempdir().unwrap();
    let mut ledger = Ledger::open(dir.path().join("progress.json")).unwrap();
    ledger.mark_done("a").unwrap();
    ledger.mark_in_progress("a").unwrap();
    assert_eq!(ledger.status("a"), ItemStatus::Done);
}

#[test]
fn every_transition_is_durable() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("progress.json");
    let mut ledger = Ledger::open(&path).unwrap();
    ledger.mark_done("a").unwrap();

    // Crash simulated right after the in-progress flip: a fresh load must
    // see `b` as interrupted, not missing and not done.
    ledger.mark_in_progress("b").unwrap();
    let reloaded = Ledger::open(&path).unwrap();
    assert_eq!(reloaded.status("a"), ItemStatus::Done);
    assert_eq!(reloaded.status("b"), ItemStatus::InProgress);

    ledger.mark_done("b").unwrap();
    let reloaded = Ledger::open(&path).unwrap();
    assert_eq!(reloaded.status("b"), ItemStatus::Done);
}

#[test]
fn file_format_is_plain_json_object() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("progress.json");
    let mut ledger = Ledger::open(&path).unwrap();
    ledger.mark_done("a").unwrap();
    ledger.mark_in_progress("b").unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed["a"], serde_json::Value::Bool(true));
    assert_eq!(parsed["b"], serde_json::Value::Bool(false));
}

#[test]
fn parent_directories_are_created_on_first_flush() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state").join("deep").join("progress.json");
    let mut ledger = Ledger::open(&path).unwrap();
    ledger.mark_in_progress("x").unwrap();
    assert!(path.exists());
}

#[test]
fn clear_in_progress_drops_only_interrupted_entries() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("progress.json");
    let mut ledger = Ledger::open(&path).unwrap();
    ledger.mark_done("a").unwrap();
    ledger.mark_in_progress("b").unwrap();
    ledger.mark_in_progress("c").unwrap();

    assert_eq!(ledger.clear_in_progress(Some("b")).unwrap(), 1);
    assert_eq!(ledger.status("b"), ItemStatus::Unseen);
    assert_eq!(ledger.status("c"), ItemStatus::InProgress);

    // Clearing a done key is a no-op.
    assert_eq!(ledger.clear_in_progress(Some("a")).unwrap(), 0);
    assert_eq!(ledger.status("a"), ItemStatus::Done);

    assert_eq!(ledger.clear_in_progress(None).unwrap(), 1);
    assert_eq!(ledger.status("c"), ItemStatus::Unseen);

    let reloaded = Ledger::open(&path).unwrap();
    assert_eq!(reloaded.status("a"), ItemStatus::Done);
    assert_eq!(reloaded.status("c"), ItemStatus::Unseen);
}

#[test]
fn entries_iterate_in_key_order() {
    let dir = tempdir().unwrap();
    let mut ledger = Ledger::open(dir.path().join("progress.json")).unwrap();
    ledger.mark_done("p100/2.in").unwrap();
    ledger.mark_in_progress("p100/1.in").unwrap();

    let keys: Vec<&str> = ledger.entries().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["p100/1.in", "p100/2.in"]);
    let summary = ledger.summary();
    assert_eq!(summary.done, 1);
    assert_eq!(summary.in_progress, 1);
}
