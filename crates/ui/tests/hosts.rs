//! Ledger hosts driven the way the popup and options pages drive them.

use ledger::{Ledger, LedgerConfig, LedgerError, Query};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use ui::{StatusHistory, StatusKind, ValidationHistory, ValidationOutcome};

#[test]
fn test_status_history_is_bounded() {
    let mut status = StatusHistory::new(LedgerConfig::new().with_max_size(3)).unwrap();
    for i in 0..5 {
        status.show(StatusKind::Info, format!("step {i}"));
    }
    status.show(StatusKind::Error, "failed");

    assert_eq!(status.len(), 3);
    let messages: Vec<String> = status
        .history(&Query::all())
        .iter()
        .map(|e| e.message().to_string())
        .collect();
    assert_eq!(messages, ["step 3", "step 4", "failed"]);

    let stats = status.statistics();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.count(StatusKind::Info), 2);
    assert_eq!(stats.count(StatusKind::Error), 1);
    assert_eq!(
        stats.last_shown,
        status.current().map(|entry| entry.timestamp())
    );
}

#[test]
fn test_status_recent_and_kind() {
    let mut status = StatusHistory::default();
    status.show(StatusKind::Loading, "Signing in...");
    status.show(StatusKind::Success, "Signed in");
    status.show(StatusKind::Loading, "Syncing...");

    assert_eq!(status.recent(1)[0].message(), "Syncing...");
    assert_eq!(status.of_kind(StatusKind::Loading).len(), 2);
    assert_eq!(status.clear(), 3);
    assert!(status.is_empty());
    assert!(status.current().is_none());
}

#[test]
fn test_disabled_status_history() {
    let mut status = StatusHistory::new(LedgerConfig::disabled()).unwrap();
    status.show(StatusKind::Success, "Saved");
    assert!(status.is_empty());
    assert_eq!(status.statistics().total, 0);
}

#[test]
fn test_status_history_survives_failing_listener() {
    let faults = Arc::new(AtomicUsize::new(0));
    let sink = faults.clone();
    let ledger = Ledger::builder()
        .on_update(|_| Err(LedgerError::hook("history panel detached")))
        .on_error(move |_, _| {
            sink.fetch_add(1, Ordering::SeqCst);
        })
        .build()
        .unwrap();

    let mut status = StatusHistory::with_ledger(ledger);
    status.show(StatusKind::Success, "Saved");

    assert_eq!(status.len(), 1);
    assert_eq!(faults.load(Ordering::SeqCst), 1);
}

#[test]
fn test_validation_history_capacity() {
    let mut history = ValidationHistory::new(LedgerConfig::new().with_max_size(2)).unwrap();
    history.record(&ValidationOutcome::invalid("email", "email-invalid", "Bad"));
    history.record(&ValidationOutcome::valid("email"));
    history.record(&ValidationOutcome::valid("password"));

    let stats = history.statistics();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.failed, 0);
    assert!(history.failures(0).is_empty());
}

#[test]
fn test_invalid_host_config() {
    let err = ValidationHistory::new(LedgerConfig::new().with_max_size(0)).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidConfig(_)));
}
