//! Status message history.

use common::LedgerResult;
use indexmap::IndexMap;
use ledger::{Entry, Ledger, LedgerConfig, Query};
use std::fmt;
use std::time::SystemTime;
use tracing::debug;

/// Status message kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusKind {
    Success,
    Error,
    Warning,
    Info,
    Loading,
}

impl StatusKind {
    /// Ledger kind label.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusKind::Success => "success",
            StatusKind::Error => "error",
            StatusKind::Warning => "warning",
            StatusKind::Info => "info",
            StatusKind::Loading => "loading",
        }
    }

    /// How long the message stays on screen, in milliseconds.
    /// Loading messages stay until replaced.
    pub fn default_duration(&self) -> Option<u64> {
        match self {
            StatusKind::Success => Some(3000),
            StatusKind::Error => Some(5000),
            StatusKind::Warning => Some(4000),
            StatusKind::Info => Some(3000),
            StatusKind::Loading => None,
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary of the retained status history.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatusStatistics {
    pub total: usize,
    pub by_kind: IndexMap<String, usize>,
    pub last_shown: Option<SystemTime>,
}

impl StatusStatistics {
    pub fn count(&self, kind: StatusKind) -> usize {
        self.by_kind.get(kind.as_str()).copied().unwrap_or(0)
    }
}

/// Status display history.
#[derive(Debug, Default)]
pub struct StatusHistory {
    ledger: Ledger,
}

impl StatusHistory {
    pub fn new(config: LedgerConfig) -> LedgerResult<Self> {
        Ok(Self::with_ledger(Ledger::with_config(config)?))
    }

    /// Host an already configured ledger, hooks included.
    pub fn with_ledger(ledger: Ledger) -> Self {
        Self { ledger }
    }

    /// Show a message for the kind's default duration.
    pub fn show(&mut self, kind: StatusKind, message: impl Into<String>) {
        self.record(kind, message.into(), kind.default_duration());
    }

    pub fn show_for(&mut self, kind: StatusKind, message: impl Into<String>, duration_ms: u64) {
        self.record(kind, message.into(), Some(duration_ms));
    }

    fn record(&mut self, kind: StatusKind, message: String, duration: Option<u64>) {
        debug!(kind = kind.as_str(), message = %message, ?duration, "status shown");
        self.ledger.add(kind.as_str(), message, duration);
    }

    /// The status most recently shown.
    pub fn current(&self) -> Option<Entry> {
        self.ledger.last()
    }

    pub fn history(&self, query: &Query) -> Vec<Entry> {
        self.ledger.get(query)
    }

    pub fn recent(&self, limit: usize) -> Vec<Entry> {
        self.ledger.get(&Query::all().with_limit(limit))
    }

    pub fn of_kind(&self, kind: StatusKind) -> Vec<Entry> {
        self.ledger.get(&Query::by_kind(kind.as_str()))
    }

    pub fn clear(&mut self) -> usize {
        self.ledger.clear()
    }

    pub fn len(&self) -> usize {
        self.ledger.size()
    }

    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    pub fn statistics(&self) -> StatusStatistics {
        let by_kind = self.ledger.kinds();
        StatusStatistics {
            total: by_kind.values().sum(),
            by_kind,
            last_shown: self.ledger.last().map(|entry| entry.timestamp()),
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
}
