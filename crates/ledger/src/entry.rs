//! Ledger entries.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// One immutable record in a ledger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Insertion sequence number.
    id: u64,
    /// Caller-defined category label.
    kind: String,
    /// Caller-defined text.
    message: String,
    /// Time of insertion.
    timestamp: SystemTime,
    /// Caller-supplied payload, usually a display time in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    duration: Option<u64>,
}

impl Entry {
    pub(crate) fn new(
        id: u64,
        kind: String,
        message: String,
        timestamp: SystemTime,
        duration: Option<u64>,
    ) -> Self {
        Self {
            id,
            kind,
            message,
            timestamp,
            duration,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }

    pub fn duration(&self) -> Option<u64> {
        self.duration
    }

    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind == kind
    }
}
