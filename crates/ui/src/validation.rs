//! Form validation result history.

use common::LedgerResult;
use indexmap::IndexMap;
use ledger::{Entry, Ledger, LedgerConfig, Query};
use tracing::debug;

/// Code recorded for a field that passed validation.
pub const VALID_CODE: &str = "valid";

/// Result of validating one form field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub field: String,
    pub valid: bool,
    /// Field-specific code such as `email-invalid`.
    pub code: String,
    pub message: String,
}

impl ValidationOutcome {
    pub fn valid(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            valid: true,
            code: VALID_CODE.to_string(),
            message: "passed".to_string(),
        }
    }

    pub fn invalid(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            valid: false,
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Counts over the retained validation history.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationStatistics {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub by_code: IndexMap<String, usize>,
}

/// Validation result history of the options page forms.
#[derive(Debug, Default)]
pub struct ValidationHistory {
    ledger: Ledger,
}

impl ValidationHistory {
    pub fn new(config: LedgerConfig) -> LedgerResult<Self> {
        Ok(Self::with_ledger(Ledger::with_config(config)?))
    }

    pub fn with_ledger(ledger: Ledger) -> Self {
        Self { ledger }
    }

    pub fn record(&mut self, outcome: &ValidationOutcome) {
        debug!(
            field = %outcome.field,
            valid = outcome.valid,
            code = %outcome.code,
            "validation recorded"
        );
        self.ledger.add(
            outcome.code.as_str(),
            format!("{}: {}", outcome.field, outcome.message),
            None,
        );
    }

    /// Failed results, most recent last. A zero limit returns all of them.
    pub fn failures(&self, limit: usize) -> Vec<Entry> {
        self.ledger
            .get(&Query::all().without_kind(VALID_CODE).with_limit(limit))
    }

    pub fn results_for(&self, code: &str, limit: usize) -> Vec<Entry> {
        self.ledger.get(&Query::by_kind(code).with_limit(limit))
    }

    pub fn statistics(&self) -> ValidationStatistics {
        let by_code = self.ledger.kinds();
        let total: usize = by_code.values().sum();
        let passed = by_code.get(VALID_CODE).copied().unwrap_or(0);
        ValidationStatistics {
            total,
            passed,
            failed: total - passed,
            by_code,
        }
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
}
