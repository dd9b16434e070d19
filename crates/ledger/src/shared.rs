//! Ledger handle shared between threads.

use crate::entry::Entry;
use crate::ledger::Ledger;
use crate::query::Query;
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle serializing access to one ledger.
///
/// Hooks run while the lock is held and must not call back into the same
/// handle.
#[derive(Clone, Debug)]
pub struct SharedLedger {
    inner: Arc<Mutex<Ledger>>,
}

impl SharedLedger {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    pub fn add(&self, kind: impl Into<String>, message: impl Into<String>, duration: Option<u64>) {
        self.inner.lock().add(kind, message, duration);
    }

    pub fn get(&self, query: &Query) -> Vec<Entry> {
        self.inner.lock().get(query)
    }

    pub fn clear(&self) -> usize {
        self.inner.lock().clear()
    }

    pub fn size(&self) -> usize {
        self.inner.lock().size()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Run `f` with the ledger locked.
    pub fn with<R>(&self, f: impl FnOnce(&Ledger) -> R) -> R {
        f(&self.inner.lock())
    }
}

impl Default for SharedLedger {
    fn default() -> Self {
        Self::new(Ledger::new())
    }
}

impl From<Ledger> for SharedLedger {
    fn from(ledger: Ledger) -> Self {
        Self::new(ledger)
    }
}
