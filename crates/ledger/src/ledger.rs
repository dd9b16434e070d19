//! The bounded event ledger.

use crate::config::LedgerConfig;
use crate::entry::Entry;
use crate::hooks::{self, contain, ErrorHook, FaultContext, Operation, UpdateHook};
use crate::query::Query;
use common::{LedgerError, LedgerResult};
use indexmap::IndexMap;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{debug, trace};

/// Bounded, append-only history of timestamped entries.
///
/// Entries are kept oldest first. Once the ledger holds `max_size` entries,
/// every further `add` evicts exactly one oldest entry. None of the public
/// operations fail or panic: internal faults go to the error hook and the
/// operation falls back to an empty or zero result.
pub struct Ledger {
    entries: VecDeque<Entry>,
    config: LedgerConfig,
    next_id: u64,
    last_timestamp: Option<SystemTime>,
    on_error: ErrorHook,
    on_update: Option<UpdateHook>,
}

impl Ledger {
    /// Create a ledger with the default configuration.
    pub fn new() -> Self {
        Self::from_parts(LedgerConfig::default(), hooks::default_error_hook(), None)
    }

    /// Create a ledger with the given configuration.
    pub fn with_config(config: LedgerConfig) -> LedgerResult<Self> {
        Self::builder().config(config).build()
    }

    pub fn builder() -> LedgerBuilder {
        LedgerBuilder::default()
    }

    fn from_parts(config: LedgerConfig, on_error: ErrorHook, on_update: Option<UpdateHook>) -> Self {
        Self {
            entries: VecDeque::new(),
            config,
            next_id: 0,
            last_timestamp: None,
            on_error,
            on_update,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn max_size(&self) -> usize {
        self.config.max_size
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Record an entry stamped with the current time.
    ///
    /// Does nothing when the ledger is disabled. A failing update hook is
    /// reported but the entry stays recorded.
    pub fn add(&mut self, kind: impl Into<String>, message: impl Into<String>, duration: Option<u64>) {
        if !self.config.enabled {
            return;
        }

        let kind = kind.into();
        let message = message.into();
        let recorded = self.guard_mut(Operation::Add, false, move |ledger| {
            ledger.record(kind, message, duration);
            Ok(true)
        });

        if recorded {
            self.notify(Operation::Add, self.entries.len());
        }
    }

    /// Copy out the entries matching `query`, oldest first.
    pub fn get(&self, query: &Query) -> Vec<Entry> {
        self.guard(Operation::Get, Vec::new(), |ledger| {
            Ok(query.select(ledger.entries.iter()))
        })
    }

    /// Copy out every entry, oldest first.
    pub fn entries(&self) -> Vec<Entry> {
        self.get(&Query::all())
    }

    /// Remove every entry and return how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.guard_mut(Operation::Clear, None, |ledger| {
            let removed = ledger.entries.len();
            ledger.entries.clear();
            debug!(removed, "ledger cleared");
            Ok(Some(removed))
        });

        match removed {
            Some(removed) => {
                self.notify(Operation::Clear, 0);
                removed
            }
            None => 0,
        }
    }

    /// Number of retained entries.
    pub fn size(&self) -> usize {
        self.guard(Operation::Size, 0, |ledger| Ok(ledger.entries.len()))
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// The most recent entry.
    pub fn last(&self) -> Option<Entry> {
        self.guard(Operation::Get, None, |ledger| Ok(ledger.entries.back().cloned()))
    }

    /// Entry counts per kind, in first-seen order.
    pub fn kinds(&self) -> IndexMap<String, usize> {
        self.guard(Operation::Get, IndexMap::new(), |ledger| {
            let mut counts = IndexMap::new();
            for entry in &ledger.entries {
                *counts.entry(entry.kind().to_string()).or_insert(0) += 1;
            }
            Ok(counts)
        })
    }

    /// Pretty JSON array of the retained entries.
    pub fn to_json(&self) -> String {
        self.guard(Operation::Export, "[]".to_string(), |ledger| {
            let entries: Vec<&Entry> = ledger.entries.iter().collect();
            Ok(serde_json::to_string_pretty(&entries)?)
        })
    }

    fn record(&mut self, kind: String, message: String, duration: Option<u64>) {
        let timestamp = self.stamp();
        self.next_id += 1;

        let entry = Entry::new(self.next_id, kind, message, timestamp, duration);
        trace!(id = entry.id(), kind = entry.kind(), "ledger entry recorded");
        self.entries.push_back(entry);

        if self.entries.len() > self.config.max_size {
            if let Some(evicted) = self.entries.pop_front() {
                debug!(
                    id = evicted.id(),
                    max_size = self.config.max_size,
                    "evicted oldest ledger entry"
                );
            }
        }
    }

    /// Current time, never earlier than the previous entry's timestamp.
    fn stamp(&mut self) -> SystemTime {
        let now = SystemTime::now();
        let timestamp = match self.last_timestamp {
            Some(last) if now < last => last,
            _ => now,
        };
        self.last_timestamp = Some(timestamp);
        timestamp
    }

    fn notify(&self, operation: Operation, size: usize) {
        let Some(on_update) = &self.on_update else {
            return;
        };

        if let Err(err) = contain(|| on_update(size)) {
            self.report(operation, &err);
        }
    }

    fn guard<T>(&self, operation: Operation, fallback: T, f: impl FnOnce(&Self) -> LedgerResult<T>) -> T {
        match contain(|| f(self)) {
            Ok(value) => value,
            Err(err) => {
                self.report(operation, &err);
                fallback
            }
        }
    }

    fn guard_mut<T>(
        &mut self,
        operation: Operation,
        fallback: T,
        f: impl FnOnce(&mut Self) -> LedgerResult<T>,
    ) -> T {
        match contain(|| f(self)) {
            Ok(value) => value,
            Err(err) => {
                self.report(operation, &err);
                fallback
            }
        }
    }

    fn report(&self, operation: Operation, error: &LedgerError) {
        let context = FaultContext {
            operation,
            size: self.entries.len(),
        };
        let on_error = &self.on_error;

        // A panicking error hook must not escape either.
        if contain(|| {
            on_error(&context, error);
            Ok(())
        })
        .is_err()
        {
            hooks::log_fault(&context, error);
        }
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("config", &self.config)
            .field("size", &self.entries.len())
            .field("next_id", &self.next_id)
            .field("has_update_hook", &self.on_update.is_some())
            .finish()
    }
}

/// Builder for a ledger with custom hooks.
#[derive(Default)]
pub struct LedgerBuilder {
    config: LedgerConfig,
    on_error: Option<ErrorHook>,
    on_update: Option<UpdateHook>,
}

impl LedgerBuilder {
    pub fn config(mut self, config: LedgerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.config.enabled = enabled;
        self
    }

    pub fn max_size(mut self, max_size: usize) -> Self {
        self.config.max_size = max_size;
        self
    }

    /// Replace the default logging error hook.
    pub fn on_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(&FaultContext, &LedgerError) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(hook));
        self
    }

    /// Called with the new size after every `add` and `clear`.
    ///
    /// An `Err` or a panic from the hook goes to the error hook. Panics are
    /// caught with `catch_unwind`, which leaves the process panic hook in
    /// place, so the default hook still prints the panic to stderr.
    pub fn on_update<F>(mut self, hook: F) -> Self
    where
        F: Fn(usize) -> LedgerResult<()> + Send + Sync + 'static,
    {
        self.on_update = Some(Arc::new(hook));
        self
    }

    pub fn build(self) -> LedgerResult<Ledger> {
        self.config.validate()?;
        let on_error = self.on_error.unwrap_or_else(hooks::default_error_hook);
        Ok(Ledger::from_parts(self.config, on_error, self.on_update))
    }
}
