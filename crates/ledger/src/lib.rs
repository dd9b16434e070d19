//! Bounded, append-only event ledger.
//!
//! This crate provides the history structure used by the status display and
//! form validation managers:
//! - Timestamped, immutable entries
//! - FIFO eviction at a fixed capacity
//! - Kind filtering and most-recent limits
//! - Injected error and update hooks
//! - A mutex-guarded handle for hosts shared across threads

pub mod config;
pub mod entry;
pub mod hooks;
pub mod ledger;
pub mod query;
pub mod shared;

pub use common::{LedgerError, LedgerResult};
pub use config::{LedgerConfig, DEFAULT_MAX_SIZE};
pub use entry::Entry;
pub use hooks::{ErrorHook, FaultContext, Operation, UpdateHook};
pub use ledger::{Ledger, LedgerBuilder};
pub use query::Query;
pub use shared::SharedLedger;
