//! Common types shared across the Mindful Web diagnostics crates.

pub mod error;

pub use error::{LedgerError, LedgerResult};
