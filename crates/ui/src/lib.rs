//! Popup and options page managers.
//!
//! This crate provides the ledger hosts of the extension UI:
//! - Status message display history
//! - Form validation result history

pub mod status;
pub mod validation;

pub use status::{StatusHistory, StatusKind, StatusStatistics};
pub use validation::{ValidationHistory, ValidationOutcome, ValidationStatistics};
