//! Error and update hooks injected into a ledger.

use common::{LedgerError, LedgerResult};
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Receives every internal fault together with where it happened.
pub type ErrorHook = Arc<dyn Fn(&FaultContext, &LedgerError) + Send + Sync>;

/// Receives the new size after every successful `add` or `clear`.
pub type UpdateHook = Arc<dyn Fn(usize) -> LedgerResult<()> + Send + Sync>;

/// Public ledger operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Get,
    Clear,
    Size,
    Export,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Add => "ledger.add",
            Operation::Get => "ledger.get",
            Operation::Clear => "ledger.clear",
            Operation::Size => "ledger.size",
            Operation::Export => "ledger.export",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a fault happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaultContext {
    pub operation: Operation,
    /// Ledger size when the fault was reported.
    pub size: usize,
}

impl fmt::Display for FaultContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (size {})", self.operation, self.size)
    }
}

/// Default error hook: log the fault and carry on.
pub fn log_fault(context: &FaultContext, error: &LedgerError) {
    tracing::warn!(
        operation = %context.operation,
        size = context.size,
        error = %error,
        "ledger operation failed"
    );
}

pub(crate) fn default_error_hook() -> ErrorHook {
    Arc::new(log_fault)
}

/// Run `f`, turning a panic into `LedgerError::Panic`.
///
/// The process panic hook still runs before unwinding, so a contained panic
/// is printed to stderr as well as reported to the error hook.
pub(crate) fn contain<T>(f: impl FnOnce() -> LedgerResult<T>) -> LedgerResult<T> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(LedgerError::panic(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
