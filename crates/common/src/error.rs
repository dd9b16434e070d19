//! Common error types.

use thiserror::Error;

/// Error type for ledger construction and internal operation faults.
///
/// Ledger operations never return this to their caller; faults are handed
/// to the ledger's error hook instead. Only construction and configuration
/// validation surface it as a `Result`.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Hook error: {0}")]
    Hook(String),

    #[error("Panic: {0}")]
    Panic(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

impl LedgerError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn hook(msg: impl Into<String>) -> Self {
        Self::Hook(msg.into())
    }

    pub fn panic(msg: impl Into<String>) -> Self {
        Self::Panic(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LedgerError::invalid_config("max_size must be greater than zero");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: max_size must be greater than zero"
        );
        assert_eq!(LedgerError::hook("boom").to_string(), "Hook error: boom");
    }

    #[test]
    fn test_serialization_error_conversion() {
        let parse_err = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
        let err: LedgerError = parse_err.into();
        assert!(matches!(err, LedgerError::Serialization(_)));
        assert!(err.to_string().starts_with("Serialization error: "));
    }
}
