//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unknown worker: {0}")]
    UnknownWorker(String),

    #[error("Unknown entry: {0}")]
    UnknownEntry(String),

    #[error("Unknown record: {0}")]
    UnknownRecord(String),

    #[error("Unknown approval request: {0}")]
    UnknownRequest(String),

    #[error("Approval request {0} already closed")]
    RequestAlreadyClosed(String),

    #[error("Invalid directive: {0}")]
    InvalidDirective(String),

    #[error("Invalid phase transition: {from} -> {to}")]
    InvalidPhaseTransition { from: String, to: String },

    #[error("Hard constraint {0} violated")]
    ConstraintViolation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = DomainError::RequestAlreadyClosed("REQ-0001".to_string());
        assert_eq!(error.to_string(), "Approval request REQ-0001 already closed");
    }
}
