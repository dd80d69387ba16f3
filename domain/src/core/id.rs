//! Identifier newtypes.
//!
//! Entry, record and request ids are assigned by their owning component
//! from a monotonic counter; the numeric ordering is the storage order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a state store entry. Monotonically increasing per store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MEM-{:06}", self.0)
    }
}

/// Identifier of an audit trail decision record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AUD-{:06}", self.0)
    }
}

/// Identifier of a governance approval request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "REQ-{:04}", self.0)
    }
}

/// Identifier of a directive run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectiveId(String);

impl DirectiveId {
    pub fn from_sequence(seq: u64) -> Self {
        Self(format!("DIR-{seq:06}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DirectiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DirectiveId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Identifier of a worker task within a directive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(String);

impl TaskId {
    /// Task ids are scoped by worker name, e.g. `SALES-0003`.
    pub fn new(worker: &str, seq: u64) -> Self {
        Self(format!("{}-{:04}", worker.to_uppercase(), seq))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_formats() {
        assert_eq!(EntryId(42).to_string(), "MEM-000042");
        assert_eq!(RecordId(1).to_string(), "AUD-000001");
        assert_eq!(RequestId(7).to_string(), "REQ-0007");
        assert_eq!(DirectiveId::from_sequence(3).to_string(), "DIR-000003");
        assert_eq!(TaskId::new("sales", 12).to_string(), "SALES-0012");
    }

    #[test]
    fn test_entry_id_ordering_matches_counter() {
        assert!(EntryId(1) < EntryId(2));
    }
}
