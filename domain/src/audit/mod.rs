//! Audit trail domain: tamper-evident decision records with citations.

pub mod access;
pub mod record;
pub mod report;

pub use access::DataAccess;
pub use record::{
    Citation, CitationSource, ConfidenceTier, DecisionDraft, DecisionKind, DecisionRecord,
};
pub use report::AuditReport;
