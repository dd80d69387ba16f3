//! Audit trail port.
//!
//! Records are immutable after creation except for outcome tracking and
//! the obtained-approvals list; identity, decision text, rationale and
//! hash never change. That immutability is the audit guarantee.

use chrono::{DateTime, Utc};
use consilium_domain::{
    AuditReport, DataAccess, DecisionDraft, DecisionRecord, DirectiveId, RecordId,
};
use std::sync::Arc;

/// Callback fired after each logged decision, best-effort: a panicking
/// observer is caught and logged, never propagated.
pub trait AuditObserver: Send + Sync {
    fn on_record(&self, record: &DecisionRecord);
}

/// Append-only, hash-chained log of decisions.
pub trait AuditTrail: Send + Sync {
    /// Log a decision: derives the confidence tier, computes the
    /// integrity hash, indexes by directive and worker.
    fn log_decision(&self, draft: DecisionDraft) -> DecisionRecord;

    /// Record a read against an external data source.
    fn log_data_access(&self, access: DataAccess);

    fn data_accesses(&self) -> Vec<DataAccess>;

    /// Set the outcome fields, the only mutation a record supports.
    /// Returns false for an unknown id.
    fn update_outcome(&self, id: RecordId, outcome: &str, notes: Option<&str>) -> bool;

    /// Append an approver if not already present (idempotent).
    fn add_approval(&self, id: RecordId, approver: &str) -> bool;

    fn record(&self, id: RecordId) -> Option<DecisionRecord>;

    fn records_by_directive(&self, directive: &DirectiveId) -> Vec<DecisionRecord>;

    fn records_by_worker(&self, worker: &str) -> Vec<DecisionRecord>;

    /// Records whose required approvals are not yet fully obtained.
    fn pending_approvals(&self) -> Vec<DecisionRecord>;

    fn escalated(&self) -> Vec<DecisionRecord>;

    /// Recompute-and-compare the integrity hash. False for unknown ids.
    fn verify_integrity(&self, id: RecordId) -> bool;

    fn report(
        &self,
        since: Option<DateTime<Utc>>,
        until: Option<DateTime<Utc>>,
        worker: Option<&str>,
    ) -> AuditReport;

    /// Report scoped to one directive's records.
    fn directive_report(&self, directive: &DirectiveId) -> AuditReport;

    fn register_observer(&self, observer: Arc<dyn AuditObserver>);
}
