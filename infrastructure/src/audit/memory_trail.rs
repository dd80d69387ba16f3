//! In-memory implementation of the audit trail.
//!
//! Records live behind one exclusive lock and are never reordered or
//! renumbered. Only the outcome fields and obtained approvals mutate
//! after creation.

use std::collections::{BTreeMap, HashMap};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use consilium_application::ports::audit_trail::{AuditObserver, AuditTrail};
use consilium_domain::{
    AuditReport, DataAccess, DecisionDraft, DecisionRecord, DirectiveId, RecordId,
};
use tracing::warn;

#[derive(Default)]
struct Inner {
    records: BTreeMap<u64, DecisionRecord>,
    by_directive: HashMap<String, Vec<RecordId>>,
    by_worker: HashMap<String, Vec<RecordId>>,
    accesses: Vec<DataAccess>,
    counter: u64,
}

/// Mutex-guarded in-memory audit trail.
#[derive(Default)]
pub struct MemoryAuditTrail {
    inner: Mutex<Inner>,
    observers: Mutex<Vec<Arc<dyn AuditObserver>>>,
}

impl MemoryAuditTrail {
    pub fn new() -> Self {
        Self::default()
    }

    fn notify(&self, record: &DecisionRecord) {
        let observers = self.observers.lock().expect("observer lock poisoned");
        for observer in observers.iter() {
            if catch_unwind(AssertUnwindSafe(|| observer.on_record(record))).is_err() {
                warn!(record = %record.id, "Audit observer panicked; ignoring");
            }
        }
    }
}

impl AuditTrail for MemoryAuditTrail {
    fn log_decision(&self, draft: DecisionDraft) -> DecisionRecord {
        let record = {
            let mut inner = self.inner.lock().expect("audit lock poisoned");
            inner.counter += 1;
            let record = DecisionRecord::from_draft(RecordId(inner.counter), Utc::now(), draft);
            inner
                .by_directive
                .entry(record.directive_id.to_string())
                .or_default()
                .push(record.id);
            inner
                .by_worker
                .entry(record.worker.clone())
                .or_default()
                .push(record.id);
            inner.records.insert(record.id.0, record.clone());
            record
        };
        self.notify(&record);
        record
    }

    fn log_data_access(&self, access: DataAccess) {
        let mut inner = self.inner.lock().expect("audit lock poisoned");
        inner.accesses.push(access);
    }

    fn data_accesses(&self) -> Vec<DataAccess> {
        let inner = self.inner.lock().expect("audit lock poisoned");
        inner.accesses.clone()
    }

    fn update_outcome(&self, id: RecordId, outcome: &str, notes: Option<&str>) -> bool {
        let mut inner = self.inner.lock().expect("audit lock poisoned");
        match inner.records.get_mut(&id.0) {
            Some(record) => {
                record.outcome = Some(outcome.to_string());
                record.outcome_timestamp = Some(Utc::now());
                record.outcome_notes = notes.map(str::to_string);
                true
            }
            None => false,
        }
    }

    fn add_approval(&self, id: RecordId, approver: &str) -> bool {
        let mut inner = self.inner.lock().expect("audit lock poisoned");
        match inner.records.get_mut(&id.0) {
            Some(record) => {
                if !record.obtained_approvals.iter().any(|a| a == approver) {
                    record.obtained_approvals.push(approver.to_string());
                }
                true
            }
            None => false,
        }
    }

    fn record(&self, id: RecordId) -> Option<DecisionRecord> {
        let inner = self.inner.lock().expect("audit lock poisoned");
        inner.records.get(&id.0).cloned()
    }

    fn records_by_directive(&self, directive: &DirectiveId) -> Vec<DecisionRecord> {
        let inner = self.inner.lock().expect("audit lock poisoned");
        inner
            .by_directive
            .get(&directive.to_string())
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| inner.records.get(&id.0).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn records_by_worker(&self, worker: &str) -> Vec<DecisionRecord> {
        let inner = self.inner.lock().expect("audit lock poisoned");
        inner
            .by_worker
            .get(worker)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| inner.records.get(&id.0).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn pending_approvals(&self) -> Vec<DecisionRecord> {
        let inner = self.inner.lock().expect("audit lock poisoned");
        inner
            .records
            .values()
            .filter(|r| r.is_pending_approval())
            .cloned()
            .collect()
    }

    fn escalated(&self) -> Vec<DecisionRecord> {
        let inner = self.inner.lock().expect("audit lock poisoned");
        inner
            .records
            .values()
            .filter(|r| r.escalated_to.is_some())
            .cloned()
            .collect()
    }

    fn verify_integrity(&self, id: RecordId) -> bool {
        let inner = self.inner.lock().expect("audit lock poisoned");
        inner
            .records
            .get(&id.0)
            .is_some_and(DecisionRecord::verify_integrity)
    }

    fn report(
        &self,
        since: Option<DateTime<Utc>>,
        until: Option<DateTime<Utc>>,
        worker: Option<&str>,
    ) -> AuditReport {
        let inner = self.inner.lock().expect("audit lock poisoned");
        AuditReport::from_records(inner.records.values().filter(|r| {
            since.is_none_or(|s| r.timestamp >= s)
                && until.is_none_or(|u| r.timestamp <= u)
                && worker.is_none_or(|w| r.worker == w)
        }))
    }

    fn directive_report(&self, directive: &DirectiveId) -> AuditReport {
        AuditReport::from_records(&self.records_by_directive(directive))
    }

    fn register_observer(&self, observer: Arc<dyn AuditObserver>) {
        self.observers
            .lock()
            .expect("observer lock poisoned")
            .push(observer);
    }
}
