//! The six functional workers.
//!
//! Each worker is an external collaborator behind the [`Worker`] port:
//! an exhaustive match over task kinds producing a structured output,
//! with every cited figure traced through a logged data access.

pub mod finance;
pub mod hiring;
pub mod marketing;
pub mod operations;
pub mod sales;
pub mod support;

pub use finance::FinanceWorker;
pub use hiring::HiringWorker;
pub use marketing::MarketingWorker;
pub use operations::OperationsWorker;
pub use sales::SalesWorker;
pub use support::SupportWorker;

use consilium_application::ports::worker::{Worker, WorkerContext};
use consilium_domain::{DataAccess, TaskId, WorkerOutput, WorkerTask};
use std::sync::Arc;

/// The reference worker roster.
pub fn default_workers() -> Vec<Arc<dyn Worker>> {
    vec![
        Arc::new(SalesWorker),
        Arc::new(MarketingWorker),
        Arc::new(FinanceWorker),
        Arc::new(OperationsWorker),
        Arc::new(SupportWorker),
        Arc::new(HiringWorker),
    ]
}

/// Log a data access and return its citation string.
pub(crate) fn record_access(
    ctx: &WorkerContext,
    worker: &str,
    source: &str,
    query: &str,
    records: u64,
    purpose: &str,
) -> String {
    let access = DataAccess::new(worker, source, query, records, purpose);
    let citation = access.citation();
    ctx.audit.log_data_access(access);
    citation
}

/// Fallback for task kinds a worker has no dedicated handler for.
pub(crate) fn general_output(worker: &str, task_id: TaskId, citations: Vec<String>) -> WorkerOutput {
    WorkerOutput::new(worker, task_id, 0.5)
        .with_citations(citations)
        .with_what_would_change_mind(vec![
            "More specific task requirements provided".to_string()
        ])
}

/// Convenience for the common draft fields a worker logs per task.
pub(crate) fn base_draft(
    worker: &str,
    task: &WorkerTask,
    decision: String,
    rationale: String,
    confidence: f64,
) -> consilium_domain::DecisionDraft {
    consilium_domain::DecisionDraft::new(
        worker,
        consilium_domain::DecisionKind::Recommendation,
        task.directive_id.clone(),
        decision,
        rationale,
        confidence,
    )
    .with_version(env!("CARGO_PKG_VERSION"))
}
