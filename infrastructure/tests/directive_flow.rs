//! End-to-end directive flow over the real components.

use std::sync::Arc;

use async_trait::async_trait;
use consilium_application::ports::worker::{Worker, WorkerContext, WorkerError};
use consilium_application::{seed_context, RunDirectiveUseCase, SeedContext, StateStore};
use consilium_domain::{
    AlignmentStatus, ConflictKind, DecisionPackage, EntryFilter, EntryKind, WorkerOutput,
    WorkerTask,
};
use consilium_infrastructure::{
    default_workers, GovernanceEngine, MemoryAuditTrail, MemoryStateStore, MockEnterpriseData,
    PatternIntentParser,
};

const DIRECTIVE: &str = "Improve quarterly retention by 8% without increasing CAC";

fn build_use_case(workers: Vec<Arc<dyn Worker>>) -> (RunDirectiveUseCase, Arc<MemoryStateStore>) {
    let store = Arc::new(MemoryStateStore::new());
    seed_context(store.as_ref(), &SeedContext::reference());

    let use_case = RunDirectiveUseCase::new(
        store.clone(),
        Arc::new(MemoryAuditTrail::new()),
        Arc::new(GovernanceEngine::default()),
        Arc::new(PatternIntentParser::default()),
        Arc::new(MockEnterpriseData::new()),
        workers,
    );
    (use_case, store)
}

async fn run_reference_directive() -> (DecisionPackage, Arc<MemoryStateStore>) {
    let (use_case, store) = build_use_case(default_workers());
    let package = use_case.execute(DIRECTIVE).await.unwrap();
    (package, store)
}

#[tokio::test]
async fn test_reference_rollup_and_options() {
    let (package, _) = run_reference_directive().await;

    // Reference impacts: 450k + 850k + 0 + 350k + 200k + 1,875k.
    assert_eq!(package.budget_impact.total_investment, 3_725_000.0);
    assert_eq!(package.headcount_impact.total_new_hires, 37);

    assert_eq!(package.strategic_options.len(), 3);
    let comprehensive = &package.strategic_options[0];
    assert_eq!(comprehensive.name, "Comprehensive Program");
    assert_eq!(comprehensive.investment, 3_725_000.0);
    let minimal = &package.strategic_options[2];
    assert_eq!(minimal.name, "Minimum Viable Program");
    assert_eq!(minimal.investment, 1_117_500.0);
}

#[tokio::test]
async fn test_reference_alignment_and_conflicts() {
    let (package, _) = run_reference_directive().await;

    // The hiring request overruns the hr budget headroom; no conflict is
    // critical, so the run lands on minor conflicts.
    assert_eq!(package.alignment_status, AlignmentStatus::MinorConflicts);
    assert_eq!(package.unresolved_conflicts.len(), 1);
    let conflict = &package.unresolved_conflicts[0];
    assert_eq!(conflict.kind, ConflictKind::BudgetOverallocation);
    assert!(conflict.workers_involved.contains(&"hiring".to_string()));
}

#[tokio::test]
async fn test_reference_escalations() {
    let (package, _) = run_reference_directive().await;

    let escalated: Vec<&str> = package.escalations.iter().map(|e| e.worker.as_str()).collect();
    assert_eq!(escalated, vec!["marketing", "hiring"]);
    assert!(package.escalations[0].reason.contains("exceeds $500000"));
}

#[tokio::test]
async fn test_package_persisted_and_audited() {
    let (package, store) = run_reference_directive().await;

    assert_eq!(package.department_plans.len(), 6);
    assert_eq!(package.kpis.len(), 4);
    assert!(!package.risks.is_empty());
    assert!(package
        .dependencies
        .contains(&"Customer success platform implementation".to_string()));

    // Audit summary scoped to this directive: orchestrator strategy +
    // allocation records, six worker recommendations, two escalations.
    assert_eq!(package.audit_summary.total_decisions, 10);
    assert_eq!(package.audit_summary.escalated, 2);
    assert!(package
        .audit_summary
        .workers
        .contains(&"orchestrator".to_string()));

    // Outputs and the finished package land in the store.
    let outputs = store.query(&EntryFilter::new().kind(EntryKind::WorkerOutput));
    assert_eq!(outputs.len(), 6);
    let decisions = store.query(&EntryFilter::new().kind(EntryKind::Decision));
    assert_eq!(decisions.len(), 1);
    let alerts = store.query(&EntryFilter::new().kind(EntryKind::Alert));
    assert_eq!(alerts.len(), 1);
}

struct FailingSales;

#[async_trait]
impl Worker for FailingSales {
    fn name(&self) -> &str {
        "sales"
    }

    async fn process(
        &self,
        _task: WorkerTask,
        _ctx: WorkerContext,
    ) -> Result<WorkerOutput, WorkerError> {
        Err(WorkerError::Unavailable("connection refused".to_string()))
    }
}

#[tokio::test]
async fn test_failed_worker_degrades_without_blocking() {
    let mut workers = default_workers();
    workers.retain(|w| w.name() != "sales");
    workers.push(Arc::new(FailingSales));

    let (use_case, _) = build_use_case(workers);
    let package = use_case.execute(DIRECTIVE).await.unwrap();

    // Aggregation continues; the sales slice is a degraded output.
    let sales = &package.department_plans["sales"];
    assert!(sales.recommendations.is_empty());
    assert_eq!(sales.confidence, 0.30);
    assert_eq!(package.budget_impact.total_investment, 3_275_000.0);

    // Degraded confidence trips the low-confidence escalation rule.
    assert!(package
        .escalations
        .iter()
        .any(|e| e.worker == "sales" && e.reason.contains("60%")));

    // The synthetic failure note survives into the deduplicated risks.
    assert!(package
        .risks
        .iter()
        .any(|r| r.contains("connection refused")));
}

#[tokio::test]
async fn test_repeated_directives_get_distinct_ids() {
    let (use_case, _) = build_use_case(default_workers());
    let first = use_case.execute(DIRECTIVE).await.unwrap();
    let second = use_case.execute(DIRECTIVE).await.unwrap();

    assert_ne!(first.directive_id, second.directive_id);
    // Same inputs, same reconciliation outcome.
    assert_eq!(
        first.budget_impact.total_investment,
        second.budget_impact.total_investment
    );
    assert_eq!(first.alignment_status, second.alignment_status);
}
