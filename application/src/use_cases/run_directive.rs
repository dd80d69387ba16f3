//! Run Directive use case
//!
//! Drives one directive through the full state machine:
//! `Received -> IntentParsed -> TasksDispatched -> OutputsCollected ->
//! ConflictsResolved -> GovernanceChecked -> Finalized`.
//!
//! Worker dispatch is the only parallel region; every other step runs
//! sequentially over the collected outputs. A failing worker degrades
//! its own output and never blocks aggregation for the rest.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use consilium_domain::{
    build_strategic_options, decompose, dedup_risks, retention_kpis, roll_up_budget,
    roll_up_headcount, Alert, BudgetSnapshot, Citation, CitationSource, Conflict, ConflictEngine,
    ConflictPolicy, ConstraintCategory, DecisionDraft, DecisionKind, DecisionPackage,
    DepartmentPlan, DirectiveId, DirectiveRun, Escalation, EntryPayload, NewEntry, Objective,
    ParsedIntent, Priority, WorkerOutput, WorkerTask,
};
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::ports::audit_trail::AuditTrail;
use crate::ports::data_source::EnterpriseData;
use crate::ports::governance::Governance;
use crate::ports::intent_parser::{IntentParser, ParseError};
use crate::ports::state_store::StateStore;
use crate::ports::worker::{Worker, WorkerContext};

const ORCHESTRATOR: &str = "orchestrator";

/// Errors that abort a directive before any package is produced.
#[derive(Error, Debug)]
pub enum RunDirectiveError {
    #[error("No workers configured")]
    NoWorkersConfigured,

    #[error("Intent parsing failed: {0}")]
    IntentParse(#[from] ParseError),
}

/// Use case for processing one directive end-to-end.
pub struct RunDirectiveUseCase {
    store: Arc<dyn StateStore>,
    audit: Arc<dyn AuditTrail>,
    governance: Arc<dyn Governance>,
    parser: Arc<dyn IntentParser>,
    data: Arc<dyn EnterpriseData>,
    workers: HashMap<String, Arc<dyn Worker>>,
    engine: ConflictEngine,
    sequence: AtomicU64,
}

impl RunDirectiveUseCase {
    pub fn new(
        store: Arc<dyn StateStore>,
        audit: Arc<dyn AuditTrail>,
        governance: Arc<dyn Governance>,
        parser: Arc<dyn IntentParser>,
        data: Arc<dyn EnterpriseData>,
        workers: Vec<Arc<dyn Worker>>,
    ) -> Self {
        let workers = workers
            .into_iter()
            .map(|w| (w.name().to_string(), w))
            .collect();
        Self {
            store,
            audit,
            governance,
            parser,
            data,
            workers,
            engine: ConflictEngine::default(),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn with_conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.engine = ConflictEngine::new(policy);
        self
    }

    /// Process a directive and return its decision package.
    pub async fn execute(&self, directive: &str) -> Result<DecisionPackage, RunDirectiveError> {
        if self.workers.is_empty() {
            return Err(RunDirectiveError::NoWorkersConfigured);
        }

        let id = DirectiveId::from_sequence(self.sequence.fetch_add(1, Ordering::SeqCst) + 1);
        let mut run = DirectiveRun::new(id.clone(), directive);
        info!(directive = %id, "Directive received");

        self.audit.log_decision(
            DecisionDraft::new(
                ORCHESTRATOR,
                DecisionKind::Strategy,
                id.clone(),
                format!("Directive received: {}", truncate(directive, 100)),
                "Queued for intent parsing and decomposition",
                1.0,
            )
            .with_version(env!("CARGO_PKG_VERSION")),
        );

        // Received -> IntentParsed. Never blocks on worker availability.
        let intent = self.parser.parse(directive)?;
        run.advance().expect("phase order is fixed");
        debug!(objective = ?intent.primary_objective, "Intent parsed");

        // IntentParsed -> TasksDispatched
        let tasks = decompose(&intent, &id);
        run.advance().expect("phase order is fixed");
        info!(tasks = tasks.len(), "Tasks decomposed");

        // TasksDispatched -> OutputsCollected: the parallel region.
        let outputs = self.dispatch(&tasks).await;
        run.advance().expect("phase order is fixed");
        self.persist_outputs(&tasks, &outputs);

        // OutputsCollected -> ConflictsResolved
        let snapshot = BudgetSnapshot::from_constraints(
            &self.store.constraints_by_category(ConstraintCategory::Budget),
        );
        let detected = self.engine.detect(&outputs, &snapshot);
        let alignment = self.engine.alignment_report(&detected);
        let (unresolved, resolution_summary) = self.engine.resolve(detected);
        run.advance().expect("phase order is fixed");
        info!(
            unresolved = unresolved.len(),
            resolutions = resolution_summary.entries.len(),
            status = %alignment.status,
            "Conflicts processed"
        );
        self.raise_conflict_alerts(&id, &unresolved);

        // ConflictsResolved -> GovernanceChecked
        let escalations = self.check_governance(&id, &outputs);
        run.advance().expect("phase order is fixed");

        // GovernanceChecked -> Finalized
        let package = self.synthesize(&id, &intent, outputs, alignment, unresolved, escalations);
        self.store.store(
            NewEntry::new(ORCHESTRATOR, EntryPayload::Decision(Box::new(package.clone())))
                .with_priority(Priority::High)
                .with_tags(vec!["decision-package".to_string(), id.to_string()]),
        );
        run.advance().expect("phase order is fixed");
        info!(directive = %id, "Directive finalized");

        Ok(package)
    }

    /// Invoke every task's worker concurrently and collect outputs in
    /// task order. A missing, failing or panicking worker yields a
    /// degraded output.
    async fn dispatch(&self, tasks: &[WorkerTask]) -> Vec<WorkerOutput> {
        let ctx = WorkerContext {
            store: Arc::clone(&self.store),
            data: Arc::clone(&self.data),
            audit: Arc::clone(&self.audit),
        };

        let mut join_set = JoinSet::new();
        let mut degraded: Vec<(usize, WorkerOutput)> = Vec::new();

        for (index, task) in tasks.iter().cloned().enumerate() {
            match self.workers.get(&task.worker) {
                Some(worker) => {
                    let worker = Arc::clone(worker);
                    let ctx = ctx.clone();
                    join_set.spawn(async move {
                        let result = worker.process(task.clone(), ctx).await;
                        (index, task, result)
                    });
                }
                None => {
                    warn!(worker = %task.worker, "No worker registered for task");
                    degraded.push((
                        index,
                        WorkerOutput::degraded(&task.worker, task.id.clone(), "not registered"),
                    ));
                }
            }
        }

        let mut collected = degraded;
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, task, Ok(output))) => {
                    debug!(worker = %output.worker, task = %task.id, "Worker completed");
                    collected.push((index, output));
                }
                Ok((index, task, Err(e))) => {
                    warn!(worker = %task.worker, error = %e, "Worker failed, degrading output");
                    collected.push((
                        index,
                        WorkerOutput::degraded(&task.worker, task.id, &e.to_string()),
                    ));
                }
                Err(e) => {
                    // A panicked worker task: the join error carries no
                    // task back, so it is logged and skipped here; the
                    // directive still aggregates the rest.
                    warn!(error = %e, "Worker task join error");
                }
            }
        }

        collected.sort_by_key(|(index, _)| *index);
        collected.into_iter().map(|(_, output)| output).collect()
    }

    fn persist_outputs(&self, tasks: &[WorkerTask], outputs: &[WorkerOutput]) {
        let kinds: HashMap<&str, String> = tasks
            .iter()
            .map(|t| (t.id.as_str(), t.kind.to_string()))
            .collect();
        for output in outputs {
            let kind_tag = kinds
                .get(output.task_id.as_str())
                .cloned()
                .unwrap_or_else(|| "general".to_string());
            self.store.store(
                NewEntry::new(
                    output.worker.clone(),
                    EntryPayload::WorkerOutput(Box::new(output.clone())),
                )
                .with_tags(vec![output.worker.clone(), kind_tag]),
            );
        }
    }

    fn raise_conflict_alerts(&self, id: &DirectiveId, unresolved: &[Conflict]) {
        for conflict in unresolved {
            let priority = if conflict.is_critical() {
                Priority::Critical
            } else {
                Priority::High
            };
            self.store.store(
                NewEntry::new(
                    ORCHESTRATOR,
                    EntryPayload::Alert(Alert::UnresolvedConflict {
                        conflict_id: conflict.id.clone(),
                        kind: conflict.kind.to_string(),
                        severity: conflict.severity.to_string(),
                    }),
                )
                .with_priority(priority)
                .with_tags(vec!["alert".to_string(), id.to_string()]),
            );
        }
    }

    fn check_governance(&self, id: &DirectiveId, outputs: &[WorkerOutput]) -> Vec<Escalation> {
        let mut escalations = Vec::new();
        for output in outputs {
            let Some(trigger) = self.governance.should_escalate(output) else {
                continue;
            };
            let reason = trigger.to_string();
            info!(worker = %output.worker, %reason, "Output escalated");

            self.audit.log_decision(
                DecisionDraft::new(
                    ORCHESTRATOR,
                    DecisionKind::Escalation,
                    id.clone(),
                    format!("Escalate {} output: {reason}", output.worker),
                    "Escalation rule matched during governance check",
                    output.confidence,
                )
                .with_citations(vec![Citation::new(
                    CitationSource::Calculation,
                    "governance.should_escalate",
                    "Escalation trigger with observed value and threshold",
                    serde_json::to_value(&trigger).unwrap_or_default(),
                )])
                .escalated_to("chief-executive"),
            );

            escalations.push(Escalation {
                worker: output.worker.clone(),
                reason,
                budget_impact: output.budget_impact,
                headcount_impact: output.headcount_impact,
            });
        }
        escalations
    }

    #[allow(clippy::too_many_arguments)]
    fn synthesize(
        &self,
        id: &DirectiveId,
        intent: &ParsedIntent,
        outputs: Vec<WorkerOutput>,
        alignment: consilium_domain::AlignmentReport,
        unresolved: Vec<Conflict>,
        escalations: Vec<Escalation>,
    ) -> DecisionPackage {
        let budget_impact = roll_up_budget(&outputs);
        let headcount_impact = roll_up_headcount(&outputs);
        let strategic_options = build_strategic_options(
            intent.target_value,
            budget_impact.total_investment,
            headcount_impact.total_new_hires,
        );
        let risks = dedup_risks(&outputs);

        let mut dependencies = Vec::new();
        for output in &outputs {
            for dependency in &output.dependencies {
                if !dependencies.contains(dependency) {
                    dependencies.push(dependency.clone());
                }
            }
        }

        let kpis = match intent.primary_objective {
            Objective::ImproveRetention => self
                .store
                .active_goals()
                .first()
                .map(|goal| {
                    retention_kpis(
                        goal,
                        intent.target_value,
                        Some(self.data.customer_summary().avg_cac),
                    )
                })
                .unwrap_or_default(),
            Objective::General => Vec::new(),
        };

        let strategic_goal = match intent.primary_objective {
            Objective::ImproveRetention => format!(
                "Improve quarterly retention by {:.0}%",
                intent.target_value * 100.0
            ),
            Objective::General => intent.original_text.clone(),
        };

        let summary = format!(
            "To achieve the goal ({}), the coordinated plan requires ${:.0} investment \
             and {} new hires across {} functions. Alignment status: {}.",
            intent.constraint,
            budget_impact.total_investment,
            headcount_impact.total_new_hires,
            outputs.len(),
            alignment.status,
        );

        self.audit.log_decision(
            DecisionDraft::new(
                ORCHESTRATOR,
                DecisionKind::Allocation,
                id.clone(),
                format!(
                    "Decision package assembled: ${:.0} total investment, {} new hires",
                    budget_impact.total_investment, headcount_impact.total_new_hires
                ),
                "Per-worker impacts rolled up with missing values as zero",
                0.9,
            )
            .with_citations(vec![Citation::new(
                CitationSource::Calculation,
                "package.roll_up",
                "Budget and headcount roll-up over worker outputs",
                serde_json::json!({
                    "total_investment": budget_impact.total_investment,
                    "total_new_hires": headcount_impact.total_new_hires,
                }),
            )]),
        );

        let department_plans = outputs
            .iter()
            .map(|o| (o.worker.clone(), DepartmentPlan::from_output(o)))
            .collect();

        DecisionPackage {
            directive_id: id.clone(),
            strategic_goal,
            constraint: intent.constraint.clone(),
            summary,
            strategic_options,
            department_plans,
            budget_impact,
            headcount_impact,
            risks,
            assumptions: baseline_assumptions(),
            dependencies,
            kpis,
            alignment_status: alignment.status,
            unresolved_conflicts: unresolved,
            escalations,
            audit_summary: self.audit.directive_report(id),
        }
    }
}

/// Planning assumptions attached to every package; revisited whenever an
/// outcome contradicts one of them.
fn baseline_assumptions() -> Vec<String> {
    vec![
        "Churn risk model accuracy of 75%+".to_string(),
        "Market conditions remain stable".to_string(),
        "Competitive response limited to matching offers".to_string(),
        "Hiring timeline achievable in current talent market".to_string(),
    ]
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("abcdef", 3), "abc");
        assert_eq!(truncate("ab", 3), "ab");
        assert_eq!(truncate("日本語テキスト", 3), "日本語");
    }
}
