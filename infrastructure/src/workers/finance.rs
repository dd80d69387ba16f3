//! Finance worker: budget allocation for retention initiatives.

use async_trait::async_trait;
use consilium_application::ports::worker::{Worker, WorkerContext, WorkerError};
use consilium_domain::{
    assess_confidence, Citation, CitationSource, Deliverable, Recommendation, StanceDirection,
    StrategicStance, TaskKind, WorkerOutput, WorkerTask,
};

use super::{base_draft, general_output, record_access};

const NAME: &str = "finance";

pub struct FinanceWorker;

#[async_trait]
impl Worker for FinanceWorker {
    fn name(&self) -> &str {
        NAME
    }

    async fn process(
        &self,
        task: WorkerTask,
        ctx: WorkerContext,
    ) -> Result<WorkerOutput, WorkerError> {
        let budgets = ctx.data.budget_status();
        let citations = vec![record_access(
            &ctx,
            NAME,
            "finance_erp",
            "department_budget_status",
            budgets.len() as u64,
            "budget allocation planning",
        )];

        match task.kind {
            TaskKind::BudgetPlanning => Ok(self.budget_planning(&task, &ctx, citations)),
            TaskKind::RetentionProgram
            | TaskKind::RetentionCampaign
            | TaskKind::ProcessOptimization
            | TaskKind::ChurnAnalysis
            | TaskKind::HiringPlan
            | TaskKind::General => Ok(general_output(NAME, task.id, citations)),
        }
    }
}

impl FinanceWorker {
    fn budget_planning(
        &self,
        task: &WorkerTask,
        ctx: &WorkerContext,
        citations: Vec<String>,
    ) -> WorkerOutput {
        let budgets = ctx.data.budget_status();
        let total_remaining: f64 = budgets.iter().map(|b| b.remaining()).sum();
        let confidence = assess_confidence(0.90, 1, true);

        let recommendations = vec![
            Recommendation::new(
                "Reallocate Acquisition Spend to Retention",
                "Fund retention initiatives from existing budgets rather than net-new spend",
                format!("${total_remaining:.0} of unspent budget available for reallocation"),
            )
            .with_action_items(vec![
                "Ring-fence retention funding per department".to_string(),
                "Stage releases against verified retention lift".to_string(),
            ]),
            Recommendation::new(
                "Unit Economics Guardrails",
                "Tie every retention initiative to an LTV-based payback ceiling",
                "Investment capped at 12-month payback",
            ),
        ];

        ctx.audit.log_decision(
            base_draft(
                NAME,
                task,
                "Recommend funding retention from reallocation, zero net-new budget".to_string(),
                format!("${total_remaining:.0} remains unspent across department budgets"),
                confidence,
            )
            .with_citations(vec![Citation::new(
                CitationSource::Database,
                "finance_erp.department_budget_status",
                "Remaining budget by department",
                serde_json::json!({"total_remaining": total_remaining}),
            )])
            .with_data_sources(vec!["finance_erp".to_string()])
            .with_change_conditions("Retention lift fails to cover reallocated spend"),
        );

        // Reallocation only; no net-new budget requested.
        WorkerOutput::new(NAME, task.id.clone(), confidence)
            .with_recommendations(recommendations)
            .with_citations(citations)
            .with_budget_impact(0.0)
            .with_headcount_impact(0)
            .with_timeline_days(30)
            .with_what_would_change_mind(vec![
                "Retention payback exceeds 12 months".to_string(),
            ])
            .with_deliverables(vec![Deliverable::new("Retention budget allocation").on_day(14)])
            .with_stances(vec![StrategicStance::new(
                "customer_acquisition_cost",
                StanceDirection::Decrease,
                "Reduce blended CAC to improve unit economics",
            )])
            .with_affected_departments(vec!["finance".to_string()])
    }
}
