//! Operations worker: process optimization for customer experience.

use async_trait::async_trait;
use consilium_application::ports::worker::{Worker, WorkerContext, WorkerError};
use consilium_domain::{
    assess_confidence, BudgetRequest, Citation, CitationSource, Deliverable, Priority,
    Recommendation, TaskKind, WorkerOutput, WorkerTask,
};

use super::{base_draft, general_output, record_access};

const NAME: &str = "operations";

pub struct OperationsWorker;

#[async_trait]
impl Worker for OperationsWorker {
    fn name(&self) -> &str {
        NAME
    }

    async fn process(
        &self,
        task: WorkerTask,
        ctx: WorkerContext,
    ) -> Result<WorkerOutput, WorkerError> {
        let tickets = ctx.data.ticket_summary();
        let citations = vec![record_access(
            &ctx,
            NAME,
            "ops_warehouse",
            "process_cycle_times",
            tickets.total_tickets,
            "customer experience bottleneck analysis",
        )];

        match task.kind {
            TaskKind::ProcessOptimization => Ok(self.process_optimization(&task, &ctx, citations)),
            TaskKind::RetentionProgram
            | TaskKind::RetentionCampaign
            | TaskKind::BudgetPlanning
            | TaskKind::ChurnAnalysis
            | TaskKind::HiringPlan
            | TaskKind::General => Ok(general_output(NAME, task.id, citations)),
        }
    }
}

impl OperationsWorker {
    fn process_optimization(
        &self,
        task: &WorkerTask,
        ctx: &WorkerContext,
        citations: Vec<String>,
    ) -> WorkerOutput {
        let tickets = ctx.data.ticket_summary();
        let confidence = assess_confidence(0.85, 1, true);

        let recommendations = vec![
            Recommendation::new(
                "Claims Processing Automation",
                format!(
                    "Automate the claim stages driving {} complaints and the {:.1}h average resolution time",
                    tickets.claims_complaints, tickets.avg_resolution_hours
                ),
                "30% cycle-time reduction on the top complaint driver",
            )
            .with_action_items(vec![
                "Map claim stages against complaint categories".to_string(),
                "Automate document intake and validation".to_string(),
                "Publish cycle-time dashboards per stage".to_string(),
            ]),
            Recommendation::new(
                "Customer Success Platform Build-Out",
                "Stand up the shared platform the retention program depends on",
                "Unblocks proactive outreach and health scoring",
            ),
        ];

        ctx.audit.log_decision(
            base_draft(
                NAME,
                task,
                "Recommend process automation plus success platform build-out".to_string(),
                format!(
                    "{} claims complaints and {:.1}h resolution times are the largest experience drag",
                    tickets.claims_complaints, tickets.avg_resolution_hours
                ),
                confidence,
            )
            .with_citations(vec![Citation::new(
                CitationSource::Database,
                "ops_warehouse.process_cycle_times",
                "Complaint counts and resolution times by process stage",
                serde_json::json!({
                    "claims_complaints": tickets.claims_complaints,
                    "avg_resolution_hours": tickets.avg_resolution_hours,
                }),
            )])
            .with_data_sources(vec!["ops_warehouse".to_string()])
            .with_change_conditions("Automation pilot misses the 30% cycle-time target"),
        );

        WorkerOutput::new(NAME, task.id.clone(), confidence)
            .with_recommendations(recommendations)
            .with_citations(citations)
            .with_budget_impact(350_000.0)
            .with_headcount_impact(0)
            .with_timeline_days(120)
            .with_risks(vec![
                "Automation may introduce new failure modes in claims handling".to_string(),
            ])
            .with_deliverables(vec![
                Deliverable::new("Customer success platform implementation").on_day(60),
                Deliverable::new("CRM churn scoring enrichment").on_day(45),
                Deliverable::new("Claims automation rollout").on_day(120),
            ])
            .with_budget_request(BudgetRequest {
                department: "operations".to_string(),
                amount: 350_000.0,
                purpose: "Claims automation and success platform".to_string(),
                priority: Priority::Medium,
            })
            .with_affected_departments(vec!["operations".to_string()])
    }
}
