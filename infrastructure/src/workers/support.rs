//! Support worker: churn signal analysis and intervention design.

use async_trait::async_trait;
use consilium_application::ports::worker::{Worker, WorkerContext, WorkerError};
use consilium_domain::{
    assess_confidence, BudgetRequest, Citation, CitationSource, Priority, Recommendation,
    ResourceRequest, TaskKind, WorkerOutput, WorkerTask,
};

use super::{base_draft, general_output, record_access};

const NAME: &str = "support";

pub struct SupportWorker;

#[async_trait]
impl Worker for SupportWorker {
    fn name(&self) -> &str {
        NAME
    }

    async fn process(
        &self,
        task: WorkerTask,
        ctx: WorkerContext,
    ) -> Result<WorkerOutput, WorkerError> {
        let tickets = ctx.data.ticket_summary();
        let citations = vec![
            record_access(
                &ctx,
                NAME,
                "ticketing",
                "ticket_summary",
                tickets.total_tickets,
                "churn signal analysis",
            ),
            record_access(
                &ctx,
                NAME,
                "ticketing",
                "churn_signals",
                tickets.churn_signal_count,
                "intervention targeting",
            ),
        ];

        match task.kind {
            TaskKind::ChurnAnalysis => Ok(self.churn_analysis(&task, &ctx, citations)),
            TaskKind::RetentionProgram
            | TaskKind::RetentionCampaign
            | TaskKind::BudgetPlanning
            | TaskKind::ProcessOptimization
            | TaskKind::HiringPlan
            | TaskKind::General => Ok(general_output(NAME, task.id, citations)),
        }
    }
}

impl SupportWorker {
    fn churn_analysis(
        &self,
        task: &WorkerTask,
        ctx: &WorkerContext,
        citations: Vec<String>,
    ) -> WorkerOutput {
        let tickets = ctx.data.ticket_summary();
        let confidence = assess_confidence(0.90, 2, true);

        let recommendations = vec![
            Recommendation::new(
                "Predictive Churn Intervention",
                format!(
                    "Deploy an early warning system for the {} customers showing churn signals",
                    tickets.churn_signal_count
                ),
                format!(
                    "Prevent 45% of predicted churn = {} customers",
                    tickets.churn_signal_count * 45 / 100
                ),
            )
            .with_action_items(vec![
                "Build a churn prediction model from support signals".to_string(),
                "Alert on high-risk customers within 24h of detection".to_string(),
                "Design intervention playbooks per risk level".to_string(),
            ]),
            Recommendation::new(
                "Complaint Root-Cause Mining",
                format!(
                    "Mine {} tickets to find the systemic issues driving churn",
                    tickets.total_tickets
                ),
                "Address the top 3 issues behind 60% of complaints",
            )
            .with_action_items(vec![
                format!("Analyze patterns in {} billing disputes", tickets.billing_disputes),
                format!("Review {} claims complaints", tickets.claims_complaints),
            ]),
            Recommendation::new(
                "Escalation Prevention",
                format!(
                    "Reduce the {:.0}% escalation rate through first-contact resolution",
                    tickets.escalation_rate * 100.0
                ),
                "50% reduction in escalations",
            ),
        ];

        ctx.audit.log_decision(
            base_draft(
                NAME,
                task,
                format!(
                    "Recommend churn intervention targeting {} flagged customers",
                    tickets.churn_signal_count
                ),
                format!(
                    "Ticket mining over {} tickets shows satisfaction {:.1}/5.0 and a {:.0}% escalation rate",
                    tickets.total_tickets, tickets.avg_satisfaction, tickets.escalation_rate * 100.0
                ),
                confidence,
            )
            .with_citations(vec![Citation::new(
                CitationSource::Database,
                "ticketing.churn_signals",
                "Customers flagged with churn signals",
                serde_json::json!({"churn_signal_count": tickets.churn_signal_count}),
            )])
            .with_data_sources(vec!["ticketing".to_string()])
            .with_assumptions(vec![
                "Support signals are predictive of churn".to_string(),
                "Intervention capacity can reach all flagged customers".to_string(),
            ])
            .with_change_conditions("Churn signal model validation shows <70% accuracy"),
        );

        WorkerOutput::new(NAME, task.id.clone(), confidence)
            .with_recommendations(recommendations)
            .with_citations(citations)
            .with_what_would_change_mind(vec![
                "Churn signal model validation shows <70% accuracy".to_string(),
                "Survey data contradicts ticket-based analysis".to_string(),
            ])
            .with_budget_impact(200_000.0)
            .with_headcount_impact(6)
            .with_timeline_days(60)
            .with_risks(vec![
                "False positives in churn prediction may annoy customers".to_string(),
                "Intervention offers may train customers to complain".to_string(),
            ])
            .with_dependencies(vec![
                "Customer success platform implementation".to_string(),
            ])
            .with_budget_request(BudgetRequest {
                department: "support".to_string(),
                amount: 200_000.0,
                purpose: "Churn prediction and intervention program".to_string(),
                priority: Priority::High,
            })
            .with_resource_requests(vec![ResourceRequest {
                resource: "data-engineering".to_string(),
                amount: 1.0,
                priority: Priority::High,
            }])
            .with_affected_departments(vec!["support".to_string()])
    }
}
