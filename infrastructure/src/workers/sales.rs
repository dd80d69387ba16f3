//! Sales worker: retention strategies, customer success plans.

use async_trait::async_trait;
use consilium_application::ports::worker::{Worker, WorkerContext, WorkerError};
use consilium_domain::{
    assess_confidence, BudgetRequest, Citation, CitationSource, Deliverable, Priority,
    Recommendation, TaskKind, WorkerOutput, WorkerTask,
};

use super::{base_draft, general_output, record_access};

const NAME: &str = "sales";

pub struct SalesWorker;

#[async_trait]
impl Worker for SalesWorker {
    fn name(&self) -> &str {
        NAME
    }

    async fn process(
        &self,
        task: WorkerTask,
        ctx: WorkerContext,
    ) -> Result<WorkerOutput, WorkerError> {
        let customers = ctx.data.customer_summary();
        let citations = vec![
            record_access(
                &ctx,
                NAME,
                "crm",
                "customer_churn_analysis",
                customers.high_risk_customers,
                "retention planning",
            ),
            record_access(&ctx, NAME, "crm", "customer_summary", customers.total_customers, "segment sizing"),
        ];

        match task.kind {
            TaskKind::RetentionProgram => Ok(self.retention_program(&task, &ctx, citations)),
            TaskKind::RetentionCampaign
            | TaskKind::BudgetPlanning
            | TaskKind::ProcessOptimization
            | TaskKind::ChurnAnalysis
            | TaskKind::HiringPlan
            | TaskKind::General => Ok(general_output(NAME, task.id, citations)),
        }
    }
}

impl SalesWorker {
    fn retention_program(
        &self,
        task: &WorkerTask,
        ctx: &WorkerContext,
        citations: Vec<String>,
    ) -> WorkerOutput {
        let customers = ctx.data.customer_summary();
        let at_risk = customers.high_risk_customers + customers.critical_risk_customers;
        let target = task.target_value.unwrap_or(0.08);
        let target_rate = customers.retention_rate + target;

        let recommendations = vec![
            Recommendation::new(
                "Proactive Outreach to At-Risk Segments",
                format!(
                    "Deploy retention specialists to {at_risk} high-risk customers representing ${:.0} in annual revenue",
                    customers.at_risk_revenue
                ),
                format!(
                    "Prevent 40% of expected churn = {} customers retained",
                    at_risk * 2 / 5
                ),
            )
            .with_action_items(vec![
                "Segment high-risk customers by churn reason".to_string(),
                "Create tailored retention offers per segment".to_string(),
                "Assign dedicated success managers to critical accounts".to_string(),
                "Implement a 90-day check-in program".to_string(),
            ]),
            Recommendation::new(
                "Customer Success Expansion",
                "Expand the customer success team to provide proactive service",
                "15% improvement in satisfaction scores, 5% retention lift",
            )
            .with_action_items(vec![
                "Hire 8 additional Customer Success Managers".to_string(),
                "Implement a customer health scoring system".to_string(),
            ]),
            Recommendation::new(
                "Loyalty Rewards Program",
                "Introduce tenure-based benefits for long-term customers",
                "3-5% retention improvement among 2+ year customers",
            ),
        ];

        let confidence = assess_confidence(0.85, 2, true);
        let decision = format!(
            "Recommend 3-pronged retention strategy targeting {:.0}% retention rate",
            target_rate * 100.0
        );
        ctx.audit.log_decision(
            base_draft(
                NAME,
                task,
                decision,
                format!(
                    "Analysis of {} customers reveals {at_risk} at high churn risk; proactive outreach has historically prevented 40% of churn",
                    customers.total_customers
                ),
                confidence,
            )
            .with_citations(vec![Citation::new(
                CitationSource::Database,
                "crm.customer_churn_analysis",
                "At-risk customer count and revenue",
                serde_json::json!({
                    "at_risk_customers": at_risk,
                    "at_risk_revenue": customers.at_risk_revenue,
                }),
            )])
            .with_data_sources(vec!["crm".to_string()])
            .with_assumptions(vec![
                "Churn reasons are identifiable from CRM data".to_string(),
                "Retention offers remain within margin guardrails".to_string(),
            ])
            .with_change_conditions("Churn risk assessment shifts by more than 20%"),
        );

        WorkerOutput::new(NAME, task.id.clone(), confidence)
            .with_recommendations(recommendations)
            .with_citations(citations)
            .with_what_would_change_mind(vec![
                "Churn risk assessment changes by >20%".to_string(),
                "Competitor launches aggressive poaching campaign".to_string(),
            ])
            .with_budget_impact(450_000.0)
            .with_headcount_impact(8)
            .with_timeline_days(90)
            .with_risks(vec![
                "Retention offers may be matched by competitors".to_string(),
                "Hiring timeline may delay program launch".to_string(),
                "Customer segments may be misidentified".to_string(),
            ])
            .with_dependencies(vec![
                "Customer success platform implementation".to_string(),
                "CRM churn scoring enrichment".to_string(),
            ])
            .with_deliverables(vec![Deliverable::new("Retention playbooks").on_day(30)])
            .with_budget_request(BudgetRequest {
                department: "sales".to_string(),
                amount: 450_000.0,
                purpose: "Retention specialists and loyalty program".to_string(),
                priority: Priority::High,
            })
            .with_affected_departments(vec!["sales".to_string()])
    }
}
