//! Marketing worker: retention campaigns and channel allocation.

use async_trait::async_trait;
use consilium_application::ports::worker::{Worker, WorkerContext, WorkerError};
use consilium_domain::{
    assess_confidence, BudgetRequest, Citation, CitationSource, Deliverable, Priority,
    Recommendation, ResourceRequest, StanceDirection, StrategicStance, TaskKind, WorkerOutput,
    WorkerTask,
};

use super::{base_draft, general_output, record_access};

const NAME: &str = "marketing";

pub struct MarketingWorker;

#[async_trait]
impl Worker for MarketingWorker {
    fn name(&self) -> &str {
        NAME
    }

    async fn process(
        &self,
        task: WorkerTask,
        ctx: WorkerContext,
    ) -> Result<WorkerOutput, WorkerError> {
        let customers = ctx.data.customer_summary();
        let citations = vec![record_access(
            &ctx,
            NAME,
            "marketing_db",
            "campaign_performance",
            customers.total_customers,
            "retention campaign design",
        )];

        match task.kind {
            TaskKind::RetentionCampaign => Ok(self.retention_campaign(&task, &ctx, citations)),
            TaskKind::RetentionProgram
            | TaskKind::BudgetPlanning
            | TaskKind::ProcessOptimization
            | TaskKind::ChurnAnalysis
            | TaskKind::HiringPlan
            | TaskKind::General => Ok(general_output(NAME, task.id, citations)),
        }
    }
}

impl MarketingWorker {
    fn retention_campaign(
        &self,
        task: &WorkerTask,
        ctx: &WorkerContext,
        citations: Vec<String>,
    ) -> WorkerOutput {
        let customers = ctx.data.customer_summary();
        let confidence = assess_confidence(0.80, 2, true);

        let recommendations = vec![
            Recommendation::new(
                "Lifecycle Win-Back Campaign",
                format!(
                    "Target the {} high-risk customers with personalized value-reinforcement messaging",
                    customers.high_risk_customers
                ),
                "2-3% retention lift in the targeted cohort",
            )
            .with_action_items(vec![
                "Build segment-specific creative for price, service and coverage concerns".to_string(),
                "Stand up triggered email and in-app journeys".to_string(),
                "A/B test incentive depth against margin impact".to_string(),
            ]),
            Recommendation::new(
                "Customer Marketing Automation",
                "Deploy milestone and renewal-window automation across the base",
                "Improved renewal rates without increasing blended CAC",
            ),
        ];

        ctx.audit.log_decision(
            base_draft(
                NAME,
                task,
                "Recommend retention campaign portfolio at $850K".to_string(),
                format!(
                    "Campaign history shows retention messaging outperforms acquisition at {:.0}% churn",
                    customers.churn_rate * 100.0
                ),
                confidence,
            )
            .with_citations(vec![Citation::new(
                CitationSource::Database,
                "marketing_db.campaign_performance",
                "Historical campaign performance for retention cohorts",
                serde_json::json!({"churn_rate": customers.churn_rate}),
            )])
            .with_data_sources(vec!["marketing_db".to_string()])
            .with_change_conditions("Campaign pilots underperform a 1.5x ROI floor"),
        );

        WorkerOutput::new(NAME, task.id.clone(), confidence)
            .with_recommendations(recommendations)
            .with_citations(citations)
            .with_what_would_change_mind(vec![
                "Pilot campaign ROI below 1.5x".to_string(),
                "CAC drifts upward during the campaign window".to_string(),
            ])
            .with_budget_impact(850_000.0)
            .with_headcount_impact(3)
            .with_timeline_days(45)
            .with_risks(vec![
                "Incentive depth may erode margins".to_string(),
                "Message fatigue in over-contacted segments".to_string(),
            ])
            .with_deliverables(vec![Deliverable::new("Retention campaign assets").on_day(21)])
            .with_budget_request(BudgetRequest {
                department: "marketing".to_string(),
                amount: 850_000.0,
                purpose: "Retention campaign portfolio".to_string(),
                priority: Priority::High,
            })
            .with_resource_requests(vec![ResourceRequest {
                resource: "data-engineering".to_string(),
                amount: 1.0,
                priority: Priority::Medium,
            }])
            .with_stances(vec![StrategicStance::new(
                "customer_acquisition_cost",
                StanceDirection::Hold,
                "Maintain CAC while shifting spend toward retention",
            )])
            .with_affected_departments(vec!["marketing".to_string()])
    }
}
