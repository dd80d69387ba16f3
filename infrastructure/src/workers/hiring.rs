//! Hiring worker: staffing plans behind the retention initiatives.

use async_trait::async_trait;
use consilium_application::ports::worker::{Worker, WorkerContext, WorkerError};
use consilium_domain::{
    assess_confidence, BudgetRequest, Citation, CitationSource, Priority, Recommendation,
    TaskKind, WorkerOutput, WorkerTask,
};

use super::{base_draft, general_output, record_access};

const NAME: &str = "hiring";

/// Role, count and average salary for the reference staffing plan.
const PLAN: [(&str, u32, f64); 4] = [
    ("Customer Success Manager", 8, 95_000.0),
    ("Support Specialist", 6, 60_000.0),
    ("Claims Processor", 4, 60_000.0),
    ("Data Analyst", 2, 70_000.0),
];

/// Benefits multiplier applied on top of base salaries.
const BENEFITS_FACTOR: f64 = 1.25;

pub struct HiringWorker;

#[async_trait]
impl Worker for HiringWorker {
    fn name(&self) -> &str {
        NAME
    }

    async fn process(
        &self,
        task: WorkerTask,
        ctx: WorkerContext,
    ) -> Result<WorkerOutput, WorkerError> {
        let citations = vec![record_access(
            &ctx,
            NAME,
            "hris",
            "headcount_by_department",
            6,
            "staffing plan baseline",
        )];

        match task.kind {
            TaskKind::HiringPlan => Ok(self.hiring_plan(&task, &ctx, citations)),
            TaskKind::RetentionProgram
            | TaskKind::RetentionCampaign
            | TaskKind::BudgetPlanning
            | TaskKind::ProcessOptimization
            | TaskKind::ChurnAnalysis
            | TaskKind::General => Ok(general_output(NAME, task.id, citations)),
        }
    }
}

impl HiringWorker {
    fn hiring_plan(
        &self,
        task: &WorkerTask,
        ctx: &WorkerContext,
        citations: Vec<String>,
    ) -> WorkerOutput {
        let total_hires: u32 = PLAN.iter().map(|(_, count, _)| count).sum();
        let base_cost: f64 = PLAN
            .iter()
            .map(|(_, count, salary)| *count as f64 * salary)
            .sum();
        let loaded_cost = base_cost * BENEFITS_FACTOR;
        let confidence = assess_confidence(0.80, 3, true);

        let mut action_items: Vec<String> = PLAN
            .iter()
            .map(|(role, count, salary)| format!("Hire {count} {role}s (${salary:.0} avg)"))
            .collect();
        action_items.push("Stagger start dates against platform readiness".to_string());

        let recommendations = vec![
            Recommendation::new(
                format!("Retention Initiative Hiring Plan: {total_hires} FTE"),
                format!(
                    "Staff the retention program across success, support, claims and analytics; ${loaded_cost:.0} fully loaded"
                ),
                "Removes the staffing bottleneck from every other department plan",
            )
            .with_action_items(action_items),
            Recommendation::new(
                "Multi-Channel Sourcing",
                "Fill roles in 60-75 days via referral, agency and direct channels",
                "Time-to-fill under 75 days per role",
            ),
        ];

        ctx.audit.log_decision(
            base_draft(
                NAME,
                task,
                format!("Recommend hiring {total_hires} FTE at ${loaded_cost:.0} loaded cost"),
                format!(
                    "Role mix derived from department plans; ${base_cost:.0} base salaries plus {:.0}% benefits",
                    (BENEFITS_FACTOR - 1.0) * 100.0
                ),
                confidence,
            )
            .with_citations(vec![Citation::new(
                CitationSource::Calculation,
                "hris.staffing_plan",
                "Role counts and loaded cost",
                serde_json::json!({
                    "total_hires": total_hires,
                    "loaded_cost": loaded_cost,
                }),
            )])
            .with_data_sources(vec!["hris".to_string()])
            .with_assumptions(vec![
                "Salary benchmarks hold in the current market".to_string(),
                "Attrition in existing teams stays at baseline".to_string(),
                "Onboarding capacity absorbs the intake".to_string(),
            ])
            .with_change_conditions("Market salary data shifts benchmarks by >10%"),
        );

        WorkerOutput::new(NAME, task.id.clone(), confidence)
            .with_recommendations(recommendations)
            .with_citations(citations)
            .with_what_would_change_mind(vec![
                "Market data shows significantly different salary expectations".to_string(),
            ])
            .with_budget_impact(loaded_cost)
            .with_headcount_impact(total_hires)
            .with_timeline_days(75)
            .with_risks(vec![
                "Hiring timeline may slip in a tight talent market".to_string(),
            ])
            .with_budget_request(BudgetRequest {
                department: "hr".to_string(),
                amount: loaded_cost,
                purpose: "Retention program staffing".to_string(),
                priority: Priority::High,
            })
            .with_affected_departments(vec![
                "sales".to_string(),
                "support".to_string(),
                "operations".to_string(),
            ])
    }
}
