//! Worker tasks and directive decomposition.

use crate::core::id::{DirectiveId, TaskId};
use serde::{Deserialize, Serialize};

use super::intent::{Objective, ParsedIntent};

/// Closed set of task kinds a directive can decompose into. Workers
/// match on this exhaustively, so a new kind is a compile-time change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    RetentionProgram,
    RetentionCampaign,
    BudgetPlanning,
    ProcessOptimization,
    ChurnAnalysis,
    HiringPlan,
    General,
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TaskKind::RetentionProgram => "retention_program",
            TaskKind::RetentionCampaign => "retention_campaign",
            TaskKind::BudgetPlanning => "budget_planning",
            TaskKind::ProcessOptimization => "process_optimization",
            TaskKind::ChurnAnalysis => "churn_analysis",
            TaskKind::HiringPlan => "hiring_plan",
            TaskKind::General => "general",
        };
        f.write_str(s)
    }
}

/// A task dispatched to one worker for one directive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerTask {
    pub id: TaskId,
    pub directive_id: DirectiveId,
    pub worker: String,
    pub kind: TaskKind,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_value: Option<f64>,
}

impl WorkerTask {
    fn new(
        directive_id: &DirectiveId,
        seq: u64,
        worker: &str,
        kind: TaskKind,
        description: &str,
        target_value: Option<f64>,
    ) -> Self {
        Self {
            id: TaskId::new(worker, seq),
            directive_id: directive_id.clone(),
            worker: worker.to_string(),
            kind,
            description: description.to_string(),
            target_value,
        }
    }
}

/// Decompose a parsed intent into per-worker tasks.
///
/// The retention objective fans out to the six reference tasks, each
/// carrying the target value. A general objective sends one general task
/// to every affected worker.
pub fn decompose(intent: &ParsedIntent, directive_id: &DirectiveId) -> Vec<WorkerTask> {
    match intent.primary_objective {
        Objective::ImproveRetention => {
            let target = Some(intent.target_value);
            let plan: [(&str, TaskKind, &str); 6] = [
                (
                    "sales",
                    TaskKind::RetentionProgram,
                    "Develop retention strategies and customer success plans",
                ),
                (
                    "marketing",
                    TaskKind::RetentionCampaign,
                    "Design retention marketing campaigns",
                ),
                (
                    "finance",
                    TaskKind::BudgetPlanning,
                    "Develop budget allocation for retention initiatives",
                ),
                (
                    "operations",
                    TaskKind::ProcessOptimization,
                    "Optimize processes for customer experience",
                ),
                (
                    "support",
                    TaskKind::ChurnAnalysis,
                    "Analyze churn signals and develop intervention strategies",
                ),
                (
                    "hiring",
                    TaskKind::HiringPlan,
                    "Develop hiring plan to support retention initiatives",
                ),
            ];
            plan.iter()
                .enumerate()
                .map(|(i, (worker, kind, description))| {
                    WorkerTask::new(directive_id, i as u64 + 1, worker, *kind, description, target)
                })
                .collect()
        }
        Objective::General => intent
            .affected_workers
            .iter()
            .enumerate()
            .map(|(i, worker)| {
                WorkerTask::new(
                    directive_id,
                    i as u64 + 1,
                    worker,
                    TaskKind::General,
                    &intent.original_text,
                    None,
                )
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn retention_intent() -> ParsedIntent {
        ParsedIntent {
            original_text: "Improve retention by 8% without increasing CAC".to_string(),
            primary_objective: Objective::ImproveRetention,
            target_metric: "retention_rate".to_string(),
            target_value: 0.08,
            constraint: "No CAC increase allowed".to_string(),
            affected_workers: vec![
                "sales".into(),
                "marketing".into(),
                "finance".into(),
                "operations".into(),
                "support".into(),
                "hiring".into(),
            ],
        }
    }

    #[test]
    fn test_retention_fans_out_to_six_tasks() {
        let tasks = decompose(&retention_intent(), &DirectiveId::from_sequence(1));
        assert_eq!(tasks.len(), 6);

        let workers: Vec<&str> = tasks.iter().map(|t| t.worker.as_str()).collect();
        assert_eq!(
            workers,
            vec!["sales", "marketing", "finance", "operations", "support", "hiring"]
        );
        assert!(tasks.iter().all(|t| t.target_value == Some(0.08)));
        assert_eq!(tasks[4].kind, TaskKind::ChurnAnalysis);
    }

    #[test]
    fn test_general_intent_one_task_per_worker() {
        let intent = ParsedIntent::general(
            "Review vendor contracts",
            vec!["finance".to_string(), "operations".to_string()],
        );
        let tasks = decompose(&intent, &DirectiveId::from_sequence(2));
        assert_eq!(tasks.len(), 2);
        assert!(tasks.iter().all(|t| t.kind == TaskKind::General));
        assert!(tasks.iter().all(|t| t.target_value.is_none()));
    }
}
