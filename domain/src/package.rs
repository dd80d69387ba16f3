//! The decision package: the externally consumed artifact of one
//! directive, and the pure synthesis helpers that build its parts.
//!
//! The serialized shape is a stable contract for downstream consumers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::audit::report::AuditReport;
use crate::conflict::alignment::AlignmentStatus;
use crate::conflict::types::Conflict;
use crate::core::id::DirectiveId;
use crate::state::goal::Goal;
use crate::worker::output::{Recommendation, WorkerOutput};

/// One strategic option presented for a decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategicOption {
    pub name: String,
    pub description: String,
    pub investment: f64,
    pub timeline_days: u32,
    pub headcount: u32,
    pub expected_improvement: String,
    pub confidence: f64,
    pub trade_offs: String,
}

/// A worker's slice of the execution plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentPlan {
    pub recommendations: Vec<Recommendation>,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headcount: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline_days: Option<u32>,
    pub citations: Vec<String>,
}

impl DepartmentPlan {
    pub fn from_output(output: &WorkerOutput) -> Self {
        Self {
            recommendations: output.recommendations.clone(),
            confidence: output.confidence,
            budget: output.budget_impact,
            headcount: output.headcount_impact,
            timeline_days: output.timeline_days,
            citations: output.citations.clone(),
        }
    }
}

/// Budget roll-up across all workers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetImpact {
    pub total_investment: f64,
    pub by_department: BTreeMap<String, f64>,
}

/// Headcount roll-up across all workers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadcountImpact {
    pub total_new_hires: u32,
    pub by_department: BTreeMap<String, u32>,
}

/// A tracked success metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kpi {
    pub name: String,
    pub current: String,
    pub target: String,
    pub measurement: String,
}

/// An output flagged for executive attention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Escalation {
    pub worker: String,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_impact: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headcount_impact: Option<u32>,
}

/// The finalized output of one directive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionPackage {
    pub directive_id: DirectiveId,
    pub strategic_goal: String,
    pub constraint: String,
    pub summary: String,
    pub strategic_options: Vec<StrategicOption>,
    pub department_plans: BTreeMap<String, DepartmentPlan>,
    pub budget_impact: BudgetImpact,
    pub headcount_impact: HeadcountImpact,
    pub risks: Vec<String>,
    pub assumptions: Vec<String>,
    pub dependencies: Vec<String>,
    pub kpis: Vec<Kpi>,
    pub alignment_status: AlignmentStatus,
    pub unresolved_conflicts: Vec<Conflict>,
    pub escalations: Vec<Escalation>,
    pub audit_summary: AuditReport,
}

/// Sum of reported budget impacts, missing values treated as zero.
pub fn roll_up_budget(outputs: &[WorkerOutput]) -> BudgetImpact {
    let by_department: BTreeMap<String, f64> = outputs
        .iter()
        .map(|o| (o.worker.clone(), o.budget_impact.unwrap_or(0.0)))
        .collect();
    BudgetImpact {
        total_investment: by_department.values().sum(),
        by_department,
    }
}

/// Sum of reported headcount impacts, missing values treated as zero.
pub fn roll_up_headcount(outputs: &[WorkerOutput]) -> HeadcountImpact {
    let by_department: BTreeMap<String, u32> = outputs
        .iter()
        .map(|o| (o.worker.clone(), o.headcount_impact.unwrap_or(0)))
        .collect();
    HeadcountImpact {
        total_new_hires: by_department.values().sum(),
        by_department,
    }
}

/// Union of all risks in first-seen order, duplicates removed.
pub fn dedup_risks(outputs: &[WorkerOutput]) -> Vec<String> {
    let mut seen = std::collections::BTreeSet::new();
    let mut risks = Vec::new();
    for output in outputs {
        for risk in &output.risks {
            if seen.insert(risk.clone()) {
                risks.push(risk.clone());
            }
        }
    }
    risks
}

fn improvement_band(low: f64, high: f64) -> String {
    format!("{:.0}-{:.0}%", (low * 100.0).round(), (high * 100.0).round())
}

/// The three reference options: full scope, ~60% phased, ~30% minimal.
pub fn build_strategic_options(
    target_value: f64,
    total_budget: f64,
    total_headcount: u32,
) -> Vec<StrategicOption> {
    vec![
        StrategicOption {
            name: "Comprehensive Program".to_string(),
            description: "Execute all recommended initiatives across departments".to_string(),
            investment: total_budget,
            timeline_days: 90,
            headcount: total_headcount,
            expected_improvement: improvement_band(target_value, target_value + 0.02),
            confidence: 0.85,
            trade_offs: "Higher investment but maximum impact".to_string(),
        },
        StrategicOption {
            name: "Phased Rollout".to_string(),
            description: "Phase 1: quick wins (support, marketing). Phase 2: infrastructure (sales, operations)".to_string(),
            investment: total_budget * 0.6,
            timeline_days: 180,
            headcount: (total_headcount as f64 * 0.6) as u32,
            expected_improvement: improvement_band(target_value * 0.65, target_value * 0.75),
            confidence: 0.80,
            trade_offs: "Lower initial investment, slower results, option to scale".to_string(),
        },
        StrategicOption {
            name: "Minimum Viable Program".to_string(),
            description: "Highest-impact, lowest-cost initiatives only".to_string(),
            investment: total_budget * 0.3,
            timeline_days: 45,
            headcount: (total_headcount as f64 * 0.3) as u32,
            expected_improvement: improvement_band(target_value * 0.4, target_value * 0.5),
            confidence: 0.70,
            trade_offs: "Minimal investment but may not achieve target".to_string(),
        },
    ]
}

/// KPI set for a retention goal: headline rate, every key result, and the
/// acquisition-cost guard when known.
pub fn retention_kpis(goal: &Goal, target_value: f64, cac: Option<f64>) -> Vec<Kpi> {
    let mut kpis = vec![Kpi {
        name: "Retention Rate".to_string(),
        current: format!("{:.0}%", goal.current_value * 100.0),
        target: format!("{:.0}%", (goal.current_value + target_value) * 100.0),
        measurement: "Quarterly cohort analysis".to_string(),
    }];

    for kr in &goal.key_results {
        let fractional = kr.target <= 1.0 && kr.current <= 1.0;
        let fmt = |v: f64| {
            if fractional {
                format!("{:.0}%", v * 100.0)
            } else {
                format!("{v:.0}")
            }
        };
        kpis.push(Kpi {
            name: kr.description.clone(),
            current: fmt(kr.current),
            target: fmt(kr.target),
            measurement: "Monthly tracking".to_string(),
        });
    }

    if let Some(cac) = cac {
        kpis.push(Kpi {
            name: "Customer Acquisition Cost".to_string(),
            current: format!("${cac:.0}"),
            target: format!("${cac:.0} (maintain)"),
            measurement: "Monthly blended CAC".to_string(),
        });
    }
    kpis
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::id::TaskId;
    use chrono::Utc;

    fn output(worker: &str, budget: Option<f64>, headcount: Option<u32>) -> WorkerOutput {
        let mut o = WorkerOutput::new(worker, TaskId::new(worker, 1), 0.8);
        o.budget_impact = budget;
        o.headcount_impact = headcount;
        o
    }

    #[test]
    fn test_budget_rollup_treats_missing_as_zero() {
        let outputs = vec![
            output("sales", Some(100.0), None),
            output("finance", None, None),
            output("support", Some(0.0), None),
        ];
        let impact = roll_up_budget(&outputs);
        assert_eq!(impact.total_investment, 100.0);
        assert_eq!(impact.by_department["finance"], 0.0);
    }

    #[test]
    fn test_rollup_all_missing() {
        let outputs = vec![output("a", None, None), output("b", None, None)];
        assert_eq!(roll_up_budget(&outputs).total_investment, 0.0);
        assert_eq!(roll_up_headcount(&outputs).total_new_hires, 0);
    }

    #[test]
    fn test_reference_scenario_rollup_and_options() {
        // Six workers with the reference retention-scenario impacts.
        let outputs = vec![
            output("sales", Some(450_000.0), Some(8)),
            output("marketing", Some(850_000.0), Some(3)),
            output("finance", Some(0.0), Some(0)),
            output("operations", Some(350_000.0), Some(0)),
            output("support", Some(200_000.0), Some(6)),
            output("hiring", Some(1_875_000.0), Some(20)),
        ];

        let budget = roll_up_budget(&outputs);
        assert_eq!(budget.total_investment, 3_725_000.0);

        let options = build_strategic_options(0.08, budget.total_investment, 37);
        assert_eq!(options[0].name, "Comprehensive Program");
        assert_eq!(options[0].investment, 3_725_000.0);
        assert_eq!(options[2].name, "Minimum Viable Program");
        assert_eq!(options[2].investment, 1_117_500.0);
    }

    #[test]
    fn test_dedup_risks_keeps_first_seen_order() {
        let mut a = output("a", None, None);
        a.risks = vec!["hiring delay".to_string(), "competitor response".to_string()];
        let mut b = output("b", None, None);
        b.risks = vec!["competitor response".to_string(), "data quality".to_string()];

        let risks = dedup_risks(&[a, b]);
        assert_eq!(risks, vec!["hiring delay", "competitor response", "data quality"]);
    }

    #[test]
    fn test_retention_kpis() {
        let goal = Goal::new(
            "GOAL-001",
            "Improve customer retention rate",
            0.92,
            0.84,
            "percentage",
            Utc::now(),
            "chief-executive",
        )
        .with_key_results(vec![
            crate::state::KeyResult::new("Reduce churn rate", 0.08, 0.16),
            crate::state::KeyResult::new("Improve NPS", 45.0, 32.0),
        ]);

        let kpis = retention_kpis(&goal, 0.08, Some(385.0));
        assert_eq!(kpis.len(), 4);
        assert_eq!(kpis[0].current, "84%");
        assert_eq!(kpis[0].target, "92%");
        assert_eq!(kpis[1].current, "16%");
        assert_eq!(kpis[2].current, "32");
        assert_eq!(kpis[2].target, "45");
        assert!(kpis[3].target.contains("maintain"));
    }
}
