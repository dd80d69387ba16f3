//! Escalation rules over worker outputs.
//!
//! Rules run in a fixed order and the first match wins; the order only
//! affects the reported reason, since any match is sufficient grounds.

use crate::worker::output::WorkerOutput;
use serde::{Deserialize, Serialize};

/// Thresholds that force a worker output up to the executive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscalationPolicy {
    /// Outputs below this confidence escalate.
    pub min_confidence: f64,
    /// Budget impact above this amount escalates.
    pub budget_ceiling: f64,
    /// Headcount impact above this count escalates.
    pub headcount_ceiling: u32,
    /// Touching more than this many departments escalates.
    pub max_departments: usize,
}

impl Default for EscalationPolicy {
    fn default() -> Self {
        Self {
            min_confidence: 0.60,
            budget_ceiling: 500_000.0,
            headcount_ceiling: 20,
            max_departments: 3,
        }
    }
}

/// Which rule fired, with the observed value and the threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum EscalationTrigger {
    LowConfidence { score: f64, threshold: f64 },
    BudgetImpact { amount: f64, ceiling: f64 },
    PolicyChange,
    HeadcountImpact { count: u32, ceiling: u32 },
    CrossDepartment { count: usize, max: usize },
}

impl std::fmt::Display for EscalationTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EscalationTrigger::LowConfidence { score, threshold } => write!(
                f,
                "Confidence {:.0}% below {:.0}% threshold",
                score * 100.0,
                threshold * 100.0
            ),
            EscalationTrigger::BudgetImpact { amount, ceiling } => {
                write!(f, "Budget impact ${amount:.0} exceeds ${ceiling:.0}")
            }
            EscalationTrigger::PolicyChange => write!(f, "Requires policy change"),
            EscalationTrigger::HeadcountImpact { count, ceiling } => {
                write!(f, "Headcount impact {count} exceeds {ceiling} FTE")
            }
            EscalationTrigger::CrossDepartment { count, max } => {
                write!(f, "Affects {count} departments, more than {max}")
            }
        }
    }
}

impl EscalationPolicy {
    /// Apply the rules in order; return the first trigger, if any.
    pub fn evaluate(&self, output: &WorkerOutput) -> Option<EscalationTrigger> {
        if output.confidence < self.min_confidence {
            return Some(EscalationTrigger::LowConfidence {
                score: output.confidence,
                threshold: self.min_confidence,
            });
        }
        if let Some(amount) = output.budget_impact
            && amount > self.budget_ceiling
        {
            return Some(EscalationTrigger::BudgetImpact {
                amount,
                ceiling: self.budget_ceiling,
            });
        }
        if output.requires_policy_change {
            return Some(EscalationTrigger::PolicyChange);
        }
        if let Some(count) = output.headcount_impact
            && count > self.headcount_ceiling
        {
            return Some(EscalationTrigger::HeadcountImpact {
                count,
                ceiling: self.headcount_ceiling,
            });
        }
        if output.affected_departments.len() > self.max_departments {
            return Some(EscalationTrigger::CrossDepartment {
                count: output.affected_departments.len(),
                max: self.max_departments,
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::id::TaskId;

    fn output(confidence: f64) -> WorkerOutput {
        WorkerOutput::new("sales", TaskId::new("sales", 1), confidence)
    }

    #[test]
    fn test_low_confidence_escalates_with_threshold_in_reason() {
        let policy = EscalationPolicy::default();
        let trigger = policy.evaluate(&output(0.55)).expect("should escalate");
        assert!(matches!(trigger, EscalationTrigger::LowConfidence { .. }));
        assert_eq!(trigger.to_string(), "Confidence 55% below 60% threshold");
    }

    #[test]
    fn test_confidence_at_threshold_does_not_escalate() {
        let policy = EscalationPolicy::default();
        assert!(policy.evaluate(&output(0.60)).is_none());
    }

    #[test]
    fn test_budget_ceiling() {
        let policy = EscalationPolicy::default();
        let over = output(0.9).with_budget_impact(500_000.01);
        assert!(matches!(
            policy.evaluate(&over),
            Some(EscalationTrigger::BudgetImpact { .. })
        ));
        let at = output(0.9).with_budget_impact(500_000.0);
        assert!(policy.evaluate(&at).is_none());
    }

    #[test]
    fn test_policy_change_flag() {
        let policy = EscalationPolicy::default();
        let flagged = output(0.9).requiring_policy_change();
        assert!(matches!(
            policy.evaluate(&flagged),
            Some(EscalationTrigger::PolicyChange)
        ));
    }

    #[test]
    fn test_headcount_ceiling() {
        let policy = EscalationPolicy::default();
        assert!(policy.evaluate(&output(0.9).with_headcount_impact(20)).is_none());
        assert!(matches!(
            policy.evaluate(&output(0.9).with_headcount_impact(21)),
            Some(EscalationTrigger::HeadcountImpact { .. })
        ));
    }

    #[test]
    fn test_department_spread() {
        let policy = EscalationPolicy::default();
        let depts = |n: usize| (0..n).map(|i| format!("dept-{i}")).collect::<Vec<_>>();
        assert!(policy
            .evaluate(&output(0.9).with_affected_departments(depts(3)))
            .is_none());
        assert!(matches!(
            policy.evaluate(&output(0.9).with_affected_departments(depts(4))),
            Some(EscalationTrigger::CrossDepartment { .. })
        ));
    }

    #[test]
    fn test_rule_order_reports_first_match() {
        // Low confidence and budget both trip; confidence is reported.
        let policy = EscalationPolicy::default();
        let both = output(0.4).with_budget_impact(1_000_000.0);
        assert!(matches!(
            policy.evaluate(&both),
            Some(EscalationTrigger::LowConfidence { .. })
        ));
    }
}
