//! Structured worker output.

use crate::core::id::TaskId;
use serde::{Deserialize, Serialize};

/// Confidence assigned to a degraded output produced in place of a
/// failed worker invocation.
pub const DEGRADED_CONFIDENCE: f64 = 0.30;

/// A single recommendation within a worker output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub expected_impact: String,
    #[serde(default)]
    pub action_items: Vec<String>,
}

impl Recommendation {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        expected_impact: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            expected_impact: expected_impact.into(),
            action_items: Vec::new(),
        }
    }

    pub fn with_action_items(mut self, items: Vec<String>) -> Self {
        self.action_items = items;
        self
    }
}

/// A request for departmental budget, used by conflict detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetRequest {
    pub department: String,
    pub amount: f64,
    pub purpose: String,
    pub priority: crate::state::Priority,
}

/// A request for a named shared resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceRequest {
    pub resource: String,
    pub amount: f64,
    pub priority: crate::state::Priority,
}

/// A deliverable a worker commits to produce, matched against other
/// workers' declared dependencies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deliverable {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
}

impl Deliverable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            day: None,
        }
    }

    pub fn on_day(mut self, day: u32) -> Self {
        self.day = Some(day);
        self
    }
}

/// Direction of a strategic stance on a named lever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StanceDirection {
    Increase,
    Decrease,
    Hold,
}

impl StanceDirection {
    /// Increase and Decrease on the same lever are antagonistic.
    pub fn opposes(&self, other: StanceDirection) -> bool {
        matches!(
            (self, other),
            (StanceDirection::Increase, StanceDirection::Decrease)
                | (StanceDirection::Decrease, StanceDirection::Increase)
        )
    }
}

/// A declared strategic direction, e.g. "decrease customer_acquisition_cost".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategicStance {
    pub lever: String,
    pub direction: StanceDirection,
    pub position: String,
}

impl StrategicStance {
    pub fn new(
        lever: impl Into<String>,
        direction: StanceDirection,
        position: impl Into<String>,
    ) -> Self {
        Self {
            lever: lever.into(),
            direction,
            position: position.into(),
        }
    }
}

/// Standardized output every worker returns for a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerOutput {
    pub worker: String,
    pub task_id: TaskId,
    pub recommendations: Vec<Recommendation>,
    /// 0-1 confidence in the recommendation set.
    pub confidence: f64,
    /// Data source citations backing numeric claims.
    pub citations: Vec<String>,
    #[serde(default)]
    pub what_would_change_mind: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_impact: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headcount_impact: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline_days: Option<u32>,
    #[serde(default)]
    pub risks: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub deliverables: Vec<Deliverable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_request: Option<BudgetRequest>,
    #[serde(default)]
    pub resource_requests: Vec<ResourceRequest>,
    #[serde(default)]
    pub stances: Vec<StrategicStance>,
    #[serde(default)]
    pub requires_policy_change: bool,
    #[serde(default)]
    pub affected_departments: Vec<String>,
}

impl WorkerOutput {
    pub fn new(worker: impl Into<String>, task_id: TaskId, confidence: f64) -> Self {
        Self {
            worker: worker.into(),
            task_id,
            recommendations: Vec::new(),
            confidence,
            citations: Vec::new(),
            what_would_change_mind: Vec::new(),
            budget_impact: None,
            headcount_impact: None,
            timeline_days: None,
            risks: Vec::new(),
            dependencies: Vec::new(),
            deliverables: Vec::new(),
            budget_request: None,
            resource_requests: Vec::new(),
            stances: Vec::new(),
            requires_policy_change: false,
            affected_departments: Vec::new(),
        }
    }

    /// Fallback output for a failed worker invocation: no recommendations,
    /// floor confidence, a synthetic risk note. Keeps aggregation going
    /// without hiding the failure.
    pub fn degraded(worker: impl Into<String>, task_id: TaskId, error: &str) -> Self {
        let worker = worker.into();
        let mut output = Self::new(worker.clone(), task_id, DEGRADED_CONFIDENCE);
        output.risks.push(format!(
            "{worker} worker failed to produce a recommendation: {error}"
        ));
        output
    }

    pub fn with_recommendations(mut self, recommendations: Vec<Recommendation>) -> Self {
        self.recommendations = recommendations;
        self
    }

    pub fn with_citations(mut self, citations: Vec<String>) -> Self {
        self.citations = citations;
        self
    }

    pub fn with_budget_impact(mut self, amount: f64) -> Self {
        self.budget_impact = Some(amount);
        self
    }

    pub fn with_headcount_impact(mut self, count: u32) -> Self {
        self.headcount_impact = Some(count);
        self
    }

    pub fn with_timeline_days(mut self, days: u32) -> Self {
        self.timeline_days = Some(days);
        self
    }

    pub fn with_risks(mut self, risks: Vec<String>) -> Self {
        self.risks = risks;
        self
    }

    pub fn with_dependencies(mut self, dependencies: Vec<String>) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn with_deliverables(mut self, deliverables: Vec<Deliverable>) -> Self {
        self.deliverables = deliverables;
        self
    }

    pub fn with_budget_request(mut self, request: BudgetRequest) -> Self {
        self.budget_request = Some(request);
        self
    }

    pub fn with_resource_requests(mut self, requests: Vec<ResourceRequest>) -> Self {
        self.resource_requests = requests;
        self
    }

    pub fn with_stances(mut self, stances: Vec<StrategicStance>) -> Self {
        self.stances = stances;
        self
    }

    pub fn with_what_would_change_mind(mut self, conditions: Vec<String>) -> Self {
        self.what_would_change_mind = conditions;
        self
    }

    pub fn with_affected_departments(mut self, departments: Vec<String>) -> Self {
        self.affected_departments = departments;
        self
    }

    pub fn requiring_policy_change(mut self) -> Self {
        self.requires_policy_change = true;
        self
    }

    pub fn is_degraded(&self) -> bool {
        self.recommendations.is_empty() && self.confidence <= DEGRADED_CONFIDENCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degraded_output_shape() {
        let output = WorkerOutput::degraded("sales", TaskId::new("sales", 1), "timed out");
        assert!(output.is_degraded());
        assert_eq!(output.confidence, DEGRADED_CONFIDENCE);
        assert!(output.recommendations.is_empty());
        assert_eq!(output.risks.len(), 1);
        assert!(output.risks[0].contains("timed out"));
    }

    #[test]
    fn test_stance_opposition() {
        assert!(StanceDirection::Increase.opposes(StanceDirection::Decrease));
        assert!(StanceDirection::Decrease.opposes(StanceDirection::Increase));
        assert!(!StanceDirection::Hold.opposes(StanceDirection::Increase));
        assert!(!StanceDirection::Increase.opposes(StanceDirection::Increase));
    }
}
