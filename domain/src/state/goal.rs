//! Company goals tracked in the shared state store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a goal. Goals are never deleted, only superseded
/// by a status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Active,
    AtRisk,
    Achieved,
    Missed,
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GoalStatus::Active => write!(f, "active"),
            GoalStatus::AtRisk => write!(f, "at_risk"),
            GoalStatus::Achieved => write!(f, "achieved"),
            GoalStatus::Missed => write!(f, "missed"),
        }
    }
}

/// A measurable sub-target of a goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyResult {
    pub description: String,
    pub target: f64,
    pub current: f64,
}

impl KeyResult {
    pub fn new(description: impl Into<String>, target: f64, current: f64) -> Self {
        Self {
            description: description.into(),
            target,
            current,
        }
    }
}

/// A structured company goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub description: String,
    pub target_value: f64,
    pub current_value: f64,
    pub unit: String,
    pub deadline: DateTime<Utc>,
    pub owner: String,
    pub status: GoalStatus,
    #[serde(default)]
    pub associated_workers: Vec<String>,
    #[serde(default)]
    pub key_results: Vec<KeyResult>,
}

impl Goal {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        target_value: f64,
        current_value: f64,
        unit: impl Into<String>,
        deadline: DateTime<Utc>,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            target_value,
            current_value,
            unit: unit.into(),
            deadline,
            owner: owner.into(),
            status: GoalStatus::Active,
            associated_workers: Vec::new(),
            key_results: Vec::new(),
        }
    }

    pub fn with_workers(mut self, workers: Vec<String>) -> Self {
        self.associated_workers = workers;
        self
    }

    pub fn with_key_results(mut self, key_results: Vec<KeyResult>) -> Self {
        self.key_results = key_results;
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == GoalStatus::Active
    }

    /// Fraction of the target already reached (0 when target is 0).
    pub fn progress(&self) -> f64 {
        if self.target_value == 0.0 {
            0.0
        } else {
            self.current_value / self.target_value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn goal() -> Goal {
        Goal::new(
            "GOAL-001",
            "Improve customer retention rate",
            0.92,
            0.84,
            "percentage",
            Utc.with_ymd_and_hms(2026, 12, 31, 0, 0, 0).unwrap(),
            "chief-executive",
        )
    }

    #[test]
    fn test_new_goal_is_active() {
        assert!(goal().is_active());
    }

    #[test]
    fn test_progress_fraction() {
        let g = goal();
        assert!((g.progress() - 0.84 / 0.92).abs() < 1e-9);
    }

    #[test]
    fn test_progress_zero_target() {
        let mut g = goal();
        g.target_value = 0.0;
        assert_eq!(g.progress(), 0.0);
    }
}
