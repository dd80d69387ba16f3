//! Business constraints: budget, headcount, regulatory, technical, time.

use serde::{Deserialize, Serialize};

/// Category of a business constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintCategory {
    Budget,
    Headcount,
    Regulatory,
    Technical,
    Time,
}

impl std::fmt::Display for ConstraintCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstraintCategory::Budget => write!(f, "budget"),
            ConstraintCategory::Headcount => write!(f, "headcount"),
            ConstraintCategory::Regulatory => write!(f, "regulatory"),
            ConstraintCategory::Technical => write!(f, "technical"),
            ConstraintCategory::Time => write!(f, "time"),
        }
    }
}

/// A business constraint with a limit and tracked usage.
///
/// A hard-limited constraint can never have its usage committed above the
/// limit; a soft one can be exceeded with approval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Constraint {
    pub id: String,
    pub category: ConstraintCategory,
    pub description: String,
    pub limit_value: f64,
    pub current_usage: f64,
    pub unit: String,
    pub hard_limit: bool,
    pub owner: String,
}

impl Constraint {
    pub fn new(
        id: impl Into<String>,
        category: ConstraintCategory,
        description: impl Into<String>,
        limit_value: f64,
        current_usage: f64,
        unit: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            description: description.into(),
            limit_value,
            current_usage,
            unit: unit.into(),
            hard_limit: false,
            owner: owner.into(),
        }
    }

    pub fn hard(mut self) -> Self {
        self.hard_limit = true;
        self
    }

    /// Remaining headroom under the limit.
    pub fn available(&self) -> f64 {
        self.limit_value - self.current_usage
    }

    /// Whether committing `new_usage` would violate a hard limit.
    pub fn would_violate(&self, new_usage: f64) -> bool {
        self.hard_limit && new_usage > self.limit_value
    }
}
