//! Structured intent extracted from a directive's text.

use serde::{Deserialize, Serialize};

/// Primary objective recognized in a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    ImproveRetention,
    General,
}

/// Output shape of the intent parser. Any parser implementation,
/// pattern matching or model-backed, must produce this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedIntent {
    pub original_text: String,
    pub primary_objective: Objective,
    pub target_metric: String,
    pub target_value: f64,
    pub constraint: String,
    pub affected_workers: Vec<String>,
}

impl ParsedIntent {
    pub fn general(text: impl Into<String>, workers: Vec<String>) -> Self {
        Self {
            original_text: text.into(),
            primary_objective: Objective::General,
            target_metric: String::new(),
            target_value: 0.0,
            constraint: "None specified".to_string(),
            affected_workers: workers,
        }
    }
}
