//! Conflict types and evidence.

use crate::state::Priority;
use crate::worker::output::StanceDirection;
use serde::{Deserialize, Serialize};

use super::resolve::Resolution;

/// Severity of a detected conflict.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// Kind of cross-worker conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    BudgetOverallocation,
    ResourceContention,
    StrategicMisalignment,
    TimelineConflict,
    DependencyUnmet,
    PriorityConflict,
}

impl std::fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ConflictKind::BudgetOverallocation => "budget_overallocation",
            ConflictKind::ResourceContention => "resource_contention",
            ConflictKind::StrategicMisalignment => "strategic_misalignment",
            ConflictKind::TimelineConflict => "timeline_conflict",
            ConflictKind::DependencyUnmet => "dependency_unmet",
            ConflictKind::PriorityConflict => "priority_conflict",
        };
        f.write_str(s)
    }
}

/// One worker's funding request within a department deficit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundingRequest {
    pub worker: String,
    pub amount: f64,
    pub purpose: String,
    pub priority: Priority,
}

/// A department whose summed requests exceed its available budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentDeficit {
    pub department: String,
    pub requested: f64,
    pub available: f64,
    pub shortfall: f64,
    pub requests: Vec<FundingRequest>,
}

/// A dependency declared by a worker with no matching deliverable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnmetDependency {
    pub worker: String,
    pub dependency: String,
}

/// One side of a strategic contradiction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StancePosition {
    pub worker: String,
    pub direction: StanceDirection,
    pub position: String,
}

/// Two workers pulling the same lever in opposite directions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contradiction {
    pub lever: String,
    pub first: StancePosition,
    pub second: StancePosition,
}

/// A worker's claim on a contended resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceClaim {
    pub worker: String,
    pub amount: f64,
    pub priority: Priority,
}

/// A resource requested beyond its availability by multiple workers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceContention {
    pub resource: String,
    pub total_requested: f64,
    pub availability: f64,
    pub claims: Vec<ResourceClaim>,
}

/// Raw evidence behind a detected conflict, typed per kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "evidence", rename_all = "snake_case")]
pub enum ConflictEvidence {
    Budget(Vec<DepartmentDeficit>),
    Timeline(Vec<UnmetDependency>),
    Strategic(Vec<Contradiction>),
    Resource(Vec<ResourceContention>),
}

/// A detected conflict between workers, optionally carrying its
/// resolution once processed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conflict {
    pub id: String,
    pub kind: ConflictKind,
    pub workers_involved: Vec<String>,
    pub description: String,
    pub evidence: ConflictEvidence,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Resolution>,
}

impl Conflict {
    pub fn is_resolved(&self) -> bool {
        self.resolution.as_ref().is_some_and(|r| r.resolved)
    }

    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(
            ConflictKind::StrategicMisalignment.to_string(),
            "strategic_misalignment"
        );
        assert_eq!(
            ConflictKind::BudgetOverallocation.to_string(),
            "budget_overallocation"
        );
    }
}
