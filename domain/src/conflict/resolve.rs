//! Resolution strategies, one per conflict kind.

use crate::state::Priority;
use serde::{Deserialize, Serialize};

use super::types::Contradiction;

/// Funding outcome for one request in a budget allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundingStatus {
    FullyFunded,
    PartiallyFunded,
    Unfunded,
}

/// One worker's slice of a priority-ordered budget allocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Allocation {
    pub worker: String,
    pub department: String,
    pub requested: f64,
    pub granted: f64,
    pub status: FundingStatus,
}

/// Structured detail of an applied resolution strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum ResolutionDetail {
    /// Budget allocated by priority until exhausted; any shortfall
    /// requires escalation.
    BudgetAllocation {
        allocations: Vec<Allocation>,
        shortfall: f64,
        requires_escalation: bool,
    },
    /// Contended resources scheduled sequentially by priority.
    SequentialScheduling,
    /// Timelines adjusted to respect dependency order.
    CriticalPathAdjustment,
    /// Competing priorities ranked by strategic impact.
    ImpactRanking,
    /// Competing strategic positions surfaced for a human decision.
    EscalateToHuman { positions: Vec<Contradiction> },
}

/// The outcome of applying a resolution strategy to one conflict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    pub resolved: bool,
    pub description: String,
    pub detail: ResolutionDetail,
}

/// Roll-up of a resolution pass over a conflict set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolutionSummary {
    pub entries: Vec<ResolutionEntry>,
    pub unresolved_count: usize,
}

/// One line of the resolution summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionEntry {
    pub conflict_id: String,
    pub resolved: bool,
    pub description: String,
}

/// Sort key for priority-ordered allocation: critical first.
pub(crate) fn priority_rank(priority: Priority) -> u8 {
    match priority {
        Priority::Critical => 0,
        Priority::High => 1,
        Priority::Medium => 2,
        Priority::Low => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_rank_order() {
        assert!(priority_rank(Priority::Critical) < priority_rank(Priority::High));
        assert!(priority_rank(Priority::High) < priority_rank(Priority::Medium));
        assert!(priority_rank(Priority::Medium) < priority_rank(Priority::Low));
    }
}
