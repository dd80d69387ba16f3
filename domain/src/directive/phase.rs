//! The per-directive state machine.
//!
//! Phases only move forward; `Finalized` is terminal and a run never
//! re-enters an earlier phase.

use crate::core::error::DomainError;
use crate::core::id::DirectiveId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Processing phase of a directive run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DirectivePhase {
    Received,
    IntentParsed,
    TasksDispatched,
    OutputsCollected,
    ConflictsResolved,
    GovernanceChecked,
    Finalized,
}

impl DirectivePhase {
    /// The phase that follows this one, if any.
    pub fn next(self) -> Option<DirectivePhase> {
        match self {
            DirectivePhase::Received => Some(DirectivePhase::IntentParsed),
            DirectivePhase::IntentParsed => Some(DirectivePhase::TasksDispatched),
            DirectivePhase::TasksDispatched => Some(DirectivePhase::OutputsCollected),
            DirectivePhase::OutputsCollected => Some(DirectivePhase::ConflictsResolved),
            DirectivePhase::ConflictsResolved => Some(DirectivePhase::GovernanceChecked),
            DirectivePhase::GovernanceChecked => Some(DirectivePhase::Finalized),
            DirectivePhase::Finalized => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == DirectivePhase::Finalized
    }
}

impl std::fmt::Display for DirectivePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DirectivePhase::Received => "received",
            DirectivePhase::IntentParsed => "intent_parsed",
            DirectivePhase::TasksDispatched => "tasks_dispatched",
            DirectivePhase::OutputsCollected => "outputs_collected",
            DirectivePhase::ConflictsResolved => "conflicts_resolved",
            DirectivePhase::GovernanceChecked => "governance_checked",
            DirectivePhase::Finalized => "finalized",
        };
        f.write_str(s)
    }
}

/// One directive moving through the state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectiveRun {
    pub id: DirectiveId,
    pub text: String,
    pub phase: DirectivePhase,
    pub started_at: DateTime<Utc>,
}

impl DirectiveRun {
    pub fn new(id: DirectiveId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            phase: DirectivePhase::Received,
            started_at: Utc::now(),
        }
    }

    /// Advance to the immediate successor phase.
    pub fn advance(&mut self) -> Result<DirectivePhase, DomainError> {
        match self.phase.next() {
            Some(next) => {
                self.phase = next;
                Ok(next)
            }
            None => Err(DomainError::InvalidPhaseTransition {
                from: self.phase.to_string(),
                to: "beyond finalized".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phases_advance_in_order() {
        let mut run = DirectiveRun::new(DirectiveId::from_sequence(1), "test directive");
        let expected = [
            DirectivePhase::IntentParsed,
            DirectivePhase::TasksDispatched,
            DirectivePhase::OutputsCollected,
            DirectivePhase::ConflictsResolved,
            DirectivePhase::GovernanceChecked,
            DirectivePhase::Finalized,
        ];
        for phase in expected {
            assert_eq!(run.advance().unwrap(), phase);
        }
        assert!(run.phase.is_terminal());
    }

    #[test]
    fn test_no_advance_past_finalized() {
        let mut run = DirectiveRun::new(DirectiveId::from_sequence(1), "test");
        while !run.phase.is_terminal() {
            run.advance().unwrap();
        }
        assert!(run.advance().is_err());
    }

    #[test]
    fn test_phase_ordering() {
        assert!(DirectivePhase::Received < DirectivePhase::Finalized);
        assert!(DirectivePhase::OutputsCollected < DirectivePhase::ConflictsResolved);
    }
}
