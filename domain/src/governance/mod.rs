//! Governance domain: authority boundaries, approvals, escalation rules.

pub mod approval;
pub mod escalation;
pub mod permissions;

pub use approval::{ApprovalRequest, ApprovalStatus, ApprovalSummary};
pub use escalation::{EscalationPolicy, EscalationTrigger};
pub use permissions::{
    ActionCategory, AuthorityLevel, AutoApprovalLimits, PermissionDecision, PermissionProfile,
};
