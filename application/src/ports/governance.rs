//! Governance port: permission checks, approvals, escalation rules.

use consilium_domain::{
    ActionCategory, ApprovalRequest, ApprovalSummary, DomainError, EscalationTrigger,
    PermissionDecision, PermissionProfile, RequestId, WorkerOutput,
};

/// Permission table plus the approval request lifecycle.
pub trait Governance: Send + Sync {
    fn profile(&self, worker: &str) -> Option<PermissionProfile>;

    /// Check whether a worker may take an action. Denies when the amount
    /// exceeds the worker's spending limit; otherwise maps the action to
    /// a category, checks the approvable set and applies the category's
    /// auto-approval threshold before requiring executive approval.
    fn check_permission(
        &self,
        worker: &str,
        action: &str,
        amount: Option<f64>,
    ) -> PermissionDecision;

    /// Create a request; resolves immediately to auto-approved when the
    /// amount is strictly under the category threshold.
    fn request_approval(
        &self,
        requester: &str,
        category: ActionCategory,
        description: &str,
        amount: Option<f64>,
        details: serde_json::Value,
    ) -> ApprovalRequest;

    fn approve(
        &self,
        id: RequestId,
        approver: &str,
        conditions: Vec<String>,
    ) -> Result<ApprovalRequest, DomainError>;

    fn reject(
        &self,
        id: RequestId,
        approver: &str,
        reason: &str,
    ) -> Result<ApprovalRequest, DomainError>;

    fn escalate(&self, id: RequestId, reason: &str) -> Result<ApprovalRequest, DomainError>;

    fn pending_requests(&self) -> Vec<ApprovalRequest>;

    fn approval_summary(&self) -> ApprovalSummary;

    /// First escalation rule an output trips, if any.
    fn should_escalate(&self, output: &WorkerOutput) -> Option<EscalationTrigger>;
}
