//! Approval request lifecycle.
//!
//! A request is created `Pending` (or `AutoApproved` when under the
//! category threshold) and then transitions exactly once to a terminal
//! state. Nothing re-opens after that.

use crate::core::error::DomainError;
use crate::core::id::RequestId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::permissions::ActionCategory;

/// Status of an approval request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
    Escalated,
    AutoApproved,
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
            ApprovalStatus::Escalated => "escalated",
            ApprovalStatus::AutoApproved => "auto_approved",
        };
        f.write_str(s)
    }
}

/// A request for approval of an action a worker cannot authorize alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalRequest {
    pub id: RequestId,
    pub requester: String,
    pub approver: String,
    pub category: ActionCategory,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    pub details: serde_json::Value,
    pub status: ApprovalStatus,
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalation_reason: Option<String>,
}

impl ApprovalRequest {
    pub fn pending(
        id: RequestId,
        requester: impl Into<String>,
        approver: impl Into<String>,
        category: ActionCategory,
        description: impl Into<String>,
        amount: Option<f64>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            id,
            requester: requester.into(),
            approver: approver.into(),
            category,
            description: description.into(),
            amount,
            details,
            status: ApprovalStatus::Pending,
            conditions: Vec::new(),
            rejection_reason: None,
            escalation_reason: None,
        }
    }

    pub fn auto_approved(
        id: RequestId,
        requester: impl Into<String>,
        category: ActionCategory,
        description: impl Into<String>,
        amount: Option<f64>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            status: ApprovalStatus::AutoApproved,
            ..Self::pending(id, requester, "system", category, description, amount, details)
        }
    }

    /// Whether the request has reached a terminal state.
    pub fn is_closed(&self) -> bool {
        self.status != ApprovalStatus::Pending
    }

    fn ensure_open(&self) -> Result<(), DomainError> {
        if self.is_closed() {
            Err(DomainError::RequestAlreadyClosed(self.id.to_string()))
        } else {
            Ok(())
        }
    }

    pub fn approve(
        &mut self,
        approver: impl Into<String>,
        conditions: Vec<String>,
    ) -> Result<(), DomainError> {
        self.ensure_open()?;
        self.status = ApprovalStatus::Approved;
        self.approver = approver.into();
        self.conditions.extend(conditions);
        Ok(())
    }

    pub fn reject(
        &mut self,
        approver: impl Into<String>,
        reason: impl Into<String>,
    ) -> Result<(), DomainError> {
        self.ensure_open()?;
        self.status = ApprovalStatus::Rejected;
        self.approver = approver.into();
        self.rejection_reason = Some(reason.into());
        Ok(())
    }

    pub fn escalate(&mut self, reason: impl Into<String>) -> Result<(), DomainError> {
        self.ensure_open()?;
        self.status = ApprovalStatus::Escalated;
        self.approver = "chief-executive".to_string();
        self.escalation_reason = Some(reason.into());
        Ok(())
    }
}

/// Counts of approval requests by status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApprovalSummary {
    pub total_requests: usize,
    pub by_status: BTreeMap<String, usize>,
    pub pending: usize,
    pub auto_approved: usize,
}

impl ApprovalSummary {
    pub fn from_requests<'a>(requests: impl IntoIterator<Item = &'a ApprovalRequest>) -> Self {
        let mut summary = ApprovalSummary::default();
        for request in requests {
            summary.total_requests += 1;
            *summary
                .by_status
                .entry(request.status.to_string())
                .or_default() += 1;
            match request.status {
                ApprovalStatus::Pending => summary.pending += 1,
                ApprovalStatus::AutoApproved => summary.auto_approved += 1,
                _ => {}
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ApprovalRequest {
        ApprovalRequest::pending(
            RequestId(1),
            "marketing",
            "chief-executive",
            ActionCategory::Budget,
            "Retention campaign budget",
            Some(850_000.0),
            serde_json::json!({}),
        )
    }

    #[test]
    fn test_approve_is_terminal() {
        let mut req = request();
        req.approve("chief-executive", vec!["monthly ROI review".to_string()])
            .unwrap();
        assert_eq!(req.status, ApprovalStatus::Approved);
        assert_eq!(req.conditions, vec!["monthly ROI review"]);

        // Any further transition fails.
        assert!(req.reject("cfo", "too expensive").is_err());
        assert!(req.escalate("second thoughts").is_err());
        assert!(req.approve("cfo", Vec::new()).is_err());
    }

    #[test]
    fn test_reject_records_reason() {
        let mut req = request();
        req.reject("chief-executive", "Budget cycle closed").unwrap();
        assert_eq!(req.status, ApprovalStatus::Rejected);
        assert_eq!(req.rejection_reason.as_deref(), Some("Budget cycle closed"));
    }

    #[test]
    fn test_escalate_reassigns_approver() {
        let mut req = request();
        req.escalate("Cross-department impact").unwrap();
        assert_eq!(req.status, ApprovalStatus::Escalated);
        assert_eq!(req.approver, "chief-executive");
    }

    #[test]
    fn test_auto_approved_is_closed() {
        let req = ApprovalRequest::auto_approved(
            RequestId(2),
            "support",
            ActionCategory::Budget,
            "Tooling spend",
            Some(10_000.0),
            serde_json::json!({}),
        );
        assert!(req.is_closed());
        assert_eq!(req.approver, "system");
    }

    #[test]
    fn test_summary_counts() {
        let mut approved = request();
        approved.approve("ceo", Vec::new()).unwrap();
        let requests = vec![request(), approved];
        let summary = ApprovalSummary::from_requests(&requests);
        assert_eq!(summary.total_requests, 2);
        assert_eq!(summary.pending, 1);
        assert_eq!(summary.by_status["approved"], 1);
    }
}
