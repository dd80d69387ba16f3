//! Governance engine: permission table, approval workflow, escalation
//! rules.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use consilium_application::ports::governance::Governance;
use consilium_domain::{
    ActionCategory, ApprovalRequest, ApprovalStatus, ApprovalSummary, AuthorityLevel,
    AutoApprovalLimits, DomainError, EscalationPolicy, EscalationTrigger, PermissionDecision,
    PermissionProfile, RequestId, WorkerOutput,
};
use tracing::{debug, info};

const EXECUTIVE: &str = "chief-executive";

/// Permission table plus approval request registry.
pub struct GovernanceEngine {
    profiles: HashMap<String, PermissionProfile>,
    limits: AutoApprovalLimits,
    policy: EscalationPolicy,
    requests: Mutex<Vec<ApprovalRequest>>,
    counter: AtomicU64,
}

impl Default for GovernanceEngine {
    fn default() -> Self {
        Self::new(AutoApprovalLimits::default(), EscalationPolicy::default())
    }
}

impl GovernanceEngine {
    pub fn new(limits: AutoApprovalLimits, policy: EscalationPolicy) -> Self {
        Self {
            profiles: default_profiles(),
            limits,
            policy,
            requests: Mutex::new(Vec::new()),
            counter: AtomicU64::new(0),
        }
    }

    /// Override or add a worker's permission profile.
    pub fn with_profile(mut self, worker: impl Into<String>, profile: PermissionProfile) -> Self {
        self.profiles.insert(worker.into(), profile);
        self
    }

    fn next_id(&self) -> RequestId {
        RequestId(self.counter.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn transition<F>(&self, id: RequestId, apply: F) -> Result<ApprovalRequest, DomainError>
    where
        F: FnOnce(&mut ApprovalRequest) -> Result<(), DomainError>,
    {
        let mut requests = self.requests.lock().expect("governance lock poisoned");
        let request = requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| DomainError::UnknownRequest(id.to_string()))?;
        apply(request)?;
        Ok(request.clone())
    }
}

/// Default authority boundaries for the orchestrator and the six
/// functional workers.
fn default_profiles() -> HashMap<String, PermissionProfile> {
    let mut profiles = HashMap::new();
    profiles.insert(
        "orchestrator".to_string(),
        PermissionProfile::new(AuthorityLevel::Approve)
            .approving(vec![
                ActionCategory::Budget,
                ActionCategory::Hiring,
                ActionCategory::PolicyChange,
                ActionCategory::Strategy,
            ])
            .with_spending_limit(f64::INFINITY)
            .with_hiring_limit(u32::MAX),
    );
    profiles.insert(
        "sales".to_string(),
        PermissionProfile::new(AuthorityLevel::Act)
            .approving(vec![ActionCategory::Discount])
            .with_spending_limit(25_000.0)
            .with_hiring_limit(2),
    );
    profiles.insert(
        "marketing".to_string(),
        PermissionProfile::new(AuthorityLevel::Act)
            .approving(vec![ActionCategory::Campaign])
            .with_spending_limit(100_000.0)
            .with_hiring_limit(1),
    );
    profiles.insert(
        "finance".to_string(),
        PermissionProfile::new(AuthorityLevel::Recommend)
            .approving(vec![ActionCategory::Budget]),
    );
    profiles.insert(
        "operations".to_string(),
        PermissionProfile::new(AuthorityLevel::Act)
            .approving(vec![ActionCategory::VendorContract])
            .with_spending_limit(25_000.0)
            .with_hiring_limit(5),
    );
    profiles.insert(
        "support".to_string(),
        PermissionProfile::new(AuthorityLevel::Recommend)
            .approving(vec![ActionCategory::Refund])
            .with_spending_limit(500.0),
    );
    profiles.insert(
        "hiring".to_string(),
        PermissionProfile::new(AuthorityLevel::Act).approving(vec![ActionCategory::Hiring]),
    );
    profiles
}

impl Governance for GovernanceEngine {
    fn profile(&self, worker: &str) -> Option<PermissionProfile> {
        self.profiles.get(worker).cloned()
    }

    fn check_permission(
        &self,
        worker: &str,
        action: &str,
        amount: Option<f64>,
    ) -> PermissionDecision {
        let Some(profile) = self.profiles.get(worker) else {
            return PermissionDecision::needs_approval(
                EXECUTIVE,
                format!("No permission profile for {worker}"),
            );
        };

        if let Some(amount) = amount
            && amount > profile.spending_limit
        {
            return PermissionDecision::needs_approval(
                EXECUTIVE,
                format!(
                    "Amount ${amount:.0} exceeds spending limit ${:.0}",
                    profile.spending_limit
                ),
            );
        }

        let Some(category) = ActionCategory::for_action(action) else {
            return PermissionDecision::needs_approval(
                EXECUTIVE,
                format!("No governance category for action {action}"),
            );
        };

        if !profile.may_approve(category) {
            return PermissionDecision::needs_approval(
                EXECUTIVE,
                format!("Worker does not have {category} permission"),
            );
        }

        if self.limits.auto_approves(category, amount) {
            let limit = self.limits.limit_for(category).unwrap_or_default();
            return PermissionDecision::auto_approved(format!(
                "Under auto-approval threshold of {limit:.0}"
            ));
        }

        PermissionDecision::allowed("Worker has authority")
    }

    fn request_approval(
        &self,
        requester: &str,
        category: ActionCategory,
        description: &str,
        amount: Option<f64>,
        details: serde_json::Value,
    ) -> ApprovalRequest {
        let id = self.next_id();
        let request = if self.limits.auto_approves(category, amount) {
            debug!(%id, requester, "Request auto-approved under threshold");
            ApprovalRequest::auto_approved(id, requester, category, description, amount, details)
        } else {
            info!(%id, requester, %category, "Approval request pending");
            ApprovalRequest::pending(
                id, requester, EXECUTIVE, category, description, amount, details,
            )
        };
        self.requests
            .lock()
            .expect("governance lock poisoned")
            .push(request.clone());
        request
    }

    fn approve(
        &self,
        id: RequestId,
        approver: &str,
        conditions: Vec<String>,
    ) -> Result<ApprovalRequest, DomainError> {
        self.transition(id, |request| request.approve(approver, conditions))
    }

    fn reject(
        &self,
        id: RequestId,
        approver: &str,
        reason: &str,
    ) -> Result<ApprovalRequest, DomainError> {
        self.transition(id, |request| request.reject(approver, reason))
    }

    fn escalate(&self, id: RequestId, reason: &str) -> Result<ApprovalRequest, DomainError> {
        self.transition(id, |request| request.escalate(reason))
    }

    fn pending_requests(&self) -> Vec<ApprovalRequest> {
        self.requests
            .lock()
            .expect("governance lock poisoned")
            .iter()
            .filter(|r| r.status == ApprovalStatus::Pending)
            .cloned()
            .collect()
    }

    fn approval_summary(&self) -> ApprovalSummary {
        ApprovalSummary::from_requests(
            self.requests
                .lock()
                .expect("governance lock poisoned")
                .iter(),
        )
    }

    fn should_escalate(&self, output: &WorkerOutput) -> Option<EscalationTrigger> {
        self.policy.evaluate(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_approval_strictly_below_threshold() {
        let engine = GovernanceEngine::default();

        let under = engine.request_approval(
            "marketing",
            ActionCategory::Budget,
            "Small tooling spend",
            Some(49_999.99),
            serde_json::json!({}),
        );
        assert_eq!(under.status, ApprovalStatus::AutoApproved);

        // The boundary amount must NOT auto-approve.
        let at = engine.request_approval(
            "marketing",
            ActionCategory::Budget,
            "Threshold spend",
            Some(50_000.0),
            serde_json::json!({}),
        );
        assert_eq!(at.status, ApprovalStatus::Pending);
        assert_eq!(at.approver, EXECUTIVE);
    }

    #[test]
    fn test_lifecycle_is_one_shot() {
        let engine = GovernanceEngine::default();
        let request = engine.request_approval(
            "marketing",
            ActionCategory::Budget,
            "Retention campaign",
            Some(850_000.0),
            serde_json::json!({}),
        );

        let approved = engine
            .approve(request.id, EXECUTIVE, vec!["monthly review".to_string()])
            .unwrap();
        assert_eq!(approved.status, ApprovalStatus::Approved);

        assert!(matches!(
            engine.reject(request.id, EXECUTIVE, "late"),
            Err(DomainError::RequestAlreadyClosed(_))
        ));
        assert!(matches!(
            engine.escalate(RequestId(42), "unknown"),
            Err(DomainError::UnknownRequest(_))
        ));
        assert!(engine.pending_requests().is_empty());
    }

    #[test]
    fn test_spending_limit_denies_first() {
        let engine = GovernanceEngine::default();
        let decision = engine.check_permission("sales", "discount", Some(30_000.0));
        assert!(!decision.allowed);
        assert!(decision.requires_approval);
        assert!(decision.reason.contains("spending limit"));
    }

    #[test]
    fn test_unapprovable_category_needs_executive() {
        let engine = GovernanceEngine::default();
        let decision = engine.check_permission("sales", "budget_request", Some(10_000.0));
        assert!(!decision.allowed);
        assert_eq!(decision.approver.as_deref(), Some(EXECUTIVE));
    }

    #[test]
    fn test_approvable_category_auto_approves_under_threshold() {
        let engine = GovernanceEngine::default();
        // Within operations' spending limit and under the vendor-contract
        // auto-approval threshold.
        let decision = engine.check_permission("operations", "vendor_contract", Some(20_000.0));
        assert!(decision.allowed);
        assert!(decision.auto_approved);

        // Campaign has no auto-approval threshold; authority alone decides.
        let decision = engine.check_permission("marketing", "campaign_launch", Some(80_000.0));
        assert!(decision.allowed);
        assert!(!decision.auto_approved);
    }

    #[test]
    fn test_summary_counts_statuses() {
        let engine = GovernanceEngine::default();
        engine.request_approval(
            "support",
            ActionCategory::Budget,
            "small",
            Some(1_000.0),
            serde_json::json!({}),
        );
        engine.request_approval(
            "marketing",
            ActionCategory::Budget,
            "large",
            Some(900_000.0),
            serde_json::json!({}),
        );

        let summary = engine.approval_summary();
        assert_eq!(summary.total_requests, 2);
        assert_eq!(summary.auto_approved, 1);
        assert_eq!(summary.pending, 1);
    }
}
