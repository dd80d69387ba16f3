//! Worker permission profiles and auto-approval thresholds.

use serde::{Deserialize, Serialize};

/// Authority level of a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorityLevel {
    /// Can access data.
    Read,
    /// Can make recommendations.
    Recommend,
    /// Can take actions within limits.
    Act,
    /// Can approve requests.
    Approve,
}

/// Governance category an action falls under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCategory {
    Budget,
    Hiring,
    VendorContract,
    Campaign,
    Discount,
    Refund,
    PolicyChange,
    Strategy,
}

impl ActionCategory {
    /// Map a free-form action name to its governance category.
    pub fn for_action(action: &str) -> Option<Self> {
        match action {
            "budget_request" | "budget_reallocation" => Some(ActionCategory::Budget),
            "hiring_request" | "headcount_request" => Some(ActionCategory::Hiring),
            "vendor_contract" => Some(ActionCategory::VendorContract),
            "campaign_launch" => Some(ActionCategory::Campaign),
            "discount" => Some(ActionCategory::Discount),
            "refund" => Some(ActionCategory::Refund),
            "policy_change" => Some(ActionCategory::PolicyChange),
            "strategy" => Some(ActionCategory::Strategy),
            _ => None,
        }
    }
}

impl std::fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ActionCategory::Budget => "budget",
            ActionCategory::Hiring => "hiring",
            ActionCategory::VendorContract => "vendor_contract",
            ActionCategory::Campaign => "campaign",
            ActionCategory::Discount => "discount",
            ActionCategory::Refund => "refund",
            ActionCategory::PolicyChange => "policy_change",
            ActionCategory::Strategy => "strategy",
        };
        f.write_str(s)
    }
}

/// What a single worker is allowed to do on its own authority.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionProfile {
    pub level: AuthorityLevel,
    /// Categories the worker may approve unilaterally.
    pub approvable: Vec<ActionCategory>,
    pub spending_limit: f64,
    pub hiring_limit: u32,
}

impl PermissionProfile {
    pub fn new(level: AuthorityLevel) -> Self {
        Self {
            level,
            approvable: Vec::new(),
            spending_limit: 0.0,
            hiring_limit: 0,
        }
    }

    pub fn approving(mut self, categories: Vec<ActionCategory>) -> Self {
        self.approvable = categories;
        self
    }

    pub fn with_spending_limit(mut self, limit: f64) -> Self {
        self.spending_limit = limit;
        self
    }

    pub fn with_hiring_limit(mut self, limit: u32) -> Self {
        self.hiring_limit = limit;
        self
    }

    pub fn may_approve(&self, category: ActionCategory) -> bool {
        self.approvable.contains(&category)
    }
}

/// Per-category amounts below which a request approves itself.
///
/// Auto-approval is strictly below the threshold: a request at exactly
/// the limit still needs a human.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoApprovalLimits {
    pub budget: f64,
    pub hiring: f64,
    pub vendor_contract: f64,
}

impl Default for AutoApprovalLimits {
    fn default() -> Self {
        Self {
            budget: 50_000.0,
            hiring: 3.0,
            vendor_contract: 25_000.0,
        }
    }
}

impl AutoApprovalLimits {
    pub fn limit_for(&self, category: ActionCategory) -> Option<f64> {
        match category {
            ActionCategory::Budget => Some(self.budget),
            ActionCategory::Hiring => Some(self.hiring),
            ActionCategory::VendorContract => Some(self.vendor_contract),
            _ => None,
        }
    }

    pub fn auto_approves(&self, category: ActionCategory, amount: Option<f64>) -> bool {
        match (self.limit_for(category), amount) {
            (Some(limit), Some(amount)) => amount < limit,
            _ => false,
        }
    }
}

/// Result of a permission check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionDecision {
    pub allowed: bool,
    pub requires_approval: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approver: Option<String>,
    #[serde(default)]
    pub auto_approved: bool,
    pub reason: String,
}

impl PermissionDecision {
    pub fn allowed(reason: impl Into<String>) -> Self {
        Self {
            allowed: true,
            requires_approval: false,
            approver: None,
            auto_approved: false,
            reason: reason.into(),
        }
    }

    pub fn auto_approved(reason: impl Into<String>) -> Self {
        Self {
            auto_approved: true,
            ..Self::allowed(reason)
        }
    }

    pub fn needs_approval(approver: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            requires_approval: true,
            approver: Some(approver.into()),
            auto_approved: false,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_mapping() {
        assert_eq!(
            ActionCategory::for_action("budget_request"),
            Some(ActionCategory::Budget)
        );
        assert_eq!(
            ActionCategory::for_action("campaign_launch"),
            Some(ActionCategory::Campaign)
        );
        assert_eq!(ActionCategory::for_action("unknown_action"), None);
    }

    #[test]
    fn test_auto_approval_strictly_below_threshold() {
        let limits = AutoApprovalLimits::default();
        assert!(limits.auto_approves(ActionCategory::Budget, Some(49_999.99)));
        // Exactly at the threshold must NOT auto-approve.
        assert!(!limits.auto_approves(ActionCategory::Budget, Some(50_000.0)));
        assert!(!limits.auto_approves(ActionCategory::Budget, Some(50_000.01)));
        assert!(!limits.auto_approves(ActionCategory::Budget, None));
        // No threshold for policy changes.
        assert!(!limits.auto_approves(ActionCategory::PolicyChange, Some(1.0)));
    }

    #[test]
    fn test_profile_approvable() {
        let profile = PermissionProfile::new(AuthorityLevel::Act)
            .approving(vec![ActionCategory::Campaign])
            .with_spending_limit(100_000.0);
        assert!(profile.may_approve(ActionCategory::Campaign));
        assert!(!profile.may_approve(ActionCategory::Budget));
    }
}
