//! Configuration file schema.
//!
//! Every section defaults to the reference policy values, so an empty
//! (or missing) config file yields the same behavior as the defaults
//! compiled into the domain types.

use consilium_application::use_cases::init_context::{BudgetSeed, SeedContext};
use consilium_domain::{AutoApprovalLimits, ConflictPolicy, EscalationPolicy};
use serde::{Deserialize, Serialize};

/// Escalation thresholds section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EscalationSection {
    pub min_confidence: f64,
    pub budget_ceiling: f64,
    pub headcount_ceiling: u32,
    pub max_departments: usize,
}

impl Default for EscalationSection {
    fn default() -> Self {
        let policy = EscalationPolicy::default();
        Self {
            min_confidence: policy.min_confidence,
            budget_ceiling: policy.budget_ceiling,
            headcount_ceiling: policy.headcount_ceiling,
            max_departments: policy.max_departments,
        }
    }
}

/// Auto-approval thresholds section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApprovalSection {
    pub budget: f64,
    pub hiring: f64,
    pub vendor_contract: f64,
}

impl Default for ApprovalSection {
    fn default() -> Self {
        let limits = AutoApprovalLimits::default();
        Self {
            budget: limits.budget,
            hiring: limits.hiring,
            vendor_contract: limits.vendor_contract,
        }
    }
}

/// Conflict detection section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConflictSection {
    pub resource_availability: f64,
}

impl Default for ConflictSection {
    fn default() -> Self {
        Self {
            resource_availability: ConflictPolicy::default().resource_availability,
        }
    }
}

/// One seeded department budget. Spent defaults to half the limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetSeedEntry {
    pub department: String,
    pub limit: f64,
    #[serde(default)]
    pub spent: Option<f64>,
}

/// Seeded context section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedSection {
    pub budgets: Vec<BudgetSeedEntry>,
}

impl Default for SeedSection {
    fn default() -> Self {
        Self {
            budgets: SeedContext::reference()
                .budgets
                .into_iter()
                .map(|b| BudgetSeedEntry {
                    department: b.department,
                    limit: b.limit,
                    spent: Some(b.spent),
                })
                .collect(),
        }
    }
}

/// Root configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub escalation: EscalationSection,
    pub approvals: ApprovalSection,
    pub conflict: ConflictSection,
    pub seed: SeedSection,
}

impl FileConfig {
    pub fn escalation_policy(&self) -> EscalationPolicy {
        EscalationPolicy {
            min_confidence: self.escalation.min_confidence,
            budget_ceiling: self.escalation.budget_ceiling,
            headcount_ceiling: self.escalation.headcount_ceiling,
            max_departments: self.escalation.max_departments,
        }
    }

    pub fn auto_approval_limits(&self) -> AutoApprovalLimits {
        AutoApprovalLimits {
            budget: self.approvals.budget,
            hiring: self.approvals.hiring,
            vendor_contract: self.approvals.vendor_contract,
        }
    }

    pub fn conflict_policy(&self) -> ConflictPolicy {
        ConflictPolicy {
            resource_availability: self.conflict.resource_availability,
        }
    }

    /// Seed context with the configured budgets over the reference goal.
    pub fn seed_context(&self) -> SeedContext {
        let mut seed = SeedContext::reference();
        seed.budgets = self
            .seed
            .budgets
            .iter()
            .map(|b| BudgetSeed::new(&b.department, b.limit, b.spent.unwrap_or(b.limit * 0.5)))
            .collect();
        seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_domain_policies() {
        let config = FileConfig::default();
        assert_eq!(config.escalation_policy().min_confidence, 0.60);
        assert_eq!(config.auto_approval_limits().budget, 50_000.0);
        assert_eq!(config.conflict_policy().resource_availability, 3.0);
        assert_eq!(config.seed_context().budgets.len(), 6);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config: FileConfig = toml::from_str(
            r#"
            [escalation]
            budget_ceiling = 750000.0

            [[seed.budgets]]
            department = "marketing"
            limit = 1000000.0
            "#,
        )
        .unwrap();

        assert_eq!(config.escalation.budget_ceiling, 750_000.0);
        // Untouched fields keep their defaults.
        assert_eq!(config.escalation.min_confidence, 0.60);

        let seed = config.seed_context();
        assert_eq!(seed.budgets.len(), 1);
        assert_eq!(seed.budgets[0].spent, 500_000.0);
    }
}
