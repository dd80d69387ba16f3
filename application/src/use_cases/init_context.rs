//! Seed the shared store with the default goals and constraints.

use chrono::{Duration, Utc};
use consilium_domain::{Constraint, ConstraintCategory, Goal, KeyResult};
use tracing::info;

use crate::ports::state_store::StateStore;

/// One department's seeded budget constraint.
#[derive(Debug, Clone)]
pub struct BudgetSeed {
    pub department: String,
    pub limit: f64,
    pub spent: f64,
}

impl BudgetSeed {
    pub fn new(department: impl Into<String>, limit: f64, spent: f64) -> Self {
        Self {
            department: department.into(),
            limit,
            spent,
        }
    }
}

/// Initial goals and constraints loaded at startup.
#[derive(Debug, Clone)]
pub struct SeedContext {
    pub goal: Goal,
    pub budgets: Vec<BudgetSeed>,
}

impl SeedContext {
    /// The reference scenario: a retention goal plus six department
    /// budgets, each half spent at the start of the planning window.
    pub fn reference() -> Self {
        let goal = Goal::new(
            "GOAL-001",
            "Improve customer retention rate",
            0.92,
            0.84,
            "percentage",
            Utc::now() + Duration::days(90),
            "chief-executive",
        )
        .with_workers(vec![
            "sales".to_string(),
            "marketing".to_string(),
            "support".to_string(),
            "operations".to_string(),
        ])
        .with_key_results(vec![
            KeyResult::new("Reduce churn rate", 0.08, 0.16),
            KeyResult::new("Improve NPS", 45.0, 32.0),
        ]);

        let departments: [(&str, f64); 6] = [
            ("marketing", 8_000_000.0),
            ("sales", 5_000_000.0),
            ("operations", 12_000_000.0),
            ("support", 6_000_000.0),
            ("hr", 2_000_000.0),
            ("technology", 10_000_000.0),
        ];
        let budgets = departments
            .iter()
            .map(|(dept, limit)| BudgetSeed::new(*dept, *limit, limit * 0.5))
            .collect();

        Self { goal, budgets }
    }
}

/// Write the seed context into the store. Budget constraints follow the
/// `budget-<department>` id convention the conflict snapshot relies on.
pub fn seed_context(store: &dyn StateStore, seed: &SeedContext) {
    store.add_goal(seed.goal.clone());

    for budget in &seed.budgets {
        let constraint = Constraint::new(
            format!("budget-{}", budget.department),
            ConstraintCategory::Budget,
            format!("{} department budget", budget.department),
            budget.limit,
            budget.spent,
            "USD",
            "cfo",
        );
        store.add_constraint(constraint);
    }

    info!(
        goal = %seed.goal.id,
        budgets = seed.budgets.len(),
        "Seeded shared context"
    );
}
