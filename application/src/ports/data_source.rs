//! Enterprise data port.
//!
//! Read-only query surface workers cite figures from. Every numeric
//! claim in a worker output traces to one of these calls, recorded as a
//! data access in the audit trail.

use serde::{Deserialize, Serialize};

/// Budget position of one department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentBudget {
    pub department: String,
    pub annual_budget: f64,
    pub spent_to_date: f64,
}

impl DepartmentBudget {
    pub fn remaining(&self) -> f64 {
        self.annual_budget - self.spent_to_date
    }
}

/// Aggregate customer base metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub total_customers: u64,
    pub retention_rate: f64,
    pub churn_rate: f64,
    pub nps: f64,
    pub high_risk_customers: u64,
    pub critical_risk_customers: u64,
    pub at_risk_revenue: f64,
    pub avg_cac: f64,
}

/// Aggregate support ticket metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketSummary {
    pub total_tickets: u64,
    pub open_tickets: u64,
    pub avg_resolution_hours: f64,
    pub avg_satisfaction: f64,
    pub escalation_rate: f64,
    pub churn_signal_count: u64,
    pub billing_disputes: u64,
    pub claims_complaints: u64,
}

/// Read-only enterprise data surface.
pub trait EnterpriseData: Send + Sync {
    fn budget_status(&self) -> Vec<DepartmentBudget>;
    fn customer_summary(&self) -> CustomerSummary;
    fn ticket_summary(&self) -> TicketSummary;
}
