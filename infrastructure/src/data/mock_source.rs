//! Fixed-figure enterprise data source.
//!
//! Stands in for the real warehouse with a realistic, deterministic
//! snapshot so worker outputs (and their citations) are reproducible.

use consilium_application::ports::data_source::{
    CustomerSummary, DepartmentBudget, EnterpriseData, TicketSummary,
};

/// Deterministic mock of the enterprise data surface.
#[derive(Debug, Clone, Default)]
pub struct MockEnterpriseData;

impl MockEnterpriseData {
    pub fn new() -> Self {
        Self
    }
}

impl EnterpriseData for MockEnterpriseData {
    fn budget_status(&self) -> Vec<DepartmentBudget> {
        let budgets: [(&str, f64); 6] = [
            ("marketing", 8_000_000.0),
            ("sales", 5_000_000.0),
            ("operations", 12_000_000.0),
            ("support", 6_000_000.0),
            ("hr", 2_000_000.0),
            ("technology", 10_000_000.0),
        ];
        budgets
            .iter()
            .map(|(department, annual)| DepartmentBudget {
                department: department.to_string(),
                annual_budget: *annual,
                spent_to_date: annual * 0.5,
            })
            .collect()
    }

    fn customer_summary(&self) -> CustomerSummary {
        CustomerSummary {
            total_customers: 50_000,
            retention_rate: 0.84,
            churn_rate: 0.16,
            nps: 32.0,
            high_risk_customers: 1_240,
            critical_risk_customers: 310,
            at_risk_revenue: 8_600_000.0,
            avg_cac: 385.0,
        }
    }

    fn ticket_summary(&self) -> TicketSummary {
        TicketSummary {
            total_tickets: 12_400,
            open_tickets: 1_850,
            avg_resolution_hours: 18.5,
            avg_satisfaction: 3.4,
            escalation_rate: 0.12,
            churn_signal_count: 420,
            billing_disputes: 1_900,
            claims_complaints: 1_450,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_remaining() {
        let data = MockEnterpriseData::new();
        let budgets = data.budget_status();
        let marketing = budgets.iter().find(|b| b.department == "marketing").unwrap();
        assert_eq!(marketing.remaining(), 4_000_000.0);
    }

    #[test]
    fn test_figures_are_stable() {
        let data = MockEnterpriseData::new();
        assert_eq!(data.customer_summary().total_customers, 50_000);
        assert_eq!(data.ticket_summary().total_tickets, 12_400);
    }
}
