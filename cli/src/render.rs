//! Plain-text rendering of a decision package.

use consilium_domain::DecisionPackage;

const WIDTH: usize = 78;

fn rule(c: char) -> String {
    c.to_string().repeat(WIDTH)
}

fn section(lines: &mut Vec<String>, title: &str) {
    lines.push(String::new());
    lines.push(rule('-'));
    lines.push(title.to_string());
    lines.push(rule('-'));
}

/// Render the package for terminal display.
pub fn render(package: &DecisionPackage) -> String {
    let mut lines = vec![
        rule('='),
        "DECISION PACKAGE".to_string(),
        rule('='),
        format!("Directive: {}", package.directive_id),
        format!("Goal:      {}", package.strategic_goal),
        format!("Constraint: {}", package.constraint),
    ];

    section(&mut lines, "SUMMARY");
    lines.push(package.summary.clone());

    section(&mut lines, "STRATEGIC OPTIONS");
    for (i, option) in package.strategic_options.iter().enumerate() {
        lines.push(format!("{}. {}", i + 1, option.name));
        lines.push(format!("   {}", option.description));
        lines.push(format!(
            "   Investment: ${:.0} | Timeline: {} days | Headcount: {} FTE",
            option.investment, option.timeline_days, option.headcount
        ));
        lines.push(format!(
            "   Expected improvement: {} | Confidence: {:.0}%",
            option.expected_improvement,
            option.confidence * 100.0
        ));
        lines.push(format!("   Trade-offs: {}", option.trade_offs));
    }

    section(&mut lines, "BUDGET & HEADCOUNT");
    lines.push(format!(
        "Total investment: ${:.0}",
        package.budget_impact.total_investment
    ));
    for (department, budget) in &package.budget_impact.by_department {
        lines.push(format!("  - {department}: ${budget:.0}"));
    }
    lines.push(format!(
        "Total new hires: {} FTE",
        package.headcount_impact.total_new_hires
    ));
    for (department, count) in &package.headcount_impact.by_department {
        if *count > 0 {
            lines.push(format!("  - {department}: {count} FTE"));
        }
    }

    section(&mut lines, "KEY RISKS");
    for risk in package.risks.iter().take(5) {
        lines.push(format!("  ! {risk}"));
    }

    section(&mut lines, "SUCCESS METRICS");
    for kpi in &package.kpis {
        lines.push(format!(
            "  {}: {} -> {} ({})",
            kpi.name, kpi.current, kpi.target, kpi.measurement
        ));
    }

    section(&mut lines, "ALIGNMENT");
    lines.push(format!("Status: {}", package.alignment_status));
    for conflict in &package.unresolved_conflicts {
        lines.push(format!(
            "  Unresolved [{}] {}: {}",
            conflict.severity, conflict.kind, conflict.description
        ));
    }

    if !package.escalations.is_empty() {
        section(&mut lines, "REQUIRES EXECUTIVE ATTENTION");
        for escalation in &package.escalations {
            lines.push(format!("  {}: {}", escalation.worker, escalation.reason));
        }
    }

    section(&mut lines, "AUDIT");
    lines.push(format!(
        "Decisions: {} | Mean confidence: {:.0}% | Escalated: {}",
        package.audit_summary.total_decisions,
        package.audit_summary.average_confidence * 100.0,
        package.audit_summary.escalated
    ));

    lines.push(String::new());
    lines.push(rule('='));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use consilium_domain::{
        AlignmentStatus, AuditReport, BudgetImpact, DirectiveId, HeadcountImpact,
    };
    use std::collections::BTreeMap;

    fn package() -> DecisionPackage {
        DecisionPackage {
            directive_id: DirectiveId::from_sequence(1),
            strategic_goal: "Improve quarterly retention by 8%".to_string(),
            constraint: "No CAC increase allowed".to_string(),
            summary: "Summary".to_string(),
            strategic_options: Vec::new(),
            department_plans: BTreeMap::new(),
            budget_impact: BudgetImpact {
                total_investment: 1_000.0,
                by_department: BTreeMap::new(),
            },
            headcount_impact: HeadcountImpact {
                total_new_hires: 0,
                by_department: BTreeMap::new(),
            },
            risks: vec!["a risk".to_string()],
            assumptions: Vec::new(),
            dependencies: Vec::new(),
            kpis: Vec::new(),
            alignment_status: AlignmentStatus::Aligned,
            unresolved_conflicts: Vec::new(),
            escalations: Vec::new(),
            audit_summary: AuditReport::default(),
        }
    }

    #[test]
    fn test_render_contains_headline_fields() {
        let text = render(&package());
        assert!(text.contains("DECISION PACKAGE"));
        assert!(text.contains("DIR-000001"));
        assert!(text.contains("Status: ALIGNED"));
        assert!(text.contains("Total investment: $1000"));
    }

    #[test]
    fn test_escalation_section_omitted_when_empty() {
        let text = render(&package());
        assert!(!text.contains("REQUIRES EXECUTIVE ATTENTION"));
    }
}
