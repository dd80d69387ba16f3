//! Aggregated audit reporting.

use super::record::DecisionRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary of a set of decision records: counts by kind and confidence
/// tier, mean confidence, approval and escalation totals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditReport {
    pub total_decisions: usize,
    pub by_kind: BTreeMap<String, usize>,
    pub by_confidence: BTreeMap<String, usize>,
    pub average_confidence: f64,
    pub pending_approvals: usize,
    pub escalated: usize,
    pub workers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_start: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_end: Option<DateTime<Utc>>,
}

impl AuditReport {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a DecisionRecord>) -> Self {
        let mut report = AuditReport::default();
        let mut confidence_sum = 0.0;
        let mut workers = std::collections::BTreeSet::new();

        for record in records {
            report.total_decisions += 1;
            *report.by_kind.entry(record.kind.to_string()).or_default() += 1;
            *report
                .by_confidence
                .entry(record.confidence_tier.to_string())
                .or_default() += 1;
            confidence_sum += record.confidence_score;
            if record.is_pending_approval() {
                report.pending_approvals += 1;
            }
            if record.escalated_to.is_some() {
                report.escalated += 1;
            }
            workers.insert(record.worker.clone());

            report.period_start = Some(
                report
                    .period_start
                    .map_or(record.timestamp, |s| s.min(record.timestamp)),
            );
            report.period_end = Some(
                report
                    .period_end
                    .map_or(record.timestamp, |e| e.max(record.timestamp)),
            );
        }

        if report.total_decisions > 0 {
            report.average_confidence = confidence_sum / report.total_decisions as f64;
        }
        report.workers = workers.into_iter().collect();
        report
    }
}
