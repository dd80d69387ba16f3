//! Decision records: the immutable unit of the audit trail.
//!
//! A record never changes identity, decision text, rationale or hash after
//! creation. The only mutable fields are the outcome set, written once the
//! real-world result is known, and the obtained-approvals list.

use crate::core::id::{DirectiveId, RecordId};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Kind of decision a worker or the orchestrator can record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionKind {
    Recommendation,
    Approval,
    Rejection,
    Escalation,
    Allocation,
    Forecast,
    Strategy,
}

impl std::fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DecisionKind::Recommendation => "recommendation",
            DecisionKind::Approval => "approval",
            DecisionKind::Rejection => "rejection",
            DecisionKind::Escalation => "escalation",
            DecisionKind::Allocation => "allocation",
            DecisionKind::Forecast => "forecast",
            DecisionKind::Strategy => "strategy",
        };
        f.write_str(s)
    }
}

/// Confidence tier derived from the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ConfidenceTier {
    /// Fixed breakpoints: >=0.90 very high, >=0.80 high, >=0.65 medium,
    /// >=0.50 low, else very low.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.90 {
            ConfidenceTier::VeryHigh
        } else if score >= 0.80 {
            ConfidenceTier::High
        } else if score >= 0.65 {
            ConfidenceTier::Medium
        } else if score >= 0.50 {
            ConfidenceTier::Low
        } else {
            ConfidenceTier::VeryLow
        }
    }
}

impl std::fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ConfidenceTier::VeryLow => "very_low",
            ConfidenceTier::Low => "low",
            ConfidenceTier::Medium => "medium",
            ConfidenceTier::High => "high",
            ConfidenceTier::VeryHigh => "very_high",
        };
        f.write_str(s)
    }
}

/// Origin category of a cited value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitationSource {
    Database,
    Document,
    Calculation,
    Assumption,
    External,
}

/// Reference to a data source backing a decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Citation {
    pub source_type: CitationSource,
    pub source_id: String,
    pub description: String,
    pub value: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl Citation {
    pub fn new(
        source_type: CitationSource,
        source_id: impl Into<String>,
        description: impl Into<String>,
        value: serde_json::Value,
    ) -> Self {
        Self {
            source_type,
            source_id: source_id.into(),
            description: description.into(),
            value,
            timestamp: Utc::now(),
        }
    }
}

/// Everything a caller supplies to log a decision. Id, timestamp, tier
/// and hash are assigned by the audit trail.
#[derive(Debug, Clone)]
pub struct DecisionDraft {
    pub worker: String,
    pub worker_version: String,
    pub kind: DecisionKind,
    pub directive_id: DirectiveId,
    pub decision: String,
    pub rationale: String,
    pub confidence_score: f64,
    pub citations: Vec<Citation>,
    pub data_sources: Vec<String>,
    pub assumptions: Vec<String>,
    pub what_would_change_mind: String,
    pub key_uncertainties: Vec<String>,
    pub required_approvals: Vec<String>,
    pub escalated_to: Option<String>,
}

impl DecisionDraft {
    pub fn new(
        worker: impl Into<String>,
        kind: DecisionKind,
        directive_id: DirectiveId,
        decision: impl Into<String>,
        rationale: impl Into<String>,
        confidence_score: f64,
    ) -> Self {
        Self {
            worker: worker.into(),
            worker_version: "1.0.0".to_string(),
            kind,
            directive_id,
            decision: decision.into(),
            rationale: rationale.into(),
            confidence_score,
            citations: Vec::new(),
            data_sources: Vec::new(),
            assumptions: Vec::new(),
            what_would_change_mind: String::new(),
            key_uncertainties: Vec::new(),
            required_approvals: Vec::new(),
            escalated_to: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.worker_version = version.into();
        self
    }

    pub fn with_citations(mut self, citations: Vec<Citation>) -> Self {
        self.citations = citations;
        self
    }

    pub fn with_data_sources(mut self, sources: Vec<String>) -> Self {
        self.data_sources = sources;
        self
    }

    pub fn with_assumptions(mut self, assumptions: Vec<String>) -> Self {
        self.assumptions = assumptions;
        self
    }

    pub fn with_change_conditions(mut self, conditions: impl Into<String>) -> Self {
        self.what_would_change_mind = conditions.into();
        self
    }

    pub fn with_key_uncertainties(mut self, uncertainties: Vec<String>) -> Self {
        self.key_uncertainties = uncertainties;
        self
    }

    pub fn with_required_approvals(mut self, approvers: Vec<String>) -> Self {
        self.required_approvals = approvers;
        self
    }

    pub fn escalated_to(mut self, target: impl Into<String>) -> Self {
        self.escalated_to = Some(target.into());
        self
    }
}

/// Complete record of a decision in the audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub id: RecordId,
    pub timestamp: DateTime<Utc>,
    pub worker: String,
    pub worker_version: String,
    pub kind: DecisionKind,
    pub directive_id: DirectiveId,

    pub decision: String,
    pub rationale: String,
    pub confidence_tier: ConfidenceTier,
    pub confidence_score: f64,

    #[serde(default)]
    pub citations: Vec<Citation>,
    #[serde(default)]
    pub data_sources: Vec<String>,
    #[serde(default)]
    pub assumptions: Vec<String>,
    pub what_would_change_mind: String,
    #[serde(default)]
    pub key_uncertainties: Vec<String>,

    #[serde(default)]
    pub required_approvals: Vec<String>,
    #[serde(default)]
    pub obtained_approvals: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalated_to: Option<String>,

    // Outcome tracking: the only post-creation mutation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome_timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome_notes: Option<String>,

    /// Integrity hash over the identity fields, fixed at creation.
    pub hash: String,
}

impl DecisionRecord {
    /// Materialize a draft into a record. Tier and hash are derived here.
    pub fn from_draft(id: RecordId, timestamp: DateTime<Utc>, draft: DecisionDraft) -> Self {
        let hash = integrity_hash(&id, &timestamp, &draft.worker, &draft.decision);
        Self {
            id,
            timestamp,
            confidence_tier: ConfidenceTier::from_score(draft.confidence_score),
            worker: draft.worker,
            worker_version: draft.worker_version,
            kind: draft.kind,
            directive_id: draft.directive_id,
            decision: draft.decision,
            rationale: draft.rationale,
            confidence_score: draft.confidence_score,
            citations: draft.citations,
            data_sources: draft.data_sources,
            assumptions: draft.assumptions,
            what_would_change_mind: draft.what_would_change_mind,
            key_uncertainties: draft.key_uncertainties,
            required_approvals: draft.required_approvals,
            obtained_approvals: Vec::new(),
            escalated_to: draft.escalated_to,
            outcome: None,
            outcome_timestamp: None,
            outcome_notes: None,
            hash,
        }
    }

    /// Recompute the hash from current fields and compare to the stored one.
    pub fn verify_integrity(&self) -> bool {
        self.hash == integrity_hash(&self.id, &self.timestamp, &self.worker, &self.decision)
    }

    /// Approvals still missing before this decision is fully approved.
    pub fn missing_approvals(&self) -> Vec<&str> {
        self.required_approvals
            .iter()
            .filter(|r| !self.obtained_approvals.contains(r))
            .map(String::as_str)
            .collect()
    }

    pub fn is_pending_approval(&self) -> bool {
        !self.missing_approvals().is_empty()
    }
}

/// First 16 hex characters of SHA-256 over the record's identity fields.
pub fn integrity_hash(
    id: &RecordId,
    timestamp: &DateTime<Utc>,
    worker: &str,
    decision: &str,
) -> String {
    let content = format!(
        "{}:{}:{}:{}",
        id,
        timestamp.to_rfc3339_opts(SecondsFormat::Micros, true),
        worker,
        decision
    );
    let digest = Sha256::digest(content.as_bytes());
    hex::encode(digest)[..16].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> DecisionRecord {
        let draft = DecisionDraft::new(
            "finance",
            DecisionKind::Recommendation,
            DirectiveId::from_sequence(1),
            "Approve $150K marketing budget increase",
            "ROI analysis shows 3.2x return",
            0.85,
        )
        .with_required_approvals(vec!["cfo".to_string(), "cmo".to_string()]);
        DecisionRecord::from_draft(RecordId(1), Utc::now(), draft)
    }

    #[test]
    fn test_tier_breakpoints() {
        assert_eq!(ConfidenceTier::from_score(0.95), ConfidenceTier::VeryHigh);
        assert_eq!(ConfidenceTier::from_score(0.90), ConfidenceTier::VeryHigh);
        assert_eq!(ConfidenceTier::from_score(0.89), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_score(0.80), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_score(0.79), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_score(0.65), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_score(0.64), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::from_score(0.50), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::from_score(0.49), ConfidenceTier::VeryLow);
    }

    #[test]
    fn test_integrity_holds_after_creation() {
        assert!(record().verify_integrity());
    }

    #[test]
    fn test_integrity_survives_outcome_update() {
        let mut r = record();
        r.outcome = Some("implemented".to_string());
        r.outcome_timestamp = Some(Utc::now());
        r.outcome_notes = Some("rolled out in Q3".to_string());
        assert!(r.verify_integrity());
    }

    #[test]
    fn test_tampered_decision_text_detected() {
        let mut r = record();
        r.decision = "Approve $950K marketing budget increase".to_string();
        assert!(!r.verify_integrity());
    }

    #[test]
    fn test_tampered_timestamp_detected() {
        let mut r = record();
        r.timestamp += chrono::Duration::seconds(1);
        assert!(!r.verify_integrity());
    }

    #[test]
    fn test_missing_approvals() {
        let mut r = record();
        assert_eq!(r.missing_approvals(), vec!["cfo", "cmo"]);
        r.obtained_approvals.push("cfo".to_string());
        assert_eq!(r.missing_approvals(), vec!["cmo"]);
        assert!(r.is_pending_approval());
        r.obtained_approvals.push("cmo".to_string());
        assert!(!r.is_pending_approval());
    }

    #[test]
    fn test_hash_is_16_hex_chars() {
        let r = record();
        assert_eq!(r.hash.len(), 16);
        assert!(r.hash.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
