//! Cross-functional alignment reporting.

use serde::{Deserialize, Serialize};

use super::types::{Conflict, Severity};

/// Three-valued alignment summary for a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlignmentStatus {
    #[serde(rename = "ALIGNED")]
    Aligned,
    #[serde(rename = "MINOR_CONFLICTS")]
    MinorConflicts,
    #[serde(rename = "NEEDS_RESOLUTION")]
    NeedsResolution,
}

impl std::fmt::Display for AlignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AlignmentStatus::Aligned => "ALIGNED",
            AlignmentStatus::MinorConflicts => "MINOR_CONFLICTS",
            AlignmentStatus::NeedsResolution => "NEEDS_RESOLUTION",
        };
        f.write_str(s)
    }
}

/// Conflict counts by severity.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Alignment status with the underlying counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignmentReport {
    pub status: AlignmentStatus,
    pub conflicts_detected: usize,
    pub by_severity: SeverityCounts,
    pub message: String,
}

impl AlignmentReport {
    pub fn from_conflicts(conflicts: &[Conflict]) -> Self {
        if conflicts.is_empty() {
            return Self {
                status: AlignmentStatus::Aligned,
                conflicts_detected: 0,
                by_severity: SeverityCounts::default(),
                message: "All workers in alignment".to_string(),
            };
        }

        let mut counts = SeverityCounts::default();
        for conflict in conflicts {
            match conflict.severity {
                Severity::Critical => counts.critical += 1,
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
            }
        }

        let status = if counts.critical > 0 {
            AlignmentStatus::NeedsResolution
        } else {
            AlignmentStatus::MinorConflicts
        };
        let message = if counts.critical > 0 {
            format!("{} critical conflicts require attention", counts.critical)
        } else {
            "Minor conflicts auto-resolved".to_string()
        };

        Self {
            status,
            conflicts_detected: conflicts.len(),
            by_severity: counts,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflict::types::{ConflictEvidence, ConflictKind};

    fn conflict(severity: Severity) -> Conflict {
        Conflict {
            id: "CONF-001".to_string(),
            kind: ConflictKind::TimelineConflict,
            workers_involved: vec!["sales".to_string()],
            description: "test".to_string(),
            evidence: ConflictEvidence::Timeline(Vec::new()),
            severity,
            resolution: None,
        }
    }

    #[test]
    fn test_no_conflicts_is_aligned() {
        let report = AlignmentReport::from_conflicts(&[]);
        assert_eq!(report.status, AlignmentStatus::Aligned);
        assert_eq!(report.conflicts_detected, 0);
    }

    #[test]
    fn test_non_critical_is_minor() {
        let report = AlignmentReport::from_conflicts(&[conflict(Severity::High)]);
        assert_eq!(report.status, AlignmentStatus::MinorConflicts);
        assert_eq!(report.by_severity.high, 1);
    }

    #[test]
    fn test_critical_needs_resolution() {
        let report =
            AlignmentReport::from_conflicts(&[conflict(Severity::Medium), conflict(Severity::Critical)]);
        assert_eq!(report.status, AlignmentStatus::NeedsResolution);
        assert_eq!(report.by_severity.critical, 1);
        assert_eq!(report.by_severity.medium, 1);
        assert!(report.message.contains("1 critical"));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(AlignmentStatus::Aligned.to_string(), "ALIGNED");
        assert_eq!(AlignmentStatus::NeedsResolution.to_string(), "NEEDS_RESOLUTION");
    }
}
