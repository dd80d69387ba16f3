//! The conflict engine: detection passes and resolution strategies.

use std::collections::BTreeMap;

use crate::worker::output::WorkerOutput;

use super::alignment::AlignmentReport;
use super::resolve::{
    priority_rank, Allocation, FundingStatus, Resolution, ResolutionDetail, ResolutionEntry,
    ResolutionSummary,
};
use super::types::{
    Conflict, ConflictEvidence, ConflictKind, Contradiction, DepartmentDeficit, FundingRequest,
    ResourceClaim, ResourceContention, Severity, StancePosition, UnmetDependency,
};

/// Tunable inputs to detection. Availability used to be a hidden constant;
/// it is an explicit policy here.
#[derive(Debug, Clone)]
pub struct ConflictPolicy {
    /// Units of any single named resource available per planning window.
    pub resource_availability: f64,
}

impl Default for ConflictPolicy {
    fn default() -> Self {
        Self {
            resource_availability: 3.0,
        }
    }
}

/// Available budget per department at detection time, built by the caller
/// from the live Constraint entities (limit minus current usage).
#[derive(Debug, Clone, Default)]
pub struct BudgetSnapshot {
    available: BTreeMap<String, f64>,
}

impl BudgetSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_available(&mut self, department: impl Into<String>, amount: f64) {
        self.available.insert(department.into(), amount);
    }

    /// Derive departments from budget constraints whose id follows the
    /// `budget-<department>` convention; other ids map to themselves.
    pub fn from_constraints(constraints: &[crate::state::Constraint]) -> Self {
        let mut snapshot = Self::new();
        for constraint in constraints {
            let department = constraint
                .id
                .strip_prefix("budget-")
                .unwrap_or(&constraint.id);
            snapshot.set_available(department, constraint.available());
        }
        snapshot
    }

    pub fn available(&self, department: &str) -> f64 {
        self.available.get(department).copied().unwrap_or(0.0)
    }
}

/// Detects and resolves conflicts between worker outputs.
///
/// Stateless: repeated calls over the same inputs produce the same
/// conflict set and the same resolutions.
#[derive(Debug, Clone, Default)]
pub struct ConflictEngine {
    policy: ConflictPolicy,
}

impl ConflictEngine {
    pub fn new(policy: ConflictPolicy) -> Self {
        Self { policy }
    }

    /// Run all detection passes over the outputs for one directive.
    pub fn detect(&self, outputs: &[WorkerOutput], snapshot: &BudgetSnapshot) -> Vec<Conflict> {
        let mut conflicts = Vec::new();

        if let Some(conflict) = self.detect_budget_overallocation(outputs, snapshot) {
            conflicts.push(conflict);
        }
        if let Some(conflict) = self.detect_timeline_conflict(outputs) {
            conflicts.push(conflict);
        }
        if let Some(conflict) = self.detect_strategic_misalignment(outputs) {
            conflicts.push(conflict);
        }
        if let Some(conflict) = self.detect_resource_contention(outputs) {
            conflicts.push(conflict);
        }

        // Conflict ids are positional within one detection run.
        for (i, conflict) in conflicts.iter_mut().enumerate() {
            conflict.id = format!("CONF-{:03}", i + 1);
        }
        conflicts
    }

    fn detect_budget_overallocation(
        &self,
        outputs: &[WorkerOutput],
        snapshot: &BudgetSnapshot,
    ) -> Option<Conflict> {
        let mut by_department: BTreeMap<String, Vec<FundingRequest>> = BTreeMap::new();
        for output in outputs {
            if let Some(request) = &output.budget_request {
                by_department
                    .entry(request.department.clone())
                    .or_default()
                    .push(FundingRequest {
                        worker: output.worker.clone(),
                        amount: request.amount,
                        purpose: request.purpose.clone(),
                        priority: request.priority,
                    });
            }
        }

        let mut deficits = Vec::new();
        for (department, requests) in by_department {
            let requested: f64 = requests.iter().map(|r| r.amount).sum();
            let available = snapshot.available(&department);
            if requested > available {
                deficits.push(DepartmentDeficit {
                    shortfall: requested - available,
                    department,
                    requested,
                    available,
                    requests,
                });
            }
        }

        if deficits.is_empty() {
            return None;
        }

        let workers: Vec<String> = deficits
            .iter()
            .flat_map(|d| d.requests.iter().map(|r| r.worker.clone()))
            .collect();
        let total_shortfall: f64 = deficits.iter().map(|d| d.shortfall).sum();
        Some(Conflict {
            id: String::new(),
            kind: ConflictKind::BudgetOverallocation,
            workers_involved: workers,
            description: format!(
                "Budget overrun detected: ${total_shortfall:.0} over available budget"
            ),
            evidence: ConflictEvidence::Budget(deficits),
            severity: Severity::High,
            resolution: None,
        })
    }

    fn detect_timeline_conflict(&self, outputs: &[WorkerOutput]) -> Option<Conflict> {
        let deliverables: Vec<&str> = outputs
            .iter()
            .flat_map(|o| o.deliverables.iter().map(|d| d.name.as_str()))
            .collect();

        let mut unmet = Vec::new();
        for output in outputs {
            for dependency in &output.dependencies {
                if !deliverables.iter().any(|d| *d == dependency) {
                    unmet.push(UnmetDependency {
                        worker: output.worker.clone(),
                        dependency: dependency.clone(),
                    });
                }
            }
        }

        if unmet.is_empty() {
            return None;
        }

        let names: Vec<&str> = unmet.iter().map(|u| u.dependency.as_str()).collect();
        let workers: Vec<String> = unmet.iter().map(|u| u.worker.clone()).collect();
        Some(Conflict {
            id: String::new(),
            kind: ConflictKind::TimelineConflict,
            workers_involved: workers,
            description: format!("Unmet dependencies: {}", names.join(", ")),
            evidence: ConflictEvidence::Timeline(unmet),
            severity: Severity::Medium,
            resolution: None,
        })
    }

    fn detect_strategic_misalignment(&self, outputs: &[WorkerOutput]) -> Option<Conflict> {
        let stances: Vec<(&WorkerOutput, &crate::worker::output::StrategicStance)> = outputs
            .iter()
            .flat_map(|o| o.stances.iter().map(move |s| (o, s)))
            .collect();

        let mut contradictions = Vec::new();
        for (i, (first_output, first)) in stances.iter().enumerate() {
            for (second_output, second) in stances.iter().skip(i + 1) {
                if first.lever == second.lever && first.direction.opposes(second.direction) {
                    contradictions.push(Contradiction {
                        lever: first.lever.clone(),
                        first: StancePosition {
                            worker: first_output.worker.clone(),
                            direction: first.direction,
                            position: first.position.clone(),
                        },
                        second: StancePosition {
                            worker: second_output.worker.clone(),
                            direction: second.direction,
                            position: second.position.clone(),
                        },
                    });
                }
            }
        }

        if contradictions.is_empty() {
            return None;
        }

        let mut workers: Vec<String> = contradictions
            .iter()
            .flat_map(|c| [c.first.worker.clone(), c.second.worker.clone()])
            .collect();
        workers.dedup();
        Some(Conflict {
            id: String::new(),
            kind: ConflictKind::StrategicMisalignment,
            workers_involved: workers,
            description: "Contradictory strategic directions detected".to_string(),
            evidence: ConflictEvidence::Strategic(contradictions),
            severity: Severity::Critical,
            resolution: None,
        })
    }

    fn detect_resource_contention(&self, outputs: &[WorkerOutput]) -> Option<Conflict> {
        let mut by_resource: BTreeMap<String, Vec<ResourceClaim>> = BTreeMap::new();
        for output in outputs {
            for request in &output.resource_requests {
                by_resource
                    .entry(request.resource.clone())
                    .or_default()
                    .push(ResourceClaim {
                        worker: output.worker.clone(),
                        amount: request.amount,
                        priority: request.priority,
                    });
            }
        }

        let mut contentions = Vec::new();
        for (resource, claims) in by_resource {
            if claims.len() < 2 {
                continue;
            }
            let total: f64 = claims.iter().map(|c| c.amount).sum();
            if total > self.policy.resource_availability {
                contentions.push(ResourceContention {
                    resource,
                    total_requested: total,
                    availability: self.policy.resource_availability,
                    claims,
                });
            }
        }

        if contentions.is_empty() {
            return None;
        }

        let mut workers: Vec<String> = contentions
            .iter()
            .flat_map(|c| c.claims.iter().map(|r| r.worker.clone()))
            .collect();
        workers.sort();
        workers.dedup();
        let names: Vec<&str> = contentions.iter().map(|c| c.resource.as_str()).collect();
        Some(Conflict {
            id: String::new(),
            kind: ConflictKind::ResourceContention,
            workers_involved: workers,
            description: format!("Resource contention: {}", names.join(", ")),
            evidence: ConflictEvidence::Resource(contentions),
            severity: Severity::Medium,
            resolution: None,
        })
    }

    /// Apply the per-kind resolution strategy to every detected conflict.
    ///
    /// Returns the unresolved subset and a summary. Strategic conflicts
    /// are never auto-resolved; budget conflicts stay unresolved when the
    /// priority-ordered allocation leaves a shortfall.
    pub fn resolve(&self, mut conflicts: Vec<Conflict>) -> (Vec<Conflict>, ResolutionSummary) {
        let mut summary = ResolutionSummary::default();
        let mut unresolved = Vec::new();

        for conflict in conflicts.iter_mut() {
            let resolution = match conflict.kind {
                ConflictKind::BudgetOverallocation => Some(resolve_budget(conflict)),
                ConflictKind::ResourceContention => Some(Resolution {
                    resolved: true,
                    description: "Resources scheduled sequentially by priority".to_string(),
                    detail: ResolutionDetail::SequentialScheduling,
                }),
                ConflictKind::TimelineConflict => Some(Resolution {
                    resolved: true,
                    description: "Timeline adjusted to respect dependencies".to_string(),
                    detail: ResolutionDetail::CriticalPathAdjustment,
                }),
                ConflictKind::PriorityConflict => Some(Resolution {
                    resolved: true,
                    description: "Priorities ranked by strategic impact".to_string(),
                    detail: ResolutionDetail::ImpactRanking,
                }),
                ConflictKind::StrategicMisalignment => {
                    let positions = match &conflict.evidence {
                        ConflictEvidence::Strategic(contradictions) => contradictions.clone(),
                        _ => Vec::new(),
                    };
                    Some(Resolution {
                        resolved: false,
                        description: "Strategic misalignment requires an executive decision"
                            .to_string(),
                        detail: ResolutionDetail::EscalateToHuman { positions },
                    })
                }
                // No automatic strategy; surfaced as-is.
                ConflictKind::DependencyUnmet => None,
            };

            match resolution {
                Some(resolution) => {
                    summary.entries.push(ResolutionEntry {
                        conflict_id: conflict.id.clone(),
                        resolved: resolution.resolved,
                        description: resolution.description.clone(),
                    });
                    conflict.resolution = Some(resolution);
                }
                None => {
                    summary.entries.push(ResolutionEntry {
                        conflict_id: conflict.id.clone(),
                        resolved: false,
                        description: "No automatic resolution strategy".to_string(),
                    });
                }
            }

            if !conflict.is_resolved() {
                unresolved.push(conflict.clone());
            }
        }

        summary.unresolved_count = unresolved.len();
        (unresolved, summary)
    }

    /// Alignment report over the detected conflict set.
    pub fn alignment_report(&self, conflicts: &[Conflict]) -> AlignmentReport {
        AlignmentReport::from_conflicts(conflicts)
    }
}

/// Priority-ordered allocation across every department deficit.
fn resolve_budget(conflict: &Conflict) -> Resolution {
    let ConflictEvidence::Budget(deficits) = &conflict.evidence else {
        return Resolution {
            resolved: false,
            description: "No budget evidence attached".to_string(),
            detail: ResolutionDetail::BudgetAllocation {
                allocations: Vec::new(),
                shortfall: 0.0,
                requires_escalation: true,
            },
        };
    };

    let mut allocations = Vec::new();
    let mut shortfall = 0.0;

    for deficit in deficits {
        let mut requests: Vec<&FundingRequest> = deficit.requests.iter().collect();
        requests.sort_by_key(|r| priority_rank(r.priority));

        let mut remaining = deficit.available;
        for request in requests {
            let granted = request.amount.min(remaining);
            remaining -= granted;
            let status = if granted >= request.amount {
                FundingStatus::FullyFunded
            } else if granted > 0.0 {
                FundingStatus::PartiallyFunded
            } else {
                FundingStatus::Unfunded
            };
            shortfall += request.amount - granted;
            allocations.push(Allocation {
                worker: request.worker.clone(),
                department: deficit.department.clone(),
                requested: request.amount,
                granted,
                status,
            });
        }
    }

    let requires_escalation = shortfall > 0.0;
    Resolution {
        resolved: !requires_escalation,
        description: if requires_escalation {
            format!("Budget allocated by priority; ${shortfall:.0} shortfall requires escalation")
        } else {
            "Budget allocated by priority within available funds".to_string()
        },
        detail: ResolutionDetail::BudgetAllocation {
            allocations,
            shortfall,
            requires_escalation,
        },
    }
}
