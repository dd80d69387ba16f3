//! Domain layer for consilium
//!
//! This crate contains the core coordination entities and pure logic.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Directive
//!
//! A directive is a single top-level business instruction processed
//! end-to-end: parsed into an intent, decomposed into per-worker tasks,
//! reconciled into one decision package.
//!
//! ## Coordination
//!
//! - **State**: goals, constraints and timestamped entries shared by all
//!   components
//! - **Audit**: hash-chained decision records with citations
//! - **Conflict**: detection and resolution of contradictions between
//!   worker outputs
//! - **Governance**: authority boundaries, approvals and escalation rules

pub mod audit;
pub mod conflict;
pub mod core;
pub mod directive;
pub mod governance;
pub mod package;
pub mod state;
pub mod worker;

// Re-export commonly used types
pub use audit::{
    access::DataAccess,
    record::{Citation, CitationSource, ConfidenceTier, DecisionDraft, DecisionKind, DecisionRecord},
    report::AuditReport,
};
pub use conflict::{
    alignment::{AlignmentReport, AlignmentStatus, SeverityCounts},
    engine::{BudgetSnapshot, ConflictEngine, ConflictPolicy},
    resolve::{Allocation, FundingStatus, Resolution, ResolutionDetail, ResolutionSummary},
    types::{
        Conflict, ConflictEvidence, ConflictKind, Contradiction, DepartmentDeficit,
        FundingRequest, ResourceClaim, ResourceContention, Severity, StancePosition,
        UnmetDependency,
    },
};
pub use core::{
    error::DomainError,
    id::{DirectiveId, EntryId, RecordId, RequestId, TaskId},
};
pub use directive::{
    intent::{Objective, ParsedIntent},
    phase::{DirectivePhase, DirectiveRun},
    task::{decompose, TaskKind, WorkerTask},
};
pub use governance::{
    approval::{ApprovalRequest, ApprovalStatus, ApprovalSummary},
    escalation::{EscalationPolicy, EscalationTrigger},
    permissions::{
        ActionCategory, AuthorityLevel, AutoApprovalLimits, PermissionDecision, PermissionProfile,
    },
};
pub use package::{
    build_strategic_options, dedup_risks, retention_kpis, roll_up_budget, roll_up_headcount,
    BudgetImpact, DecisionPackage, DepartmentPlan, Escalation, HeadcountImpact, Kpi,
    StrategicOption,
};
pub use state::{
    constraint::{Constraint, ConstraintCategory},
    entry::{Alert, EntryFilter, EntryKind, EntryPayload, NewEntry, Priority, StateEntry},
    goal::{Goal, GoalStatus, KeyResult},
    snapshot::StoreSnapshot,
};
pub use worker::{
    confidence::assess_confidence,
    output::{
        BudgetRequest, Deliverable, Recommendation, ResourceRequest, StanceDirection,
        StrategicStance, WorkerOutput,
    },
};
