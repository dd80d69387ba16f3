//! Conflict detection and resolution between worker outputs.
//!
//! The engine is a pure function of the worker outputs for one directive
//! plus the current budget snapshot: same inputs, same conflicts, same
//! resolutions. Nothing is ever dropped; every detected conflict is
//! either resolved or returned in the unresolved set.

pub mod alignment;
pub mod engine;
pub mod resolve;
pub mod types;

pub use alignment::{AlignmentReport, AlignmentStatus, SeverityCounts};
pub use engine::{BudgetSnapshot, ConflictEngine, ConflictPolicy};
pub use resolve::{Allocation, FundingStatus, Resolution, ResolutionDetail, ResolutionSummary};
pub use types::{
    Conflict, ConflictEvidence, ConflictKind, Contradiction, DepartmentDeficit, FundingRequest,
    ResourceClaim, ResourceContention, Severity, StancePosition, UnmetDependency,
};
