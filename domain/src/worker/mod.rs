//! The worker output contract.
//!
//! Workers are external collaborators: each maps one task plus shared
//! context to a structured output. Only the shape is owned here; the
//! recommendation text is domain content produced by the workers.

pub mod confidence;
pub mod output;

pub use confidence::assess_confidence;
pub use output::{
    BudgetRequest, Deliverable, Recommendation, ResourceRequest, StanceDirection, StrategicStance,
    WorkerOutput,
};
