//! Directive processing: parsed intent, task decomposition, run phases.

pub mod intent;
pub mod phase;
pub mod task;

pub use intent::{Objective, ParsedIntent};
pub use phase::{DirectivePhase, DirectiveRun};
pub use task::{decompose, TaskKind, WorkerTask};
