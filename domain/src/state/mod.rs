//! Shared state domain: goals, constraints and store entries.
//!
//! The state store owns every entry; other components hold ids and work
//! on clones. Entries are immutable once stored: a correction is a new
//! entry referencing the old one, never an in-place edit.

pub mod constraint;
pub mod entry;
pub mod goal;
pub mod snapshot;

pub use constraint::{Constraint, ConstraintCategory};
pub use entry::{Alert, EntryFilter, EntryKind, EntryPayload, NewEntry, Priority, StateEntry};
pub use goal::{Goal, GoalStatus, KeyResult};
pub use snapshot::StoreSnapshot;
