//! State store port.
//!
//! The store owns all entries, goals and constraints; callers receive
//! clones and refer to entries by id. Implementations serialize every
//! mutation and compound read behind an exclusive lock per instance.

use consilium_domain::{
    Constraint, ConstraintCategory, EntryFilter, EntryId, Goal, NewEntry, StateEntry,
    StoreSnapshot,
};
use std::sync::Arc;

/// Observer notified synchronously after every stored entry.
///
/// Notification is best-effort by policy: a panicking observer is caught
/// and logged, and never aborts the store operation.
pub trait StoreObserver: Send + Sync {
    fn on_entry(&self, entry: &StateEntry);
}

/// Versioned, queryable repository of goals, constraints and entries.
pub trait StateStore: Send + Sync {
    /// Store a new entry. Always succeeds and assigns the next id.
    fn store(&self, entry: NewEntry) -> EntryId;

    fn get(&self, id: EntryId) -> Option<StateEntry>;

    /// Matching entries, newest first. Expired entries are excluded but
    /// not purged until [`StateStore::sweep_expired`].
    fn query(&self, filter: &EntryFilter) -> Vec<StateEntry>;

    /// Add or replace a goal, mirroring it as a Goal entry.
    fn add_goal(&self, goal: Goal);

    fn goal(&self, id: &str) -> Option<Goal>;

    fn active_goals(&self) -> Vec<Goal>;

    /// Update a goal's current value. Returns false for an unknown id.
    fn update_goal_progress(&self, id: &str, value: f64) -> bool;

    /// Add or replace a constraint, mirroring it as a Constraint entry.
    fn add_constraint(&self, constraint: Constraint);

    fn constraint(&self, id: &str) -> Option<Constraint>;

    fn constraints_by_category(&self, category: ConstraintCategory) -> Vec<Constraint>;

    /// Commit new usage against a constraint. Fails (returning false,
    /// leaving usage unchanged and raising an Alert entry) iff the
    /// constraint is hard-limited and `new_usage` exceeds its limit.
    /// Unknown ids also return false.
    fn update_constraint_usage(&self, id: &str, new_usage: f64) -> bool;

    fn register_observer(&self, observer: Arc<dyn StoreObserver>);

    /// Physically remove expired entries. Returns the count removed.
    fn sweep_expired(&self) -> usize;

    /// Diagnostic export of the current store contents.
    fn snapshot(&self) -> StoreSnapshot;
}
