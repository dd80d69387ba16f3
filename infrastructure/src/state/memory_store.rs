//! In-memory implementation of the state store.
//!
//! One coarse lock guards every map and the id counter, so mutation and
//! compound reads (id-generation-then-insert) are atomic per store
//! instance. Observers are invoked synchronously after the lock is
//! released; a panicking observer is caught and logged.

use std::collections::{BTreeMap, HashMap};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use consilium_application::ports::state_store::{StateStore, StoreObserver};
use consilium_domain::{
    Alert, Constraint, ConstraintCategory, EntryFilter, EntryId, EntryPayload, Goal, NewEntry,
    Priority, StateEntry, StoreSnapshot,
};
use tracing::warn;

#[derive(Default)]
struct Inner {
    entries: BTreeMap<u64, StateEntry>,
    goals: HashMap<String, Goal>,
    constraints: HashMap<String, Constraint>,
    counter: u64,
}

impl Inner {
    /// Insert under the held lock; id assignment and insertion are one
    /// atomic step.
    fn store_entry(&mut self, new_entry: NewEntry) -> StateEntry {
        self.counter += 1;
        let now = Utc::now();
        let entry = StateEntry {
            id: EntryId(self.counter),
            source: new_entry.source,
            payload: new_entry.payload,
            timestamp: now,
            priority: new_entry.priority,
            tags: new_entry.tags,
            references: new_entry.references,
            expires_at: new_entry.ttl.map(|ttl| now + ttl),
        };
        self.entries.insert(entry.id.0, entry.clone());
        entry
    }
}

/// Mutex-guarded in-memory store.
#[derive(Default)]
pub struct MemoryStateStore {
    inner: Mutex<Inner>,
    observers: Mutex<Vec<Arc<dyn StoreObserver>>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn notify(&self, entries: &[StateEntry]) {
        let observers = self.observers.lock().expect("observer lock poisoned");
        for entry in entries {
            for observer in observers.iter() {
                // Observer failures are swallowed by policy; the store
                // operation already committed.
                if catch_unwind(AssertUnwindSafe(|| observer.on_entry(entry))).is_err() {
                    warn!(entry = %entry.id, "Store observer panicked; ignoring");
                }
            }
        }
    }
}

impl StateStore for MemoryStateStore {
    fn store(&self, entry: NewEntry) -> EntryId {
        let stored = {
            let mut inner = self.inner.lock().expect("store lock poisoned");
            inner.store_entry(entry)
        };
        let id = stored.id;
        self.notify(&[stored]);
        id
    }

    fn get(&self, id: EntryId) -> Option<StateEntry> {
        let inner = self.inner.lock().expect("store lock poisoned");
        inner.entries.get(&id.0).cloned()
    }

    fn query(&self, filter: &EntryFilter) -> Vec<StateEntry> {
        let inner = self.inner.lock().expect("store lock poisoned");
        let now = Utc::now();
        let mut results: Vec<StateEntry> = inner
            .entries
            .values()
            .filter(|e| !e.is_expired(now) && filter.matches(e))
            .cloned()
            .collect();
        // Newest first; id breaks timestamp ties in favour of the later
        // insertion.
        results.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        results
    }

    fn add_goal(&self, goal: Goal) {
        let mirrored = {
            let mut inner = self.inner.lock().expect("store lock poisoned");
            inner.goals.insert(goal.id.clone(), goal.clone());
            inner.store_entry(
                NewEntry::new("system", EntryPayload::Goal(goal.clone()))
                    .with_priority(Priority::High)
                    .with_tags(vec!["goal".to_string(), goal.status.to_string()]),
            )
        };
        self.notify(&[mirrored]);
    }

    fn goal(&self, id: &str) -> Option<Goal> {
        let inner = self.inner.lock().expect("store lock poisoned");
        inner.goals.get(id).cloned()
    }

    fn active_goals(&self) -> Vec<Goal> {
        let inner = self.inner.lock().expect("store lock poisoned");
        let mut goals: Vec<Goal> = inner.goals.values().filter(|g| g.is_active()).cloned().collect();
        goals.sort_by(|a, b| a.id.cmp(&b.id));
        goals
    }

    fn update_goal_progress(&self, id: &str, value: f64) -> bool {
        let mut inner = self.inner.lock().expect("store lock poisoned");
        match inner.goals.get_mut(id) {
            Some(goal) => {
                goal.current_value = value;
                true
            }
            None => false,
        }
    }

    fn add_constraint(&self, constraint: Constraint) {
        let priority = if constraint.hard_limit {
            Priority::High
        } else {
            Priority::Medium
        };
        let mirrored = {
            let mut inner = self.inner.lock().expect("store lock poisoned");
            inner
                .constraints
                .insert(constraint.id.clone(), constraint.clone());
            inner.store_entry(
                NewEntry::new("system", EntryPayload::Constraint(constraint.clone()))
                    .with_priority(priority)
                    .with_tags(vec![
                        "constraint".to_string(),
                        constraint.category.to_string(),
                    ]),
            )
        };
        self.notify(&[mirrored]);
    }

    fn constraint(&self, id: &str) -> Option<Constraint> {
        let inner = self.inner.lock().expect("store lock poisoned");
        inner.constraints.get(id).cloned()
    }

    fn constraints_by_category(&self, category: ConstraintCategory) -> Vec<Constraint> {
        let inner = self.inner.lock().expect("store lock poisoned");
        let mut constraints: Vec<Constraint> = inner
            .constraints
            .values()
            .filter(|c| c.category == category)
            .cloned()
            .collect();
        constraints.sort_by(|a, b| a.id.cmp(&b.id));
        constraints
    }

    fn update_constraint_usage(&self, id: &str, new_usage: f64) -> bool {
        let (accepted, alert) = {
            let mut inner = self.inner.lock().expect("store lock poisoned");
            let Some(constraint) = inner.constraints.get(id).cloned() else {
                return false;
            };
            if constraint.would_violate(new_usage) {
                // Usage stays unchanged; the rejection is an Alert entry.
                let alert = inner.store_entry(
                    NewEntry::new(
                        "system",
                        EntryPayload::Alert(Alert::ConstraintViolation {
                            constraint_id: id.to_string(),
                            limit: constraint.limit_value,
                            attempted: new_usage,
                        }),
                    )
                    .with_priority(Priority::Critical)
                    .with_tags(vec![
                        "alert".to_string(),
                        "constraint_violation".to_string(),
                    ]),
                );
                (false, Some(alert))
            } else {
                inner
                    .constraints
                    .get_mut(id)
                    .expect("constraint present under lock")
                    .current_usage = new_usage;
                (true, None)
            }
        };
        if let Some(alert) = alert {
            warn!(constraint = id, "Hard limit violation rejected");
            self.notify(&[alert]);
        }
        accepted
    }

    fn register_observer(&self, observer: Arc<dyn StoreObserver>) {
        self.observers
            .lock()
            .expect("observer lock poisoned")
            .push(observer);
    }

    fn sweep_expired(&self) -> usize {
        let mut inner = self.inner.lock().expect("store lock poisoned");
        let now = Utc::now();
        let before = inner.entries.len();
        inner.entries.retain(|_, e| !e.is_expired(now));
        before - inner.entries.len()
    }

    fn snapshot(&self) -> StoreSnapshot {
        let inner = self.inner.lock().expect("store lock poisoned");
        let now = Utc::now();
        let mut goals: Vec<Goal> = inner.goals.values().cloned().collect();
        goals.sort_by(|a, b| a.id.cmp(&b.id));
        let mut constraints: Vec<Constraint> = inner.constraints.values().cloned().collect();
        constraints.sort_by(|a, b| a.id.cmp(&b.id));
        let mut recent: Vec<StateEntry> = inner
            .entries
            .values()
            .filter(|e| !e.is_expired(now))
            .cloned()
            .collect();
        recent.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        recent.truncate(20);
        StoreSnapshot {
            taken_at: now,
            entry_count: inner.entries.len(),
            goals,
            constraints,
            recent_entries: recent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use consilium_domain::EntryKind;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn context_entry(source: &str, tags: &[&str]) -> NewEntry {
        NewEntry::new(
            source,
            EntryPayload::Context(serde_json::json!({"note": source})),
        )
        .with_tags(tags.iter().map(|t| t.to_string()).collect())
    }

    fn budget_constraint(hard: bool) -> Constraint {
        let c = Constraint::new(
            "budget-marketing",
            ConstraintCategory::Budget,
            "Marketing department budget",
            500_000.0,
            320_000.0,
            "USD",
            "cfo",
        );
        if hard { c.hard() } else { c }
    }

    #[test]
    fn test_ids_are_monotonic() {
        let store = MemoryStateStore::new();
        let first = store.store(context_entry("a", &[]));
        let second = store.store(context_entry("b", &[]));
        assert!(second > first);
        assert_eq!(store.get(first).unwrap().source, "a");
    }

    #[test]
    fn test_get_unknown_is_none() {
        let store = MemoryStateStore::new();
        assert!(store.get(EntryId(99)).is_none());
    }

    #[test]
    fn test_query_filters_and_orders_newest_first() {
        let store = MemoryStateStore::new();
        store.store(context_entry("first", &["shared"]));
        store.store(context_entry("second", &["shared"]));
        store.store(context_entry("other", &["different"]));

        let results = store.query(&EntryFilter::new().tag("shared"));
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].source, "second");
        assert_eq!(results[1].source, "first");
    }

    #[test]
    fn test_expired_entries_hidden_until_swept() {
        let store = MemoryStateStore::new();
        store.store(context_entry("keep", &[]).expires_in(Duration::hours(1)));
        store.store(context_entry("gone", &[]).expires_in(Duration::seconds(-1)));

        let results = store.query(&EntryFilter::new().kind(EntryKind::Context));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].source, "keep");

        assert_eq!(store.sweep_expired(), 1);
        assert_eq!(store.snapshot().entry_count, 1);
    }

    #[test]
    fn test_goal_mirrored_as_entry() {
        let store = MemoryStateStore::new();
        store.add_goal(Goal::new(
            "GOAL-001",
            "Improve retention",
            0.92,
            0.84,
            "percentage",
            Utc::now(),
            "chief-executive",
        ));

        assert!(store.goal("GOAL-001").is_some());
        assert_eq!(store.active_goals().len(), 1);
        assert_eq!(store.query(&EntryFilter::new().kind(EntryKind::Goal)).len(), 1);

        assert!(store.update_goal_progress("GOAL-001", 0.86));
        assert_eq!(store.goal("GOAL-001").unwrap().current_value, 0.86);
        assert!(!store.update_goal_progress("GOAL-404", 0.5));
    }

    #[test]
    fn test_hard_limit_rejected_with_single_alert() {
        let store = MemoryStateStore::new();
        store.add_constraint(budget_constraint(true));

        let alerts_before = store.query(&EntryFilter::new().kind(EntryKind::Alert)).len();
        assert!(!store.update_constraint_usage("budget-marketing", 500_000.01));

        // Usage unchanged, exactly one new alert.
        assert_eq!(
            store.constraint("budget-marketing").unwrap().current_usage,
            320_000.0
        );
        let alerts = store.query(&EntryFilter::new().kind(EntryKind::Alert));
        assert_eq!(alerts.len(), alerts_before + 1);
        assert_eq!(alerts[0].priority, Priority::Critical);
    }

    #[test]
    fn test_soft_limit_may_exceed() {
        let store = MemoryStateStore::new();
        store.add_constraint(budget_constraint(false));
        assert!(store.update_constraint_usage("budget-marketing", 600_000.0));
        assert_eq!(
            store.constraint("budget-marketing").unwrap().current_usage,
            600_000.0
        );
        assert!(store.query(&EntryFilter::new().kind(EntryKind::Alert)).is_empty());
    }

    #[test]
    fn test_hard_limit_at_exact_limit_accepted() {
        let store = MemoryStateStore::new();
        store.add_constraint(budget_constraint(true));
        assert!(store.update_constraint_usage("budget-marketing", 500_000.0));
    }

    #[test]
    fn test_unknown_constraint_update_fails() {
        let store = MemoryStateStore::new();
        assert!(!store.update_constraint_usage("budget-unknown", 10.0));
    }

    struct CountingObserver(AtomicUsize);
    impl StoreObserver for CountingObserver {
        fn on_entry(&self, _entry: &StateEntry) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct PanickingObserver;
    impl StoreObserver for PanickingObserver {
        fn on_entry(&self, _entry: &StateEntry) {
            panic!("observer bug");
        }
    }

    #[test]
    fn test_observer_notified_per_entry() {
        let store = MemoryStateStore::new();
        let observer = Arc::new(CountingObserver(AtomicUsize::new(0)));
        store.register_observer(observer.clone());

        store.store(context_entry("a", &[]));
        store.add_goal(Goal::new(
            "GOAL-001",
            "g",
            1.0,
            0.0,
            "unit",
            Utc::now(),
            "owner",
        ));
        assert_eq!(observer.0.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_observer_panic_does_not_abort_store() {
        let store = MemoryStateStore::new();
        let counting = Arc::new(CountingObserver(AtomicUsize::new(0)));
        store.register_observer(Arc::new(PanickingObserver));
        store.register_observer(counting.clone());

        let id = store.store(context_entry("survives", &[]));
        assert!(store.get(id).is_some());
        // Later observers still run after an earlier one panicked.
        assert_eq!(counting.0.load(Ordering::SeqCst), 1);
    }
}
