//! State store entries: the generic timestamped record shared by all
//! components.
//!
//! Payloads are a closed set of typed variants, one per entry kind, so
//! query-by-kind stays cheap while the content keeps its shape.

use super::constraint::Constraint;
use super::goal::Goal;
use crate::core::id::EntryId;
use crate::package::DecisionPackage;
use crate::worker::output::WorkerOutput;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Kind tag of a state entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Goal,
    Constraint,
    WorkerOutput,
    Decision,
    Alert,
    Context,
}

/// Priority of a state entry. Ordering is `Low < Medium < High < Critical`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

/// Alerts raised by the coordination layer itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "alert", rename_all = "snake_case")]
pub enum Alert {
    /// A hard-limited constraint update was rejected.
    ConstraintViolation {
        constraint_id: String,
        limit: f64,
        attempted: f64,
    },
    /// A conflict survived resolution and needs a human decision.
    UnresolvedConflict {
        conflict_id: String,
        kind: String,
        severity: String,
    },
}

/// Typed content of a state entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum EntryPayload {
    Goal(Goal),
    Constraint(Constraint),
    WorkerOutput(Box<WorkerOutput>),
    Decision(Box<DecisionPackage>),
    Alert(Alert),
    Context(serde_json::Value),
}

impl EntryPayload {
    pub fn kind(&self) -> EntryKind {
        match self {
            EntryPayload::Goal(_) => EntryKind::Goal,
            EntryPayload::Constraint(_) => EntryKind::Constraint,
            EntryPayload::WorkerOutput(_) => EntryKind::WorkerOutput,
            EntryPayload::Decision(_) => EntryKind::Decision,
            EntryPayload::Alert(_) => EntryKind::Alert,
            EntryPayload::Context(_) => EntryKind::Context,
        }
    }
}

/// An immutable record in the state store.
///
/// The store owns every entry; callers receive clones and reference
/// entries by id. There is no in-place mutation; corrections are new
/// entries listing the superseded id in `references`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateEntry {
    pub id: EntryId,
    pub source: String,
    pub payload: EntryPayload,
    pub timestamp: DateTime<Utc>,
    pub priority: Priority,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub references: Vec<EntryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl StateEntry {
    pub fn kind(&self) -> EntryKind {
        self.payload.kind()
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at < now)
    }
}

/// Input for storing a new entry. The store assigns id and timestamp.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub source: String,
    pub payload: EntryPayload,
    pub priority: Priority,
    pub tags: Vec<String>,
    pub references: Vec<EntryId>,
    pub ttl: Option<Duration>,
}

impl NewEntry {
    pub fn new(source: impl Into<String>, payload: EntryPayload) -> Self {
        Self {
            source: source.into(),
            payload,
            priority: Priority::Medium,
            tags: Vec::new(),
            references: Vec::new(),
            ttl: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_references(mut self, references: Vec<EntryId>) -> Self {
        self.references = references;
        self
    }

    pub fn expires_in(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }
}

/// Query filter for the state store. All set fields must match.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub kind: Option<EntryKind>,
    pub source: Option<String>,
    pub tags: Vec<String>,
    pub min_priority: Option<Priority>,
    pub since: Option<DateTime<Utc>>,
}

impl EntryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: EntryKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn min_priority(mut self, priority: Priority) -> Self {
        self.min_priority = Some(priority);
        self
    }

    pub fn since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    /// Whether an entry passes every set filter. Expiry is checked by the
    /// store, not here, since it needs the query-time clock.
    pub fn matches(&self, entry: &StateEntry) -> bool {
        if let Some(kind) = self.kind
            && entry.kind() != kind
        {
            return false;
        }
        if let Some(source) = &self.source
            && &entry.source != source
        {
            return false;
        }
        if !self.tags.iter().all(|t| entry.tags.contains(t)) {
            return false;
        }
        if let Some(min) = self.min_priority
            && entry.priority < min
        {
            return false;
        }
        if let Some(since) = self.since
            && entry.timestamp < since
        {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(priority: Priority, tags: &[&str]) -> StateEntry {
        StateEntry {
            id: EntryId(1),
            source: "system".to_string(),
            payload: EntryPayload::Context(serde_json::json!({"note": "test"})),
            timestamp: Utc::now(),
            priority,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            references: Vec::new(),
            expires_at: None,
        }
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
        assert!(Priority::High < Priority::Critical);
    }

    #[test]
    fn test_filter_by_kind() {
        let e = entry(Priority::Medium, &[]);
        assert!(EntryFilter::new().kind(EntryKind::Context).matches(&e));
        assert!(!EntryFilter::new().kind(EntryKind::Alert).matches(&e));
    }

    #[test]
    fn test_filter_requires_all_tags() {
        let e = entry(Priority::Medium, &["alert", "budget"]);
        assert!(EntryFilter::new().tag("alert").tag("budget").matches(&e));
        assert!(!EntryFilter::new().tag("alert").tag("hiring").matches(&e));
    }

    #[test]
    fn test_filter_min_priority() {
        let e = entry(Priority::High, &[]);
        assert!(EntryFilter::new().min_priority(Priority::Medium).matches(&e));
        assert!(!EntryFilter::new().min_priority(Priority::Critical).matches(&e));
    }

    #[test]
    fn test_filter_since() {
        let e = entry(Priority::Medium, &[]);
        let earlier = e.timestamp - Duration::hours(1);
        let later = e.timestamp + Duration::hours(1);
        assert!(EntryFilter::new().since(earlier).matches(&e));
        assert!(!EntryFilter::new().since(later).matches(&e));
    }

    #[test]
    fn test_expiry_check() {
        let mut e = entry(Priority::Medium, &[]);
        assert!(!e.is_expired(Utc::now()));
        e.expires_at = Some(Utc::now() - Duration::seconds(1));
        assert!(e.is_expired(Utc::now()));
    }
}
