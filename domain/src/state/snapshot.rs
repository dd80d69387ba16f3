//! Point-in-time export of the state store.

use super::constraint::Constraint;
use super::entry::StateEntry;
use super::goal::Goal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Serializable snapshot of the store contents, used for diagnostics
/// and export. Recent entries are capped by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub taken_at: DateTime<Utc>,
    pub entry_count: usize,
    pub goals: Vec<Goal>,
    pub constraints: Vec<Constraint>,
    pub recent_entries: Vec<StateEntry>,
}
