//! Core domain primitives: errors and identifier newtypes.

pub mod error;
pub mod id;

pub use error::DomainError;
pub use id::{DirectiveId, EntryId, RecordId, RequestId, TaskId};
