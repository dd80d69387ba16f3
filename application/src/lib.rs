//! Application layer for consilium
//!
//! This crate defines the ports (traits) the coordination layer talks
//! through: the state store, audit trail, governance engine, workers,
//! intent parser and enterprise data surface. It also holds the use
//! cases that drive a directive end-to-end.

pub mod ports;
pub mod use_cases;

pub use ports::audit_trail::{AuditObserver, AuditTrail};
pub use ports::data_source::{CustomerSummary, DepartmentBudget, EnterpriseData, TicketSummary};
pub use ports::governance::Governance;
pub use ports::intent_parser::{IntentParser, ParseError};
pub use ports::state_store::{StateStore, StoreObserver};
pub use ports::worker::{Worker, WorkerContext, WorkerError};
pub use use_cases::init_context::{seed_context, BudgetSeed, SeedContext};
pub use use_cases::run_directive::{RunDirectiveError, RunDirectiveUseCase};
