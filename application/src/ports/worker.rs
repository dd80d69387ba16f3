//! Worker port: the external functional units.
//!
//! A worker maps one task plus shared context to a structured output.
//! The context handles are the only path through which a worker may
//! touch shared state, keeping every change traceable.

use async_trait::async_trait;
use consilium_domain::{WorkerOutput, WorkerTask};
use std::sync::Arc;
use thiserror::Error;

use super::audit_trail::AuditTrail;
use super::data_source::EnterpriseData;
use super::state_store::StateStore;

/// Errors a worker invocation can surface. Any of these degrades the
/// output rather than aborting the directive.
#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("Worker unavailable: {0}")]
    Unavailable(String),

    #[error("Worker failed: {0}")]
    Failed(String),
}

/// Shared handles passed to every worker invocation.
#[derive(Clone)]
pub struct WorkerContext {
    pub store: Arc<dyn StateStore>,
    pub data: Arc<dyn EnterpriseData>,
    pub audit: Arc<dyn AuditTrail>,
}

/// An external functional unit producing one recommendation per task.
#[async_trait]
pub trait Worker: Send + Sync {
    /// Name under which tasks are routed to this worker.
    fn name(&self) -> &str;

    async fn process(
        &self,
        task: WorkerTask,
        ctx: WorkerContext,
    ) -> Result<WorkerOutput, WorkerError>;
}
