//! Data access log entries.
//!
//! Every read a worker performs against the enterprise data surface is
//! recorded so each cited figure traces back to a query.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One logged read against an external data source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataAccess {
    pub worker: String,
    pub data_source: String,
    pub query: String,
    pub records_accessed: u64,
    pub purpose: String,
    pub timestamp: DateTime<Utc>,
}

impl DataAccess {
    pub fn new(
        worker: impl Into<String>,
        data_source: impl Into<String>,
        query: impl Into<String>,
        records_accessed: u64,
        purpose: impl Into<String>,
    ) -> Self {
        Self {
            worker: worker.into(),
            data_source: data_source.into(),
            query: query.into(),
            records_accessed,
            purpose: purpose.into(),
            timestamp: Utc::now(),
        }
    }

    /// Citation string in `source:query:n_records` form.
    pub fn citation(&self) -> String {
        format!(
            "{}:{}:{}_records",
            self.data_source, self.query, self.records_accessed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_citation_format() {
        let access = DataAccess::new("sales", "crm", "customer_churn_analysis", 1240, "retention planning");
        assert_eq!(access.citation(), "crm:customer_churn_analysis:1240_records");
    }
}
