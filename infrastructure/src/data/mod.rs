//! Enterprise data adapters.

pub mod mock_source;

pub use mock_source::MockEnterpriseData;
