//! Port abstraction for creating seed records.

use async_trait::async_trait;
use seed_data::{SeedCategory, SeedRecord};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by seed record repository adapters.
    pub enum SeedRecordRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "seed record connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "seed record query failed: {message}",
    }
}

/// Port for inserting seed records into their content types.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SeedRecordRepository: Send + Sync {
    /// Create one record of the given category.
    async fn create_record(
        &self,
        category: SeedCategory,
        record: SeedRecord,
    ) -> Result<(), SeedRecordRepositoryError>;
}

/// Test fixture implementation that discards every record.
#[derive(Debug, Default, Clone)]
pub struct FixtureSeedRecordRepository;

#[async_trait]
impl SeedRecordRepository for FixtureSeedRecordRepository {
    async fn create_record(
        &self,
        _category: SeedCategory,
        _record: SeedRecord,
    ) -> Result<(), SeedRecordRepositoryError> {
        Ok(())
    }
}
