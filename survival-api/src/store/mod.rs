//! Record store adapter
//!
//! Narrow key-value interface over the durable record store. Items hold the
//! probability as an integer fixed-point value (probability × 100); encoding
//! and decoding happen in the service layer.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryRecordStore;
pub use sqlite::SqliteRecordStore;

use async_trait::async_trait;
use survival_common::Result;

/// Persisted item layout
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct StoredRecord {
    /// Partition key
    pub id: String,
    /// Probability × 100
    pub probabilidade_sobrevivencia: i64,
}

/// Key-value record store keyed by record identifier
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Write or overwrite a record (no uniqueness check)
    async fn put(&self, record: &StoredRecord) -> Result<()>;

    /// Fetch a record, `None` if absent
    async fn get(&self, id: &str) -> Result<Option<StoredRecord>>;

    /// All records, in store order (unordered for callers)
    async fn scan(&self) -> Result<Vec<StoredRecord>>;

    /// Unconditional delete; deleting a missing id is not an error
    async fn delete(&self, id: &str) -> Result<()>;
}
