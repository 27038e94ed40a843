//! In-memory record store

use std::collections::HashMap;

use async_trait::async_trait;
use survival_common::Result;
use tokio::sync::RwLock;

use super::{RecordStore, StoredRecord};

/// HashMap-backed store for tests and local runs
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: RwLock<HashMap<String, i64>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn put(&self, record: &StoredRecord) -> Result<()> {
        self.records
            .write()
            .await
            .insert(record.id.clone(), record.probabilidade_sobrevivencia);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<StoredRecord>> {
        Ok(self.records.read().await.get(id).map(|&value| StoredRecord {
            id: id.to_string(),
            probabilidade_sobrevivencia: value,
        }))
    }

    async fn scan(&self) -> Result<Vec<StoredRecord>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .map(|(id, &value)| StoredRecord {
                id: id.clone(),
                probabilidade_sobrevivencia: value,
            })
            .collect())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.records.write().await.remove(id);
        Ok(())
    }
}
