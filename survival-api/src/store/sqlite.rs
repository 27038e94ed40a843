//! SQLite-backed record store

use std::path::Path;

use async_trait::async_trait;
use sqlx::SqlitePool;
use survival_common::config::is_valid_table_name;
use survival_common::{Error, Result};

use super::{RecordStore, StoredRecord};

/// Record store over a single SQLite table
#[derive(Debug, Clone)]
pub struct SqliteRecordStore {
    pool: SqlitePool,
    table: String,
}

impl SqliteRecordStore {
    /// Open (creating if needed) the database file and the record table
    pub async fn open(db_path: &Path, table: &str) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        // mode=rwc: read, write, create
        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
        tracing::debug!("Connecting to database: {}", db_url);

        let pool = SqlitePool::connect(&db_url).await?;
        Self::with_pool(pool, table).await
    }

    /// Use an existing pool; creates the record table if missing
    pub async fn with_pool(pool: SqlitePool, table: &str) -> Result<Self> {
        // Table name is interpolated into SQL below
        if !is_valid_table_name(table) {
            return Err(Error::Config(format!("Invalid table name: {:?}", table)));
        }

        let store = Self {
            pool,
            table: table.to_string(),
        };
        store.init_table().await?;
        Ok(store)
    }

    async fn init_table(&self) -> Result<()> {
        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id TEXT PRIMARY KEY,
                probabilidade_sobrevivencia INTEGER NOT NULL
            )
            "#,
            self.table
        ))
        .execute(&self.pool)
        .await?;

        tracing::info!("Record table initialized ({})", self.table);
        Ok(())
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn put(&self, record: &StoredRecord) -> Result<()> {
        sqlx::query(&format!(
            "INSERT OR REPLACE INTO {} (id, probabilidade_sobrevivencia) VALUES (?, ?)",
            self.table
        ))
        .bind(&record.id)
        .bind(record.probabilidade_sobrevivencia)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<StoredRecord>> {
        let record = sqlx::query_as::<_, StoredRecord>(&format!(
            "SELECT id, probabilidade_sobrevivencia FROM {} WHERE id = ?",
            self.table
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    async fn scan(&self) -> Result<Vec<StoredRecord>> {
        let records = sqlx::query_as::<_, StoredRecord>(&format!(
            "SELECT id, probabilidade_sobrevivencia FROM {}",
            self.table
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        sqlx::query(&format!("DELETE FROM {} WHERE id = ?", self.table))
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
