//! Passenger record service
//!
//! Orchestrates validate → score → generate id → persist, plus list/get/delete.
//! Holds no record state of its own: every operation round-trips to the store,
//! and create commits before returning.

use std::sync::Arc;

use survival_common::events::EventLog;
use survival_common::{ids, PassengerRecord, Probability};
use tracing::debug;

use crate::error::ServiceError;
use crate::features;
use crate::model::{self, Classifier};
use crate::store::{RecordStore, StoredRecord};

/// Passenger scoring and record lifecycle
pub struct PassengerService {
    classifier: Arc<dyn Classifier>,
    store: Arc<dyn RecordStore>,
    events: EventLog,
}

impl PassengerService {
    pub fn new(
        classifier: Arc<dyn Classifier>,
        store: Arc<dyn RecordStore>,
        events: EventLog,
    ) -> Self {
        Self {
            classifier,
            store,
            events,
        }
    }

    /// Score a feature vector and persist the result under a fresh id
    ///
    /// No rollback: if the store write fails the generated id is discarded.
    pub async fn create(&self, values: &[f64]) -> Result<PassengerRecord, ServiceError> {
        let vector = features::validate(values)?;

        let probability = match model::score(self.classifier.as_ref(), &vector).await {
            Ok(p) => p,
            Err(e) => {
                self.events.emit_error(&format!(
                    "Erro ao calcular a probabilidade de sobrevivência: {}",
                    e
                ));
                return Err(e.into());
            }
        };

        let id = ids::generate();
        self.store
            .put(&StoredRecord {
                id: id.clone(),
                probabilidade_sobrevivencia: probability.to_fixed_point(),
            })
            .await?;
        self.events
            .emit(&format!("Dados salvos no banco para o ID: {}", id));

        Ok(PassengerRecord { id, probability })
    }

    /// All stored records, unordered
    pub async fn list(&self) -> Result<Vec<PassengerRecord>, ServiceError> {
        let records = self.store.scan().await?;
        debug!("Scanned {} records", records.len());
        Ok(records.into_iter().map(decode).collect())
    }

    /// Probability of one record
    pub async fn get(&self, id: &str) -> Result<Probability, ServiceError> {
        self.store
            .get(id)
            .await?
            .map(|record| decode(record).probability)
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    /// Delete an existing record
    ///
    /// Existence check and delete are two store calls and are not atomic: a
    /// concurrent delete of the same id between them goes unnoticed, and the
    /// slower caller may see either success or `NotFound`.
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        if self.store.get(id).await?.is_none() {
            return Err(ServiceError::NotFound(id.to_string()));
        }
        self.store.delete(id).await?;
        self.events.emit(&format!("Registro removido para o ID: {}", id));
        Ok(())
    }
}

fn decode(record: StoredRecord) -> PassengerRecord {
    PassengerRecord {
        id: record.id,
        probability: Probability::from_fixed_point(record.probabilidade_sobrevivencia),
    }
}
