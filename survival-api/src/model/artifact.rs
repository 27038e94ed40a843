//! Model artifact loading
//!
//! The artifact lives either on local disk or in an object store bucket. Object
//! store artifacts are downloaded to the local model path before parsing.
//! The parsed model is cached for the life of the process; a failed load is
//! not cached, so a later request can succeed once the artifact is available.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use survival_common::config::ServiceConfig;
use survival_common::events::EventLog;
use survival_common::passenger::FEATURE_COUNT;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::{Classifier, LogisticModel};
use crate::error::ScoringError;

/// Where the model artifact is read from
#[derive(Debug, Clone, PartialEq)]
pub enum ArtifactSource {
    /// Local file
    Local(PathBuf),
    /// `GET {endpoint}/{bucket}/{key}`, cached to `cache_path`
    ObjectStore {
        endpoint: String,
        bucket: String,
        key: String,
        cache_path: PathBuf,
    },
}

impl ArtifactSource {
    /// Object store when a bucket is configured, local path otherwise
    pub fn from_config(config: &ServiceConfig) -> Self {
        match &config.artifact_bucket {
            Some(bucket) => ArtifactSource::ObjectStore {
                endpoint: config.artifact_endpoint.clone(),
                bucket: bucket.clone(),
                key: config.artifact_key.clone(),
                cache_path: config.model_path.clone(),
            },
            None => ArtifactSource::Local(config.model_path.clone()),
        }
    }

    /// Human-readable location for logs
    pub fn describe(&self) -> String {
        match self {
            ArtifactSource::Local(path) => path.display().to_string(),
            ArtifactSource::ObjectStore { endpoint, bucket, key, .. } => {
                object_url(endpoint, bucket, key)
            }
        }
    }

    /// Read the raw artifact bytes
    pub async fn fetch(&self) -> Result<Vec<u8>, ScoringError> {
        match self {
            ArtifactSource::Local(path) => read_local(path).await,
            ArtifactSource::ObjectStore { endpoint, bucket, key, cache_path } => {
                let bytes = download(&object_url(endpoint, bucket, key)).await?;
                write_cache(cache_path, &bytes).await?;
                Ok(bytes)
            }
        }
    }
}

fn object_url(endpoint: &str, bucket: &str, key: &str) -> String {
    format!(
        "{}/{}/{}",
        endpoint.trim_end_matches('/'),
        bucket,
        key.trim_start_matches('/')
    )
}

async fn read_local(path: &Path) -> Result<Vec<u8>, ScoringError> {
    tokio::fs::read(path)
        .await
        .map_err(|e| ScoringError::Artifact(format!("{}: {}", path.display(), e)))
}

async fn download(url: &str) -> Result<Vec<u8>, ScoringError> {
    debug!("Downloading model artifact from {}", url);
    let response = reqwest::get(url)
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| ScoringError::Artifact(format!("download {} failed: {}", url, e)))?;
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ScoringError::Artifact(format!("download {} failed: {}", url, e)))?;
    Ok(bytes.to_vec())
}

async fn write_cache(path: &Path, bytes: &[u8]) -> Result<(), ScoringError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| ScoringError::Artifact(format!("{}: {}", parent.display(), e)))?;
    }
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| ScoringError::Artifact(format!("{}: {}", path.display(), e)))
}

/// Classifier backed by a lazily loaded artifact
pub struct ArtifactClassifier {
    source: ArtifactSource,
    model: OnceCell<Arc<LogisticModel>>,
    events: EventLog,
}

impl ArtifactClassifier {
    pub fn new(source: ArtifactSource, events: EventLog) -> Self {
        Self {
            source,
            model: OnceCell::new(),
            events,
        }
    }

    pub fn source(&self) -> &ArtifactSource {
        &self.source
    }

    /// Load the artifact if it is not cached yet
    pub async fn load(&self) -> Result<Arc<LogisticModel>, ScoringError> {
        self.model
            .get_or_try_init(|| async {
                let bytes = self.source.fetch().await?;
                let model = LogisticModel::from_json(&bytes)?;
                info!("Model artifact loaded from {}", self.source.describe());
                self.events.emit("Modelo carregado.");
                Ok::<_, ScoringError>(Arc::new(model))
            })
            .await
            .cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.model.initialized()
    }
}

#[async_trait]
impl Classifier for ArtifactClassifier {
    async fn predict_proba(
        &self,
        features: &[f64; FEATURE_COUNT],
    ) -> Result<[f64; 2], ScoringError> {
        self.load().await?.predict(features)
    }
}
