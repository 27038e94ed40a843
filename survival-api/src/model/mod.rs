//! Classifier adapter
//!
//! The trained model is a black box exposing `predict_proba(features) ->
//! [p_died, p_survived]`. This module surfaces `p_survived` as a [`Probability`]
//! (percent, 2 decimals).

pub mod artifact;
pub mod logistic;

pub use artifact::{ArtifactClassifier, ArtifactSource};
pub use logistic::LogisticModel;

use async_trait::async_trait;
use survival_common::passenger::FEATURE_COUNT;
use survival_common::Probability;

use crate::error::ScoringError;
use crate::features::ValidVector;

/// Binary classifier over the passenger feature layout
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Class probabilities `[p_died, p_survived]`
    async fn predict_proba(
        &self,
        features: &[f64; FEATURE_COUNT],
    ) -> Result<[f64; 2], ScoringError>;
}

/// Score a validated vector
///
/// No retry: a failure is returned to the caller immediately.
pub async fn score(
    classifier: &dyn Classifier,
    vector: &ValidVector,
) -> Result<Probability, ScoringError> {
    let [_, survived] = classifier.predict_proba(vector.as_array()).await?;
    if !survived.is_finite() {
        return Err(ScoringError::Prediction(format!(
            "model returned non-finite probability: {}",
            survived
        )));
    }
    Ok(Probability::from_fraction(survived))
}
