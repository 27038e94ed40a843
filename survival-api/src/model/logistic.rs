//! Logistic-regression model artifact
//!
//! Artifact format (JSON):
//!
//! ```json
//! {
//!   "kind": "logistic_regression",
//!   "feature_names": ["age", "parch", "sibsp", "fare", "pclass", "sex_male", "embarked_Q", "embarked_S"],
//!   "coefficients": [-0.04, -0.1, -0.35, 0.002, -1.1, -2.6, -0.1, -0.4],
//!   "intercept": 4.9
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use survival_common::passenger::{FEATURE_COUNT, FEATURE_NAMES};

use super::Classifier;
use crate::error::ScoringError;

const KIND: &str = "logistic_regression";

/// Trained logistic-regression classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub kind: String,
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LogisticModel {
    /// Build a model over the standard feature layout
    pub fn new(coefficients: [f64; FEATURE_COUNT], intercept: f64) -> Self {
        Self {
            kind: KIND.to_string(),
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            coefficients: coefficients.to_vec(),
            intercept,
        }
    }

    /// Parse and check an artifact
    pub fn from_json(bytes: &[u8]) -> Result<Self, ScoringError> {
        let model: LogisticModel = serde_json::from_slice(bytes)
            .map_err(|e| ScoringError::Artifact(format!("malformed artifact: {}", e)))?;
        model.check()?;
        Ok(model)
    }

    fn check(&self) -> Result<(), ScoringError> {
        if self.kind != KIND {
            return Err(ScoringError::Artifact(format!(
                "unsupported model kind: {}",
                self.kind
            )));
        }
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(ScoringError::Artifact(format!(
                "expected {} coefficients, artifact has {}",
                FEATURE_COUNT,
                self.coefficients.len()
            )));
        }
        if self.feature_names.iter().map(String::as_str).ne(FEATURE_NAMES) {
            return Err(ScoringError::Artifact(format!(
                "feature layout mismatch: expected {:?}, artifact has {:?}",
                FEATURE_NAMES, self.feature_names
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|w| !w.is_finite()) {
            return Err(ScoringError::Artifact(
                "artifact contains non-finite parameters".to_string(),
            ));
        }
        Ok(())
    }

    /// Synchronous `predict_proba`
    pub fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Result<[f64; 2], ScoringError> {
        if let Some(i) = features.iter().position(|x| !x.is_finite()) {
            return Err(ScoringError::Prediction(format!(
                "feature {} is not a finite number",
                FEATURE_NAMES[i]
            )));
        }

        let z = self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(w, x)| w * x)
                .sum::<f64>();
        let p = 1.0 / (1.0 + (-z).exp());

        if !p.is_finite() {
            return Err(ScoringError::Prediction(format!(
                "decision function overflowed: {}",
                z
            )));
        }
        Ok([1.0 - p, p])
    }
}

#[async_trait]
impl Classifier for LogisticModel {
    async fn predict_proba(
        &self,
        features: &[f64; FEATURE_COUNT],
    ) -> Result<[f64; 2], ScoringError> {
        self.predict(features)
    }
}
