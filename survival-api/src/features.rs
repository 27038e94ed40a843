//! Feature vector validation
//!
//! Checks shape and categorical domains only. Continuous features (age, parch,
//! sibsp, fare) are accepted as any real number and scored as-is.

use survival_common::passenger::{
    EMBARKED_Q, EMBARKED_S, FEATURE_COUNT, FEATURE_NAMES, PCLASS, SEX_MALE,
};

use crate::error::ValidationError;

const PCLASS_VALUES: [f64; 3] = [1.0, 2.0, 3.0];
const BINARY_VALUES: [f64; 2] = [0.0, 1.0];

/// A feature vector that passed validation, in model input order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidVector([f64; FEATURE_COUNT]);

impl ValidVector {
    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }
}

/// Validate a raw feature vector
///
/// Returns the values unchanged (no clamping, no coercion).
pub fn validate(values: &[f64]) -> Result<ValidVector, ValidationError> {
    let features: [f64; FEATURE_COUNT] = values
        .try_into()
        .map_err(|_| ValidationError::InvalidLength {
            actual: values.len(),
        })?;

    check_domain(&features, PCLASS, &PCLASS_VALUES)?;
    for index in [SEX_MALE, EMBARKED_Q, EMBARKED_S] {
        check_domain(&features, index, &BINARY_VALUES)?;
    }

    Ok(ValidVector(features))
}

fn check_domain(
    features: &[f64; FEATURE_COUNT],
    index: usize,
    allowed: &[f64],
) -> Result<(), ValidationError> {
    let value = features[index];
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidDomain {
            name: FEATURE_NAMES[index],
            index,
            value,
        })
    }
}
