//! Passenger domain types
//!
//! The feature layout is fixed by the trained model's expected input order and
//! must not change without retraining the model.

use serde::{Deserialize, Serialize};

/// Number of features in a passenger feature vector
pub const FEATURE_COUNT: usize = 8;

/// Feature names in model input order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age",
    "parch",
    "sibsp",
    "fare",
    "pclass",
    "sex_male",
    "embarked_Q",
    "embarked_S",
];

pub const AGE: usize = 0;
pub const PARCH: usize = 1;
pub const SIBSP: usize = 2;
pub const FARE: usize = 3;
pub const PCLASS: usize = 4;
pub const SEX_MALE: usize = 5;
pub const EMBARKED_Q: usize = 6;
pub const EMBARKED_S: usize = 7;

/// Survival probability on a 0-100 scale, rounded to 2 decimal places
///
/// Persisted as an integer fixed-point value (probability × 100).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Probability(f64);

impl Probability {
    /// Build from a classifier output in [0, 1]
    ///
    /// Scales to percent and rounds to 2 decimals. Values outside [0, 1] are
    /// clamped so the stored value always lies in [0, 100].
    pub fn from_fraction(p: f64) -> Self {
        Self::from_percent(p.clamp(0.0, 1.0) * 100.0)
    }

    /// Build from a percent value, rounding to 2 decimals
    pub fn from_percent(percent: f64) -> Self {
        Self::from_fixed_point((percent * 100.0).round() as i64)
    }

    /// Decode a stored fixed-point value (probability × 100)
    pub fn from_fixed_point(raw: i64) -> Self {
        Probability(raw as f64 / 100.0)
    }

    /// Encode for storage as fixed-point (probability × 100)
    ///
    /// Rounds rather than truncates, so `from_fixed_point(p.to_fixed_point()) == p`
    /// for every value already rounded to 2 decimals.
    pub fn to_fixed_point(self) -> i64 {
        (self.0 * 100.0).round() as i64
    }

    /// Percent value
    pub fn value(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for Probability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// A scored passenger record
#[derive(Debug, Clone, PartialEq)]
pub struct PassengerRecord {
    /// Opaque unique identifier (UUIDv4 string)
    pub id: String,
    /// Survival probability (0-100, 2 decimals)
    pub probability: Probability,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fraction_rounds_to_two_decimals() {
        let p = Probability::from_fraction(0.761_234_5);
        assert_eq!(p.value(), 76.12);
        assert_eq!(p.to_fixed_point(), 7612);
    }

    #[test]
    fn test_from_fraction_clamps() {
        assert_eq!(Probability::from_fraction(1.7).value(), 100.0);
        assert_eq!(Probability::from_fraction(-0.2).value(), 0.0);
    }

    #[test]
    fn test_fixed_point_round_trip() {
        // Values whose ×100 product is not exact in binary floating point
        for raw in [0_i64, 1, 29, 5429, 5657, 7612, 9999, 10000] {
            let p = Probability::from_fixed_point(raw);
            assert_eq!(p.to_fixed_point(), raw);
            assert_eq!(Probability::from_fixed_point(p.to_fixed_point()), p);
        }
    }

    #[test]
    fn test_encoding_does_not_truncate() {
        // 54.29 * 100 = 5428.999999999999 in f64
        let p = Probability::from_percent(54.29);
        assert_eq!(p.to_fixed_point(), 5429);
    }

    #[test]
    fn test_feature_names_match_indices() {
        assert_eq!(FEATURE_NAMES[PCLASS], "pclass");
        assert_eq!(FEATURE_NAMES[SEX_MALE], "sex_male");
        assert_eq!(FEATURE_NAMES[EMBARKED_Q], "embarked_Q");
        assert_eq!(FEATURE_NAMES[EMBARKED_S], "embarked_S");
        assert_eq!(FEATURE_NAMES[AGE], "age");
        assert_eq!(FEATURE_NAMES[PARCH], "parch");
        assert_eq!(FEATURE_NAMES[SIBSP], "sibsp");
        assert_eq!(FEATURE_NAMES[FARE], "fare");
    }
}
