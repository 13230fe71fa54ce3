//! Numeric sanitization for exported probabilities.

use serde::{Deserialize, Serialize, Serializer};

/// Advisory smoothing floor written into every document.
///
/// Consumers substitute it for zero probabilities at inference time; the
/// exported values themselves are never floored.
pub const EPSILON: f64 = 1e-12;

/// Replace a non-finite value with `0`.
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// A probability as written to the document.
///
/// Construction sanitizes, and so does serialization, so a non-finite value
/// can never reach the output.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Probability(f64);

impl Probability {
    pub fn new(value: f64) -> Self {
        Self(sanitize(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Probability {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl Serialize for Probability {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(sanitize(self.0))
    }
}
