//! Probability accessors for the distribution objects held by a model.
//!
//! Distribution objects answer point queries in one of two call shapes: by
//! integer index, or by the index expressed as a real value. The shape is
//! resolved once per object when it is extracted ([`Estimator::resolve`]),
//! and [`probability`] dispatches on it for every query.

use serde_json::Value;

use crate::error::{ExportError, Result};
use crate::export::sanitize;

use super::object::ObjectNode;

/// Runtime type of the library's discrete (count based) estimator.
pub const DISCRETE_ESTIMATOR: &str = "weka.estimators.DiscreteEstimator";

/// Runtime type of the library's Gaussian estimator.
pub const NORMAL_ESTIMATOR: &str = "weka.estimators.NormalEstimator";

/// How a distribution expects its query argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryShape {
    /// Queried with a zero-based integer index.
    Index,
    /// Queried with the index converted to a real number.
    Real,
}

/// A distribution that can be asked for the probability at a point.
///
/// Implementors declare their [`QueryShape`] and override the matching
/// accessor. Callers go through [`probability`], which picks the accessor and
/// sanitizes the result.
pub trait ProbabilityQueryable {
    /// Runtime type name of the underlying object.
    fn type_name(&self) -> &str;

    /// The call shape this distribution supports.
    fn shape(&self) -> QueryShape;

    /// Number of values in a finite domain, `None` for real-valued
    /// distributions.
    fn domain_size(&self) -> Option<usize> {
        None
    }

    /// Probability at an integer index.
    fn probability_at_index(&self, _index: usize) -> Result<f64> {
        Err(ExportError::NoProbabilityAccessor {
            class: self.type_name().to_string(),
        })
    }

    /// Probability at a real-valued point.
    fn probability_at_value(&self, _value: f64) -> Result<f64> {
        Err(ExportError::NoProbabilityAccessor {
            class: self.type_name().to_string(),
        })
    }
}

/// Query a distribution at a discrete index.
///
/// Non-finite results are coerced to `0`.
pub fn probability<D>(distribution: &D, index: usize) -> Result<f64>
where
    D: ProbabilityQueryable + ?Sized,
{
    let raw = match distribution.shape() {
        QueryShape::Index => distribution.probability_at_index(index)?,
        QueryShape::Real => distribution.probability_at_value(index as f64)?,
    };
    Ok(sanitize(raw))
}

/// Count based distribution over a finite domain.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteEstimator {
    pub counts: Vec<f64>,
    pub sum_of_counts: f64,
}

impl ProbabilityQueryable for DiscreteEstimator {
    fn type_name(&self) -> &str {
        DISCRETE_ESTIMATOR
    }

    fn shape(&self) -> QueryShape {
        QueryShape::Index
    }

    fn domain_size(&self) -> Option<usize> {
        Some(self.counts.len())
    }

    fn probability_at_index(&self, index: usize) -> Result<f64> {
        let count = self.counts.get(index).ok_or_else(|| {
            ExportError::Introspection(format!(
                "value index {} out of range for estimator with {} values",
                index,
                self.counts.len()
            ))
        })?;

        if self.sum_of_counts == 0.0 {
            return Ok(0.0);
        }
        Ok(count / self.sum_of_counts)
    }
}

/// Gaussian distribution queried over precision-wide bins.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalEstimator {
    pub mean: f64,
    pub standard_dev: f64,
    pub precision: f64,
    pub sum_of_weights: f64,
}

impl NormalEstimator {
    fn round(&self, value: f64) -> f64 {
        if self.precision > 0.0 {
            (value / self.precision).round_ties_even() * self.precision
        } else {
            value
        }
    }
}

impl ProbabilityQueryable for NormalEstimator {
    fn type_name(&self) -> &str {
        NORMAL_ESTIMATOR
    }

    fn shape(&self) -> QueryShape {
        QueryShape::Real
    }

    fn probability_at_value(&self, value: f64) -> Result<f64> {
        if self.sum_of_weights == 0.0 {
            return Ok(0.0);
        }
        let value = self.round(value);
        let half = self.precision / 2.0;
        let z_lower = (value - self.mean - half) / self.standard_dev;
        let z_upper = (value - self.mean + half) / self.standard_dev;
        Ok(normal_cdf(z_upper) - normal_cdf(z_lower))
    }
}

/// A distribution object with its accessor resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum Estimator {
    Discrete(DiscreteEstimator),
    Normal(NormalEstimator),
}

impl Estimator {
    /// Resolve the accessor for a dumped distribution object.
    ///
    /// Known runtime types are matched by name. Anything else is probed for
    /// the fields a known accessor needs.
    pub fn resolve(node: &ObjectNode) -> Result<Self> {
        match node.class_name.as_str() {
            DISCRETE_ESTIMATOR => discrete_from(node).map(Estimator::Discrete),
            NORMAL_ESTIMATOR => normal_from(node).map(Estimator::Normal),
            _ if node.has_field("m_Counts") => discrete_from(node).map(Estimator::Discrete),
            _ if node.has_field("m_Mean") && node.has_field("m_StandardDev") => {
                normal_from(node).map(Estimator::Normal)
            }
            other => Err(ExportError::NoProbabilityAccessor {
                class: other.to_string(),
            }),
        }
    }

    fn inner(&self) -> &dyn ProbabilityQueryable {
        match self {
            Estimator::Discrete(e) => e,
            Estimator::Normal(e) => e,
        }
    }
}

impl ProbabilityQueryable for Estimator {
    fn type_name(&self) -> &str {
        self.inner().type_name()
    }

    fn shape(&self) -> QueryShape {
        self.inner().shape()
    }

    fn domain_size(&self) -> Option<usize> {
        self.inner().domain_size()
    }

    fn probability_at_index(&self, index: usize) -> Result<f64> {
        self.inner().probability_at_index(index)
    }

    fn probability_at_value(&self, value: f64) -> Result<f64> {
        self.inner().probability_at_value(value)
    }
}

fn discrete_from(node: &ObjectNode) -> Result<DiscreteEstimator> {
    let counts = number_array_field(node, "m_Counts")?;
    let sum_of_counts = match node.field("m_SumOfCounts") {
        Some(_) => number_field(node, "m_SumOfCounts")?,
        None => counts.iter().sum(),
    };
    Ok(DiscreteEstimator {
        counts,
        sum_of_counts,
    })
}

fn normal_from(node: &ObjectNode) -> Result<NormalEstimator> {
    Ok(NormalEstimator {
        mean: number_field(node, "m_Mean")?,
        standard_dev: number_field(node, "m_StandardDev")?,
        precision: number_field(node, "m_Precision")?,
        sum_of_weights: number_field(node, "m_SumOfWeights")?,
    })
}

/// Numbers may be dumped as strings to carry `NaN` and infinities.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn number_field(node: &ObjectNode, name: &str) -> Result<f64> {
    node.field(name).and_then(as_number).ok_or_else(|| {
        ExportError::Introspection(format!(
            "{} has no numeric field '{}'",
            node.class_name, name
        ))
    })
}

fn number_array_field(node: &ObjectNode, name: &str) -> Result<Vec<f64>> {
    let malformed = || {
        ExportError::Introspection(format!(
            "{} has no numeric array field '{}'",
            node.class_name, name
        ))
    };
    let items = node
        .field(name)
        .and_then(Value::as_array)
        .ok_or_else(malformed)?;
    items
        .iter()
        .map(|item| as_number(item).ok_or_else(malformed))
        .collect()
}

/// Standard normal cumulative distribution function.
fn normal_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / std::f64::consts::SQRT_2)
}

/// Complementary error function (Chebyshev fit, fractional error < 1.2e-7).
fn erfc(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + 0.5 * z);
    let poly = -z * z - 1.265_512_23
        + t * (1.000_023_68
            + t * (0.374_091_96
                + t * (0.096_784_18
                    + t * (-0.186_288_06
                        + t * (0.278_868_07
                            + t * (-1.135_203_98
                                + t * (1.488_515_87
                                    + t * (-0.822_152_23 + t * 0.170_872_77))))))));
    let r = t * poly.exp();
    if x >= 0.0 { r } else { 2.0 - r }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn discrete(counts: &[f64]) -> ObjectNode {
        ObjectNode::new(DISCRETE_ESTIMATOR)
            .with_field("m_Counts", json!(counts))
            .with_field("m_SumOfCounts", json!(counts.iter().sum::<f64>()))
    }

    #[test]
    fn test_discrete_probability_by_index() {
        let est = Estimator::resolve(&discrete(&[6.0, 4.0])).unwrap();
        assert_eq!(est.shape(), QueryShape::Index);
        assert_eq!(probability(&est, 0).unwrap(), 0.6);
        assert_eq!(probability(&est, 1).unwrap(), 0.4);
    }

    #[test]
    fn test_domain_size() {
        let est = Estimator::resolve(&discrete(&[1.0, 2.0, 3.0])).unwrap();
        assert_eq!(est.domain_size(), Some(3));

        let node = ObjectNode::new(NORMAL_ESTIMATOR)
            .with_field("m_Mean", json!(0.0))
            .with_field("m_StandardDev", json!(1.0))
            .with_field("m_Precision", json!(0.1))
            .with_field("m_SumOfWeights", json!(1.0));
        assert_eq!(Estimator::resolve(&node).unwrap().domain_size(), None);
    }

    #[test]
    fn test_discrete_zero_sum_is_zero() {
        let est = Estimator::resolve(&discrete(&[0.0, 0.0])).unwrap();
        assert_eq!(probability(&est, 1).unwrap(), 0.0);
    }

    #[test]
    fn test_discrete_index_out_of_range() {
        let est = Estimator::resolve(&discrete(&[1.0, 1.0])).unwrap();
        let err = probability(&est, 2).unwrap_err();
        assert!(matches!(err, ExportError::Introspection(_)));
    }

    #[test]
    fn test_discrete_sum_defaults_to_total() {
        let node = ObjectNode::new(DISCRETE_ESTIMATOR).with_field("m_Counts", json!([1, 3]));
        let est = Estimator::resolve(&node).unwrap();
        assert_eq!(probability(&est, 1).unwrap(), 0.75);
    }

    #[test]
    fn test_non_finite_is_sanitized() {
        let node = ObjectNode::new(DISCRETE_ESTIMATOR)
            .with_field("m_Counts", json!(["NaN", "Infinity"]))
            .with_field("m_SumOfCounts", json!(2.0));
        let est = Estimator::resolve(&node).unwrap();
        assert_eq!(probability(&est, 0).unwrap(), 0.0);
        assert_eq!(probability(&est, 1).unwrap(), 0.0);
    }

    #[test]
    fn test_normal_probability_by_value() {
        let node = ObjectNode::new(NORMAL_ESTIMATOR)
            .with_field("m_Mean", json!(0.0))
            .with_field("m_StandardDev", json!(1.0))
            .with_field("m_Precision", json!(1.0))
            .with_field("m_SumOfWeights", json!(10.0));
        let est = Estimator::resolve(&node).unwrap();
        assert_eq!(est.shape(), QueryShape::Real);

        // Mass of N(0, 1) over [-0.5, 0.5].
        let p = probability(&est, 0).unwrap();
        assert!((p - 0.382_924_9).abs() < 1e-6, "got {p}");
        // Symmetric bin one step out: [0.5, 1.5].
        let p1 = probability(&est, 1).unwrap();
        assert!((p1 - 0.241_730_3).abs() < 1e-6, "got {p1}");
    }

    #[test]
    fn test_normal_without_weight_is_zero() {
        let node = ObjectNode::new(NORMAL_ESTIMATOR)
            .with_field("m_Mean", json!(3.0))
            .with_field("m_StandardDev", json!(1.0))
            .with_field("m_Precision", json!(0.01))
            .with_field("m_SumOfWeights", json!(0.0));
        let est = Estimator::resolve(&node).unwrap();
        assert_eq!(probability(&est, 3).unwrap(), 0.0);
    }

    #[test]
    fn test_unknown_type_is_probed_structurally() {
        let node = ObjectNode::new("weka.estimators.DiscreteEstimatorBayes")
            .with_field("m_Counts", json!([1.0, 1.0]))
            .with_field("m_SumOfCounts", json!(2.0));
        let est = Estimator::resolve(&node).unwrap();
        assert!(matches!(est, Estimator::Discrete(_)));
        assert_eq!(probability(&est, 0).unwrap(), 0.5);
    }

    #[test]
    fn test_no_accessor() {
        let node = ObjectNode::new("weka.estimators.KernelEstimator")
            .with_field("m_Values", json!([1.0, 2.0]));
        let err = Estimator::resolve(&node).unwrap_err();
        match err {
            ExportError::NoProbabilityAccessor { class } => {
                assert_eq!(class, "weka.estimators.KernelEstimator")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_known_type_with_missing_fields() {
        let node = ObjectNode::new(NORMAL_ESTIMATOR).with_field("m_Mean", json!(1.0));
        let err = Estimator::resolve(&node).unwrap_err();
        assert!(matches!(err, ExportError::Introspection(_)));
    }

    #[test]
    fn test_erfc_limits() {
        assert!((erfc(0.0) - 1.0).abs() < 1e-7);
        assert_eq!(erfc(f64::INFINITY), 0.0);
        assert_eq!(erfc(f64::NEG_INFINITY), 2.0);
        assert!((normal_cdf(1.96) - 0.975).abs() < 1e-4);
    }
}
