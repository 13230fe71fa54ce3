//! The exported model document and its builder.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, Result};
use crate::model::{DistributionTable, ProbabilityQueryable, probability};
use crate::schema::{AttributeSchema, ClassSchema};

use super::numeric::{EPSILON, Probability};

/// One predictor attribute of the exported model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeExport {
    pub name: String,
    pub values: Vec<String>,
    /// Per class label, P(value | class) aligned with `values`.
    pub cond_probs: IndexMap<String, Vec<Probability>>,
}

/// Self-contained description of a Naive Bayes classifier.
///
/// Serializes to the portable JSON document. Map keys keep the order of
/// `classes`, so the output is deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedModel {
    pub class_attribute: String,
    pub classes: Vec<String>,
    pub class_priors: IndexMap<String, Probability>,
    pub attributes: Vec<AttributeExport>,
    pub epsilon: f64,
}

impl ExportedModel {
    /// Prior of a class label.
    pub fn prior(&self, class: &str) -> Option<f64> {
        self.class_priors.get(class).map(|p| p.value())
    }

    /// Predictor attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&AttributeExport> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

/// Assemble the document from a resolved schema and extracted distributions.
///
/// `table` must already be aligned with `attributes` (one row per predictor,
/// one column per class). A discrete distribution must cover exactly the
/// declared domain: the prior one value per class, each cell one per
/// attribute value.
pub fn build_document<P>(
    classes: &ClassSchema,
    attributes: &[AttributeSchema],
    prior: &P,
    table: &DistributionTable,
) -> Result<ExportedModel>
where
    P: ProbabilityQueryable + ?Sized,
{
    check_domain(prior, classes.len(), || format!("class prior for '{}'", classes.attribute))?;

    let mut class_priors = IndexMap::with_capacity(classes.len());
    for (c, label) in classes.labels.iter().enumerate() {
        class_priors.insert(label.clone(), Probability::new(probability(prior, c)?));
    }

    let mut exported = Vec::with_capacity(attributes.len());
    for (a, attribute) in attributes.iter().enumerate() {
        let mut cond_probs = IndexMap::with_capacity(classes.len());
        for (c, label) in classes.labels.iter().enumerate() {
            let distribution = table.get(a, c).ok_or_else(|| {
                ExportError::Introspection(format!(
                    "no distribution for attribute '{}' under class '{}'",
                    attribute.name, label
                ))
            })?;
            check_domain(distribution, attribute.values.len(), || {
                format!("distribution of '{}' under class '{}'", attribute.name, label)
            })?;
            let row = (0..attribute.values.len())
                .map(|v| probability(distribution, v).map(Probability::new))
                .collect::<Result<Vec<_>>>()?;
            cond_probs.insert(label.clone(), row);
        }

        exported.push(AttributeExport {
            name: attribute.name.clone(),
            values: attribute.values.clone(),
            cond_probs,
        });
    }

    Ok(ExportedModel {
        class_attribute: classes.attribute.clone(),
        classes: classes.labels.clone(),
        class_priors,
        attributes: exported,
        epsilon: EPSILON,
    })
}

/// Reject a distribution whose domain differs from the schema's.
///
/// Distributions without a fixed domain (real-valued ones) are not checked.
fn check_domain<D>(
    distribution: &D,
    expected: usize,
    describe: impl FnOnce() -> String,
) -> Result<()>
where
    D: ProbabilityQueryable + ?Sized,
{
    match distribution.domain_size() {
        Some(actual) if actual != expected => Err(ExportError::Introspection(format!(
            "{} covers {} values, the dataset declares {}",
            describe(),
            actual,
            expected
        ))),
        _ => Ok(()),
    }
}
