//! Extraction of Naive Bayes parameters from a model's internal fields.
//!
//! The parameters live in two fields the library does not expose. Which
//! fields, for which runtime type, is recorded in [`PROFILES`]; a library
//! upgrade that renames them fails here with an [`ExportError::Introspection`]
//! rather than producing a wrong document.

use serde_json::Value;

use crate::error::{ExportError, Result};

use super::estimator::Estimator;
use super::object::{ModelHandle, ObjectNode};
use super::table::DistributionTable;

/// Where a model variant keeps its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntrospectionProfile {
    /// Runtime type name of the model.
    pub variant: &'static str,
    /// Field holding the class-prior distribution.
    pub class_distribution_field: &'static str,
    /// Field holding the `[attribute][class]` conditional distributions.
    pub distributions_field: &'static str,
}

/// Supported model variants.
pub const PROFILES: &[IntrospectionProfile] = &[
    IntrospectionProfile {
        variant: "weka.classifiers.bayes.NaiveBayes",
        class_distribution_field: "m_ClassDistribution",
        distributions_field: "m_Distributions",
    },
    IntrospectionProfile {
        variant: "weka.classifiers.bayes.NaiveBayesUpdateable",
        class_distribution_field: "m_ClassDistribution",
        distributions_field: "m_Distributions",
    },
];

/// Find the profile for a runtime type name.
pub fn profile_for(variant: &str) -> Option<&'static IntrospectionProfile> {
    PROFILES.iter().find(|p| p.variant == variant)
}

/// Parameters pulled out of a fitted model.
#[derive(Debug, Clone)]
pub struct ExtractedModel {
    /// Runtime type name of the model they came from.
    pub variant: String,
    /// P(class), queried by class position.
    pub class_prior: Estimator,
    /// P(value | class) per attribute row and class column, in the
    /// library's layout (one row per dataset attribute).
    pub distributions: DistributionTable,
}

/// Validate the model variant and extract its distributions.
pub fn introspect(model: &ModelHandle) -> Result<ExtractedModel> {
    let root = model.root();
    let profile = profile_for(&root.class_name).ok_or_else(|| ExportError::UnsupportedModelKind {
        actual: root.class_name.clone(),
    })?;

    let class_prior = extract_class_prior(root, profile)?;
    let distributions = extract_distributions(root, profile)?;

    tracing::debug!(
        variant = profile.variant,
        rows = distributions.row_count(),
        columns = distributions.column_count(),
        "extracted model distributions"
    );

    Ok(ExtractedModel {
        variant: profile.variant.to_string(),
        class_prior,
        distributions,
    })
}

fn required_field<'a>(root: &'a ObjectNode, name: &str) -> Result<&'a Value> {
    match root.field(name) {
        Some(Value::Null) => Err(ExportError::Introspection(format!(
            "field '{}' of {} is null; is the model trained?",
            name, root.class_name
        ))),
        Some(value) => Ok(value),
        None => Err(ExportError::Introspection(format!(
            "{} has no field '{}'",
            root.class_name, name
        ))),
    }
}

fn extract_class_prior(root: &ObjectNode, profile: &IntrospectionProfile) -> Result<Estimator> {
    let name = profile.class_distribution_field;
    let value = required_field(root, name)?;
    let node = ObjectNode::from_value(value).ok_or_else(|| {
        ExportError::Introspection(format!("field '{}' is not a distribution object", name))
    })?;
    Estimator::resolve(&node)
}

fn extract_distributions(
    root: &ObjectNode,
    profile: &IntrospectionProfile,
) -> Result<DistributionTable> {
    let name = profile.distributions_field;
    let rows = required_field(root, name)?.as_array().ok_or_else(|| {
        ExportError::Introspection(format!("field '{}' is not a two-dimensional array", name))
    })?;

    let mut table = Vec::with_capacity(rows.len());
    for (a, row) in rows.iter().enumerate() {
        let cells = match row {
            // The class attribute's own row is left unallocated by the library.
            Value::Null => None,
            Value::Array(cells) => Some(cells),
            _ => {
                return Err(ExportError::Introspection(format!(
                    "row {} of '{}' is not an array",
                    a, name
                )));
            }
        };

        let resolved = match cells {
            None => Vec::new(),
            Some(cells) => cells
                .iter()
                .enumerate()
                .map(|(c, cell)| match cell {
                    Value::Null => Ok(None),
                    other => {
                        let node = ObjectNode::from_value(other).ok_or_else(|| {
                            ExportError::Introspection(format!(
                                "cell [{}][{}] of '{}' is not a distribution object",
                                a, c, name
                            ))
                        })?;
                        Estimator::resolve(&node).map(Some)
                    }
                })
                .collect::<Result<Vec<_>>>()?,
        };
        table.push(resolved);
    }

    DistributionTable::from_rows(table)
}
