//! Dataset description and resolved schema types.

use serde::{Deserialize, Serialize};

/// Declared type of a dataset attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AttributeKind {
    /// Finite enumerated domain, in declared order.
    Nominal { values: Vec<String> },
    /// Real or integer valued.
    Numeric,
    /// Free text.
    String,
    /// Date, with an optional format pattern.
    Date {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
    },
    /// Nested relation (multi-instance data).
    Relational,
}

impl AttributeKind {
    /// The value domain, if the attribute has a discrete one.
    pub fn values(&self) -> Option<&[String]> {
        match self {
            AttributeKind::Nominal { values } => Some(values),
            _ => None,
        }
    }

    /// Short human-readable name of the kind.
    pub fn label(&self) -> &'static str {
        match self {
            AttributeKind::Nominal { .. } => "nominal",
            AttributeKind::Numeric => "numeric",
            AttributeKind::String => "string",
            AttributeKind::Date { .. } => "date",
            AttributeKind::Relational => "relational",
        }
    }
}

/// One attribute of a dataset description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetAttribute {
    pub name: String,
    #[serde(flatten)]
    pub kind: AttributeKind,
}

impl DatasetAttribute {
    /// Create a nominal attribute.
    pub fn nominal<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            kind: AttributeKind::Nominal {
                values: values.into_iter().map(Into::into).collect(),
            },
        }
    }

    /// Create an attribute of any kind.
    pub fn new(name: impl Into<String>, kind: AttributeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Description of the training dataset: attributes and class designation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetDescription {
    /// Relation (dataset) name.
    #[serde(default)]
    pub relation: String,
    /// Attributes in declared order.
    pub attributes: Vec<DatasetAttribute>,
    /// Zero-based index of the explicitly designated class attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_index: Option<usize>,
}

impl DatasetDescription {
    /// Create a description with no class designation.
    pub fn new(relation: impl Into<String>, attributes: Vec<DatasetAttribute>) -> Self {
        Self {
            relation: relation.into(),
            attributes,
            class_index: None,
        }
    }

    /// Designate the class attribute explicitly.
    pub fn with_class_index(mut self, index: usize) -> Self {
        self.class_index = Some(index);
        self
    }

    /// Number of attributes, class attribute included.
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    /// Position of an attribute by name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name == name)
    }
}

/// The class attribute and its labels, in authoritative order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSchema {
    /// Name of the class attribute.
    pub attribute: String,
    /// Class labels; position `i` is class index `i` of the prior.
    pub labels: Vec<String>,
}

impl ClassSchema {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// A predictor attribute with its discrete domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSchema {
    pub name: String,
    pub values: Vec<String>,
}

/// Output of schema resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSchema {
    pub classes: ClassSchema,
    /// Predictor attributes in dataset order.
    pub attributes: Vec<AttributeSchema>,
    /// Position of the class attribute in the dataset.
    pub class_index: usize,
    /// Number of dataset attributes, class attribute included.
    pub dataset_attributes: usize,
}
