//! Resolution of class labels and predictor attributes.

use std::collections::HashSet;

use crate::error::{ExportError, Result};

use super::types::{
    AttributeSchema, ClassSchema, DatasetAttribute, DatasetDescription, ResolvedSchema,
};

/// How the class attribute is chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ClassSelector {
    /// The description's own designation, or the last attribute if it has none.
    #[default]
    Declared,
    /// Zero-based attribute position.
    Index(usize),
    /// Attribute name.
    Name(String),
}

impl ClassSelector {
    fn select(&self, description: &DatasetDescription) -> Result<usize> {
        let count = description.attribute_count();
        if count == 0 {
            return Err(ExportError::EmptyData(
                "dataset description has no attributes".to_string(),
            ));
        }

        let index = match self {
            ClassSelector::Declared => description.class_index.unwrap_or(count - 1),
            ClassSelector::Index(i) => *i,
            ClassSelector::Name(name) => description.position(name).ok_or_else(|| {
                ExportError::Config(format!("no attribute named '{}' in the dataset", name))
            })?,
        };

        if index >= count {
            return Err(ExportError::Config(format!(
                "class index {} out of range for {} attributes",
                index, count
            )));
        }
        Ok(index)
    }
}

fn discrete_values(attribute: &DatasetAttribute) -> Result<Vec<String>> {
    attribute
        .kind
        .values()
        .map(<[String]>::to_vec)
        .ok_or_else(|| ExportError::NonCategoricalAttribute {
            name: attribute.name.clone(),
            kind: attribute.kind.label().to_string(),
        })
}

/// Resolve the class schema and predictor attributes of a dataset.
pub fn resolve(
    description: &DatasetDescription,
    selector: &ClassSelector,
) -> Result<ResolvedSchema> {
    let class_index = selector.select(description)?;
    let class_attribute = &description.attributes[class_index];

    let labels = discrete_values(class_attribute)?;
    let mut seen = HashSet::new();
    if let Some(dup) = labels.iter().find(|l| !seen.insert(l.as_str())) {
        return Err(ExportError::Schema(format!(
            "class attribute '{}' declares label '{}' more than once",
            class_attribute.name, dup
        )));
    }

    let attributes = description
        .attributes
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != class_index)
        .map(|(_, attribute)| {
            Ok(AttributeSchema {
                name: attribute.name.clone(),
                values: discrete_values(attribute)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        class_attribute = %class_attribute.name,
        classes = labels.len(),
        predictors = attributes.len(),
        "resolved dataset schema"
    );

    Ok(ResolvedSchema {
        classes: ClassSchema {
            attribute: class_attribute.name.clone(),
            labels,
        },
        attributes,
        class_index,
        dataset_attributes: description.attribute_count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::AttributeKind;

    fn weather() -> DatasetDescription {
        DatasetDescription::new(
            "weather",
            vec![
                DatasetAttribute::nominal("outlook", ["sunny", "overcast", "rainy"]),
                DatasetAttribute::nominal("windy", ["TRUE", "FALSE"]),
                DatasetAttribute::nominal("play", ["yes", "no"]),
            ],
        )
    }

    #[test]
    fn test_defaults_to_last_attribute() {
        let resolved = resolve(&weather(), &ClassSelector::Declared).unwrap();

        assert_eq!(resolved.classes.attribute, "play");
        assert_eq!(resolved.classes.labels, vec!["yes", "no"]);
        assert_eq!(resolved.class_index, 2);
        assert_eq!(resolved.attributes.len(), 2);
        assert_eq!(resolved.attributes[0].name, "outlook");
        assert_eq!(resolved.attributes[0].values, vec!["sunny", "overcast", "rainy"]);
        assert_eq!(resolved.attributes[1].name, "windy");
    }

    #[test]
    fn test_declared_class_index_wins_over_default() {
        let resolved = resolve(&weather().with_class_index(0), &ClassSelector::Declared).unwrap();
        assert_eq!(resolved.classes.attribute, "outlook");
        let names: Vec<_> = resolved.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["windy", "play"]);
    }

    #[test]
    fn test_explicit_selectors() {
        let by_index = resolve(&weather(), &ClassSelector::Index(1)).unwrap();
        assert_eq!(by_index.classes.attribute, "windy");

        let by_name = resolve(&weather(), &ClassSelector::Name("outlook".into())).unwrap();
        assert_eq!(by_name.class_index, 0);
        assert_eq!(by_name.classes.len(), 3);
    }

    #[test]
    fn test_bad_selectors() {
        let err = resolve(&weather(), &ClassSelector::Index(3)).unwrap_err();
        assert!(matches!(err, ExportError::Config(_)));

        let err = resolve(&weather(), &ClassSelector::Name("humidity".into())).unwrap_err();
        assert!(matches!(err, ExportError::Config(_)));
    }

    #[test]
    fn test_numeric_predictor_is_rejected() {
        let mut desc = weather();
        desc.attributes
            .insert(1, DatasetAttribute::new("temperature", AttributeKind::Numeric));

        match resolve(&desc, &ClassSelector::Declared).unwrap_err() {
            ExportError::NonCategoricalAttribute { name, kind } => {
                assert_eq!(name, "temperature");
                assert_eq!(kind, "numeric");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_numeric_class_is_rejected() {
        let desc = DatasetDescription::new(
            "cpu",
            vec![
                DatasetAttribute::nominal("vendor", ["a", "b"]),
                DatasetAttribute::new("performance", AttributeKind::Numeric),
            ],
        );
        let err = resolve(&desc, &ClassSelector::Declared).unwrap_err();
        assert!(matches!(err, ExportError::NonCategoricalAttribute { .. }));
    }

    #[test]
    fn test_duplicate_class_labels() {
        let desc = DatasetDescription::new(
            "dup",
            vec![DatasetAttribute::nominal("class", ["a", "b", "a"])],
        );
        let err = resolve(&desc, &ClassSelector::Declared).unwrap_err();
        assert!(matches!(err, ExportError::Schema(_)));
    }

    #[test]
    fn test_empty_description() {
        let err = resolve(&DatasetDescription::default(), &ClassSelector::Declared).unwrap_err();
        assert!(matches!(err, ExportError::EmptyData(_)));
    }
}
