//! Object dumps: the structural view of a fitted model.
//!
//! A model blob is a JSON tree of nodes of the form
//! `{ "class": "<runtime type>", "fields": { ... } }`. Field values are plain
//! JSON, nested object nodes, or `null` where the library holds a null
//! reference. Nothing here knows which fields matter; that lives in
//! [`super::introspect`].

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ExportError, Result};

/// One object of the dumped model graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectNode {
    /// Fully qualified runtime type name.
    #[serde(rename = "class")]
    pub class_name: String,
    /// Declared fields, in declaration order.
    #[serde(default)]
    pub fields: IndexMap<String, Value>,
}

impl ObjectNode {
    /// Create a node with no fields.
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Add or replace a field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Look up a declared field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Whether the node declares a field with this name.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Interpret a field value as a nested object node.
    ///
    /// Returns `None` for `null` and for anything that is not shaped like a
    /// node.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) if map.contains_key("class") => {
                serde_json::from_value(value.clone()).ok()
            }
            _ => None,
        }
    }
}

impl From<ObjectNode> for Value {
    fn from(node: ObjectNode) -> Self {
        let mut map = serde_json::Map::new();
        map.insert("class".to_string(), Value::String(node.class_name));
        map.insert(
            "fields".to_string(),
            Value::Object(node.fields.into_iter().collect()),
        );
        Value::Object(map)
    }
}

/// Opaque handle to a fitted model.
///
/// The only public view of the model is its runtime type name. Its internal
/// state is reachable through the introspector alone.
#[derive(Debug, Clone)]
pub struct ModelHandle {
    root: ObjectNode,
}

impl ModelHandle {
    /// Wrap an already materialized object graph.
    pub fn from_object(root: ObjectNode) -> Self {
        Self { root }
    }

    /// Load a model blob from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| ExportError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let root: ObjectNode = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            ExportError::MalformedJson {
                path: path.to_path_buf(),
                source: e,
            }
        })?;
        tracing::debug!(path = %path.display(), class = %root.class_name, "loaded model blob");

        Ok(Self { root })
    }

    /// Parse a model blob from bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let root: ObjectNode = serde_json::from_slice(bytes)?;
        Ok(Self { root })
    }

    /// Runtime type name of the model.
    pub fn class_name(&self) -> &str {
        &self.root.class_name
    }

    pub(crate) fn root(&self) -> &ObjectNode {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_round_trips_through_value() {
        let inner = ObjectNode::new("weka.estimators.DiscreteEstimator")
            .with_field("m_Counts", json!([1.0, 2.0]));
        let outer = ObjectNode::new("weka.classifiers.bayes.NaiveBayes")
            .with_field("m_ClassDistribution", inner.clone());

        let value = Value::from(outer.clone());
        let parsed: ObjectNode = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, outer);

        let nested = ObjectNode::from_value(parsed.field("m_ClassDistribution").unwrap());
        assert_eq!(nested, Some(inner));
    }

    #[test]
    fn test_from_value_rejects_non_nodes() {
        assert!(ObjectNode::from_value(&Value::Null).is_none());
        assert!(ObjectNode::from_value(&json!([1, 2])).is_none());
        assert!(ObjectNode::from_value(&json!({"fields": {}})).is_none());
    }

    #[test]
    fn test_handle_from_slice() {
        let handle = ModelHandle::from_slice(
            br#"{"class": "weka.classifiers.trees.J48", "fields": {"m_root": null}}"#,
        )
        .unwrap();
        assert_eq!(handle.class_name(), "weka.classifiers.trees.J48");
        assert!(handle.root().has_field("m_root"));
    }

    #[test]
    fn test_load_names_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.model.json");
        std::fs::write(&path, r#"{"class": "weka.classifiers.bayes.NaiveBayes", "#).unwrap();

        let err = ModelHandle::load(&path).unwrap_err();
        assert!(matches!(err, ExportError::MalformedJson { .. }));
        assert!(err.to_string().contains("broken.model.json"));
    }

    #[test]
    fn test_fields_default_to_empty() {
        let handle = ModelHandle::from_slice(br#"{"class": "x.Y"}"#).unwrap();
        assert!(handle.root().fields.is_empty());
    }
}
