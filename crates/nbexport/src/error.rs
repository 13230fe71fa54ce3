//! Error types for the nbexport library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for export operations.
///
/// Every variant is fatal for a run. The only condition recovered locally is
/// a non-finite probability, which is coerced to `0` instead of surfacing
/// here.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Error reading or accessing an input file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed ARFF header.
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON error without a file behind it (in-memory blobs, rendering).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A model blob or JSON description file is not valid.
    #[error("Malformed JSON in '{path}': {source}")]
    MalformedJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Dataset description format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Empty description or no data to infer a domain from.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error, e.g. a class selector that matches nothing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The resolved schema cannot be represented in the output document.
    #[error("Schema error: {0}")]
    Schema(String),

    /// The model is not a Naive Bayes classifier.
    #[error("Model is not NaiveBayes: {actual}")]
    UnsupportedModelKind { actual: String },

    /// Internal model state is missing, malformed or misaligned with the schema.
    #[error("Introspection failed: {0}")]
    Introspection(String),

    /// An attribute has no finite enumerated value domain.
    #[error("Attribute '{name}' is {kind}, only nominal attributes can be exported")]
    NonCategoricalAttribute { name: String, kind: String },

    /// A distribution object exposes no supported probability accessor.
    #[error("Estimator {class} has no getProbability accessor")]
    NoProbabilityAccessor { class: String },

    /// Writing the output document failed.
    #[error("Failed to write '{path}': {source}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
