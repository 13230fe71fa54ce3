//! nbexport: portable JSON export of fitted Naive Bayes classifiers.
//!
//! A fitted model keeps its parameters in internal fields that its library
//! does not expose. nbexport reads those fields from a dump of the model
//! object, pairs them with the training dataset's schema, and writes a
//! self-contained JSON document from which any implementation can reproduce
//! the classifier's predictive distribution.
//!
//! # Pipeline
//!
//! 1. [`ModelHandle::load`] reads the model blob.
//! 2. [`model::introspect`] checks the variant and extracts the class prior
//!    and the conditional distribution table.
//! 3. [`input::load_dataset`] reads the dataset description (ARFF, CSV/TSV or
//!    JSON) and [`schema::resolve`] picks out the class labels and predictors.
//! 4. [`export::build_document`] queries every distribution and assembles
//!    the [`ExportedModel`].
//! 5. [`export::write_document`] writes it atomically.
//!
//! # Example
//!
//! ```no_run
//! use nbexport::{ClassSelector, Exporter};
//!
//! let exporter = Exporter::new().with_class_selector(ClassSelector::Name("play".into()));
//! let summary = exporter
//!     .export("weather.model.json", "weather.arff", "weather.nb.json")
//!     .unwrap();
//!
//! println!("Classes: {}", summary.class_count);
//! println!("Digest: {}", summary.digest);
//! ```

pub mod error;
pub mod export;
pub mod input;
pub mod model;
pub mod schema;

mod exporter;

pub use crate::exporter::{ExportConfig, ExportSummary, Exporter};
pub use error::{ExportError, Result};
pub use export::{AttributeExport, EPSILON, ExportedModel, Probability};
pub use input::{ArffReader, DelimitedReader, ReaderConfig};
pub use model::{ModelHandle, ObjectNode};
pub use schema::{AttributeKind, ClassSelector, DatasetAttribute, DatasetDescription};
