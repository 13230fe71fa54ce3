//! Main Exporter struct and public API.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::export::{ExportedModel, build_document, write_document};
use crate::input::{ReaderConfig, load_dataset};
use crate::model::{ExtractedModel, ModelHandle, introspect};
use crate::schema::{ClassSelector, DatasetDescription, resolve};

/// Configuration for an export run.
#[derive(Debug, Clone, Default)]
pub struct ExportConfig {
    /// How the class attribute is chosen.
    pub class_selector: ClassSelector,
    /// Options for delimited dataset descriptions.
    pub reader: ReaderConfig,
}

/// Result of a completed export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Where the document was written.
    pub output: PathBuf,
    /// Runtime type of the exported model.
    pub model_variant: String,
    /// Name of the class attribute.
    pub class_attribute: String,
    /// Number of classes.
    pub class_count: usize,
    /// Number of predictor attributes.
    pub attribute_count: usize,
    /// Size of the written document.
    pub bytes_written: u64,
    /// SHA-256 digest of the written document.
    pub digest: String,
}

/// Exports fitted Naive Bayes models to portable JSON documents.
pub struct Exporter {
    config: ExportConfig,
}

impl Exporter {
    /// Create an exporter with default configuration.
    pub fn new() -> Self {
        Self::with_config(ExportConfig::default())
    }

    /// Create an exporter with custom configuration.
    pub fn with_config(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Choose the class attribute.
    pub fn with_class_selector(mut self, selector: ClassSelector) -> Self {
        self.config.class_selector = selector;
        self
    }

    /// Access the configuration.
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Build the document for an in-memory model and dataset description.
    pub fn build(
        &self,
        model: &ModelHandle,
        dataset: &DatasetDescription,
    ) -> Result<ExportedModel> {
        let extracted = introspect(model)?;
        self.assemble(extracted, dataset).map(|(document, _)| document)
    }

    fn assemble(
        &self,
        extracted: ExtractedModel,
        dataset: &DatasetDescription,
    ) -> Result<(ExportedModel, String)> {
        let schema = resolve(dataset, &self.config.class_selector)?;
        let table = extracted.distributions.align(
            schema.class_index,
            schema.dataset_attributes,
            schema.classes.len(),
        )?;
        let document = build_document(
            &schema.classes,
            &schema.attributes,
            &extracted.class_prior,
            &table,
        )?;
        Ok((document, extracted.variant))
    }

    /// Run the whole pipeline: load, introspect, resolve, build and write.
    ///
    /// Nothing is written unless every earlier stage succeeds.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use nbexport::Exporter;
    ///
    /// let summary = Exporter::new()
    ///     .export("weather.model.json", "weather.arff", "weather.nb.json")
    ///     .unwrap();
    /// println!("{} classes, {} attributes", summary.class_count, summary.attribute_count);
    /// ```
    pub fn export(
        &self,
        model_path: impl AsRef<Path>,
        schema_path: impl AsRef<Path>,
        output_path: impl AsRef<Path>,
    ) -> Result<ExportSummary> {
        let model = ModelHandle::load(model_path)?;
        let extracted = introspect(&model)?;
        drop(model);

        let dataset = load_dataset(schema_path, &self.config.reader)?;
        let (document, model_variant) = self.assemble(extracted, &dataset)?;

        let written = write_document(&document, output_path)?;

        Ok(ExportSummary {
            output: written.path,
            model_variant,
            class_attribute: document.class_attribute,
            class_count: document.classes.len(),
            attribute_count: document.attributes.len(),
            bytes_written: written.bytes,
            digest: written.digest,
        })
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new()
    }
}
