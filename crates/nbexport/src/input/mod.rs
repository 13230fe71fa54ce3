//! Dataset description readers.
//!
//! The format is chosen from the file extension:
//!
//! | Extension | Reader |
//! |---|---|
//! | `.arff` | [`ArffReader`], header declarations only |
//! | `.csv`, `.tsv`, `.txt` | [`DelimitedReader`], domains inferred from the data |
//! | `.json` | serialized [`DatasetDescription`], may designate the class |

mod arff;
mod delimited;

use std::fs;
use std::path::Path;

use crate::error::{ExportError, Result};
use crate::schema::DatasetDescription;

pub use arff::ArffReader;
pub use delimited::{DelimitedReader, ReaderConfig, is_missing_value};

/// Load a dataset description from disk.
pub fn load_dataset(path: impl AsRef<Path>, config: &ReaderConfig) -> Result<DatasetDescription> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    let bytes = fs::read(path).map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let description = match extension.as_str() {
        "arff" => {
            let text = String::from_utf8_lossy(&bytes);
            ArffReader::new().read_str(&text)?
        }
        "csv" | "tsv" | "txt" => {
            let relation = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            DelimitedReader::with_config(config.clone()).read_bytes(&bytes, &relation)?
        }
        "json" => serde_json::from_slice(&bytes).map_err(|e| ExportError::MalformedJson {
            path: path.to_path_buf(),
            source: e,
        })?,
        other => {
            return Err(ExportError::UnsupportedFormat(format!(
                "'{}' (expected .arff, .csv, .tsv, .txt or .json)",
                other
            )));
        }
    };

    tracing::debug!(
        path = %path.display(),
        relation = %description.relation,
        attributes = description.attribute_count(),
        "loaded dataset description"
    );
    Ok(description)
}
