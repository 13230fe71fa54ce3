//! Durable, all-or-nothing output of the exported document.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;

use crate::error::{ExportError, Result};

use super::document::ExportedModel;

/// What was written by [`write_document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenDocument {
    pub path: PathBuf,
    pub bytes: u64,
    /// `sha256:<hex>` of the written bytes.
    pub digest: String,
}

/// Render a document to its JSON text, with a trailing newline.
pub fn render_document(document: &ExportedModel) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(document)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Write a document to `path`.
///
/// The document is staged in a temporary file next to the destination,
/// flushed, synced and renamed into place. On any failure the temporary file
/// is removed and the destination is left as it was.
///
/// # Example
///
/// ```no_run
/// # use nbexport::export::{write_document, ExportedModel};
/// # fn example(model: &ExportedModel) -> nbexport::Result<()> {
/// let written = write_document(model, "weather.nb.json")?;
/// println!("{} bytes, {}", written.bytes, written.digest);
/// # Ok(())
/// # }
/// ```
pub fn write_document(document: &ExportedModel, path: impl AsRef<Path>) -> Result<WrittenDocument> {
    let path = path.as_ref();
    let bytes = render_document(document)?;

    let failure = |source: std::io::Error| ExportError::WriteFailure {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.exists() {
        fs::create_dir_all(parent).map_err(failure)?;
    }

    let mut staged = NamedTempFile::new_in(parent).map_err(failure)?;
    {
        let mut writer = BufWriter::new(staged.as_file_mut());
        writer.write_all(&bytes).map_err(failure)?;
        writer.flush().map_err(failure)?;
    }
    staged.as_file().sync_all().map_err(failure)?;
    staged.persist(path).map_err(|e| failure(e.error))?;

    let digest = format!("sha256:{:x}", Sha256::digest(&bytes));
    tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote model document");

    Ok(WrittenDocument {
        path: path.to_path_buf(),
        bytes: bytes.len() as u64,
        digest,
    })
}
