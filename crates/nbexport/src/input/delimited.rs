//! CSV/TSV reader with delimiter detection and domain inference.
//!
//! A delimited table carries no declared types, so each column's kind is
//! inferred from its cells: numeric if every non-missing cell parses as a
//! number, otherwise nominal with values in order of first appearance.

use crate::error::{ExportError, Result};
use crate::schema::{AttributeKind, DatasetAttribute, DatasetDescription};

/// Delimiters to try when auto-detecting, most preferred first.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Non-blank lines sampled for delimiter detection.
const SAMPLE_LINES: usize = 10;

/// Reader configuration.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Quote character.
    pub quote: u8,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            quote: b'"',
        }
    }
}

/// Reads dataset descriptions from delimited text.
pub struct DelimitedReader {
    config: ReaderConfig,
}

impl DelimitedReader {
    /// Create a reader with default configuration.
    pub fn new() -> Self {
        Self {
            config: ReaderConfig::default(),
        }
    }

    /// Create a reader with custom configuration.
    pub fn with_config(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read a table and infer a description from it.
    pub fn read_bytes(&self, bytes: &[u8], relation: &str) -> Result<DatasetDescription> {
        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => self.detect_delimiter(bytes)?,
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut headers: Vec<String> = if self.config.has_header {
            reader.headers()?.iter().map(|s| s.trim().to_string()).collect()
        } else {
            Vec::new()
        };

        let mut columns: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        let mut row_count = 0;
        for result in reader.records() {
            let record = result?;
            if headers.is_empty() {
                // Generate column names
                headers = (0..record.len()).map(|i| format!("column_{}", i + 1)).collect();
                columns = vec![Vec::new(); headers.len()];
            }
            for (i, column) in columns.iter_mut().enumerate() {
                column.push(record.get(i).unwrap_or("").trim().to_string());
            }
            row_count += 1;
        }

        if headers.is_empty() {
            return Err(ExportError::EmptyData("No columns found".to_string()));
        }
        if row_count == 0 {
            return Err(ExportError::EmptyData("No data rows found".to_string()));
        }

        let attributes = headers
            .into_iter()
            .zip(columns)
            .map(|(name, cells)| DatasetAttribute::new(name, infer_kind(&cells)))
            .collect();

        tracing::debug!(
            delimiter = %(delimiter as char).escape_default(),
            rows = row_count,
            "inferred attribute domains from delimited table"
        );

        Ok(DatasetDescription::new(relation, attributes))
    }

    /// Pick the candidate that splits the sampled lines most evenly.
    ///
    /// A delimiter that gives every line the same number of fields beats one
    /// that does not; then more fields win; remaining ties go to the earlier
    /// entry of [`DELIMITERS`].
    fn detect_delimiter(&self, bytes: &[u8]) -> Result<u8> {
        let sample: Vec<&[u8]> = bytes
            .split(|&b| b == b'\n')
            .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
            .filter(|line| !line.iter().all(u8::is_ascii_whitespace))
            .take(SAMPLE_LINES)
            .collect();

        if sample.is_empty() {
            return Err(ExportError::EmptyData("No lines to analyze".to_string()));
        }

        let best = DELIMITERS
            .iter()
            .rev()
            .filter_map(|&delimiter| {
                let counts: Vec<usize> = sample
                    .iter()
                    .map(|line| self.count_unquoted(line, delimiter))
                    .collect();
                let fewest = counts.iter().copied().min()?;
                let most = counts.iter().copied().max()?;
                (most > 0).then_some((delimiter, (fewest == most, fewest, most)))
            })
            .max_by_key(|&(_, rank)| rank)
            .map(|(delimiter, _)| delimiter);

        Ok(best.unwrap_or(b','))
    }

    /// Occurrences of `delimiter` outside the configured quote character.
    fn count_unquoted(&self, line: &[u8], delimiter: u8) -> usize {
        let quote = self.config.quote;
        let (count, _) = line.iter().fold((0, false), |(count, quoted), &b| {
            if b == quote {
                (count, !quoted)
            } else if b == delimiter && !quoted {
                (count + 1, quoted)
            } else {
                (count, quoted)
            }
        });
        count
    }
}

impl Default for DelimitedReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if a cell represents a missing value.
pub fn is_missing_value(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || trimmed == "?"
        || trimmed.eq_ignore_ascii_case("na")
        || trimmed.eq_ignore_ascii_case("n/a")
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("nan")
}

fn infer_kind(cells: &[String]) -> AttributeKind {
    let present: Vec<&str> = cells
        .iter()
        .map(String::as_str)
        .filter(|c| !is_missing_value(c))
        .collect();

    if !present.is_empty() && present.iter().all(|c| c.parse::<f64>().is_ok()) {
        return AttributeKind::Numeric;
    }

    let mut values: Vec<String> = Vec::new();
    for cell in present {
        if !values.iter().any(|v| v == cell) {
            values.push(cell.to_string());
        }
    }
    AttributeKind::Nominal { values }
}
