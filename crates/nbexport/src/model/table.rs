//! Two-dimensional table of conditional distributions.

use crate::error::{ExportError, Result};

use super::estimator::Estimator;

/// Conditional distributions indexed by `(attribute, class)`.
///
/// Rows without any allocated cell are stored empty. The library leaves the
/// class attribute's row like that.
#[derive(Debug, Clone, Default)]
pub struct DistributionTable {
    rows: Vec<Vec<Option<Estimator>>>,
    columns: usize,
}

impl DistributionTable {
    /// Build a table, rejecting ragged rows.
    pub fn from_rows(rows: Vec<Vec<Option<Estimator>>>) -> Result<Self> {
        let mut columns = None;
        for (a, row) in rows.iter().enumerate() {
            if row.is_empty() {
                continue;
            }
            match columns {
                None => columns = Some(row.len()),
                Some(n) if n != row.len() => {
                    return Err(ExportError::Introspection(format!(
                        "ragged distribution table: row {} has {} columns, expected {}",
                        a,
                        row.len(),
                        n
                    )));
                }
                Some(_) => {}
            }
        }

        Ok(Self {
            rows,
            columns: columns.unwrap_or(0),
        })
    }

    /// Number of attribute rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of class columns.
    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// The distribution for an attribute row and class column, if allocated.
    pub fn get(&self, attribute: usize, class: usize) -> Option<&Estimator> {
        self.rows.get(attribute)?.get(class)?.as_ref()
    }

    fn row_is_unallocated(&self, attribute: usize) -> bool {
        self.rows
            .get(attribute)
            .is_some_and(|row| row.iter().all(Option::is_none))
    }

    /// Align the table with a resolved schema.
    ///
    /// The result has exactly one row per predictor attribute, in dataset
    /// order, and one column per class. A table already in that shape is kept
    /// as is. A table with one row per dataset attribute loses the row at
    /// `class_index`, which must be unallocated. Any other shape means the
    /// model and the dataset description do not belong together.
    pub fn align(
        mut self,
        class_index: usize,
        dataset_attributes: usize,
        class_count: usize,
    ) -> Result<Self> {
        let predictors = dataset_attributes.saturating_sub(1);

        if self.rows.len() == dataset_attributes {
            if !self.row_is_unallocated(class_index) {
                return Err(ExportError::Introspection(format!(
                    "distribution row {} belongs to the class attribute but is populated; \
                     the model was trained with a different class attribute",
                    class_index
                )));
            }
            self.rows.remove(class_index);
        } else if self.rows.len() != predictors {
            return Err(ExportError::Introspection(format!(
                "distribution table has {} attribute rows, dataset has {} predictor attributes",
                self.rows.len(),
                predictors
            )));
        }

        if predictors > 0 && self.columns != class_count {
            return Err(ExportError::Introspection(format!(
                "distribution table has {} class columns, dataset has {} classes",
                self.columns, class_count
            )));
        }

        Ok(self)
    }
}
