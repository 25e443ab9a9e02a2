//! Co-occurrence of areas within a range.

use crate::model::{FieldKey, TaxonTable};
use crate::summary::{Output, SummaryError, require};
use serde::Serialize;

/// Area column a co-occurrence matrix is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaField {
    /// Range at the vertex (`nd`)
    Node,
    /// Range of the first daughter (`ch0`)
    Child0,
    /// Range of the second daughter (`ch1`)
    Child1,
}

impl AreaField {
    /// Returns the field key of this column.
    pub fn key(&self) -> FieldKey {
        match self {
            AreaField::Node => FieldKey::Node,
            AreaField::Child0 => FieldKey::Child0,
            AreaField::Child1 => FieldKey::Child1,
        }
    }
}

/// Symmetric `num_areas × num_areas` matrix of area co-occurrences.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaMatrix {
    /// Row-major values; the diagonal holds single-area occupancy
    pub values: Vec<Vec<f64>>,
    /// Number of rows considered
    pub num_samples: usize,
}

impl AreaMatrix {
    /// Returns the number of areas.
    pub fn num_areas(&self) -> usize {
        self.values.len()
    }

    /// Returns the value for areas `i` and `j`.
    ///
    /// # Panics
    /// Panics if `i` or `j` is out of bounds.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }

    /// Checks that `get(i, j) == get(j, i)` for all areas.
    pub fn is_symmetric(&self) -> bool {
        let n = self.num_areas();
        (0..n).all(|i| (0..n).all(|j| self.values[i][j] == self.values[j][i]))
    }
}

/// Counts, for every pair of areas, the rows in which both are occupied.
///
/// Rows without a value for `field` are not considered. The number of areas
/// is taken from the first `nd` value, or from the first value of `field` if
/// the table has no `nd` column. If no row is considered, the matrix holds
/// only zeros.
///
/// # Errors
/// * [SummaryError::MissingField] if the table has no column for `field`
/// * [SummaryError::AreaLengthMismatch] if the values differ in length
pub fn get_area_pair(
    table: &TaxonTable,
    field: AreaField,
    output: Output,
) -> Result<AreaMatrix, SummaryError> {
    let key = field.key();
    let column = require(table.areas(&key), &key)?;
    let num_areas = table
        .num_areas()
        .or_else(|| column.iter().flatten().next().map(|bits| bits.len()))
        .unwrap_or(0);

    let mut values = vec![vec![0.0; num_areas]; num_areas];
    let mut num_samples = 0;
    for bits in column.into_iter().flatten() {
        if bits.len() != num_areas {
            return Err(SummaryError::AreaLengthMismatch {
                expected: num_areas,
                found: bits.len(),
            });
        }
        num_samples += 1;

        for i in 0..num_areas {
            if bits[i] != 1 {
                continue;
            }
            for j in i..num_areas {
                if bits[j] == 1 {
                    values[i][j] += 1.0;
                    values[j][i] = values[i][j];
                }
            }
        }
    }

    for value in values.iter_mut().flatten() {
        *value = output.apply(*value, num_samples);
    }

    Ok(AreaMatrix { values, num_samples })
}
