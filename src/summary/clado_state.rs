//! Frequencies of cladogenic state codes.

use crate::model::{FieldKey, TaxonTable};
use crate::summary::{Output, SummaryError, require};
use serde::Serialize;
use std::collections::BTreeMap;

/// Which rows [get_clado_state] considers, based on the number of areas
/// occupied at the vertex (`nd`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CladoFilter {
    /// All rows
    #[default]
    All,
    /// Rows whose vertex occupies at least this many areas
    MinRangeSize(usize),
    /// With `false`, rows whose vertex occupies exactly one area are
    /// dropped; with `true`, all rows are kept
    IncludeNarrow(bool),
}

impl CladoFilter {
    /// Returns whether a row with the given range size is considered.
    ///
    /// Rows without `nd` value have no range size and count as size 0.
    fn accepts(&self, range_size: Option<usize>) -> bool {
        match *self {
            CladoFilter::All | CladoFilter::IncludeNarrow(true) => true,
            CladoFilter::MinRangeSize(min) => range_size.unwrap_or(0) >= min,
            CladoFilter::IncludeNarrow(false) => range_size != Some(1),
        }
    }
}

/// Counts or frequencies per cladogenic state code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CladoStateTable {
    /// Value per observed code, e.g. `"s"`, `"a"`, `"w"`
    pub values: BTreeMap<String, f64>,
    /// Number of rows considered
    pub num_samples: usize,
}

impl CladoStateTable {
    /// Returns the value for `code`, 0 if never observed.
    pub fn get(&self, code: &str) -> f64 {
        self.values.get(code).copied().unwrap_or(0.0)
    }
}

/// Tabulates the cladogenic state codes (`cs`) of the rows passing `filter`.
///
/// Only rows with a `cs` value count toward the number of samples. If no row
/// is considered, the table is empty.
///
/// # Errors
/// [SummaryError::MissingField] if the table has no `cs` column.
pub fn get_clado_state(
    table: &TaxonTable,
    filter: CladoFilter,
    output: Output,
) -> Result<CladoStateTable, SummaryError> {
    let states = require(table.clado_states(), &FieldKey::CladoState)?;

    let mut values: BTreeMap<String, f64> = BTreeMap::new();
    let mut num_samples = 0;
    for (row, state) in states.into_iter().enumerate() {
        let Some(code) = state else { continue };
        if !filter.accepts(table.range_size(row)) {
            continue;
        }
        *values.entry(code.to_string()).or_default() += 1.0;
        num_samples += 1;
    }

    for value in values.values_mut() {
        *value = output.apply(*value, num_samples);
    }

    Ok(CladoStateTable { values, num_samples })
}
