//! Summaries over decoded taxon tables.
//!
//! Every function takes a single [TaxonTable](crate::model::TaxonTable) and
//! is a pure function of it:
//!
//! | Function | Result |
//! |----------|--------|
//! | [get_best] | rows with the highest posterior/likelihood/prior |
//! | [get_gain_loss] | area gains and losses per area |
//! | [get_area_pair] | co-occurrence of areas in `nd`, `ch0` or `ch1` |
//! | [get_clado_state] | cladogenic state codes |
//! | [get_clado_prob] | daughter range pairs per ancestral range |
//! | [get_allopatry_prob] | daughter range pairs of allopatric splits |
//!
//! The frequency tables are returned as raw counts or divided by the number
//! of rows considered, see [Output]. If no row is considered, the result has
//! the right shape and holds only zeros (or no entries).

mod area_pair;
mod best;
mod clado_prob;
mod clado_state;
mod gain_loss;
mod summary_error;

pub use area_pair::{AreaField, AreaMatrix, get_area_pair};
pub use best::{Selection, best_rows, get_best};
pub use clado_prob::{CladoTable, child_pair_encoding, get_allopatry_prob, get_clado_prob};
pub use clado_state::{CladoFilter, CladoStateTable, get_clado_state};
pub use gain_loss::{GainLoss, get_gain_loss};
pub use summary_error::SummaryError;

use crate::model::FieldKey;
use log::warn;

/// Whether frequency tables hold raw counts or frequencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Output {
    /// Counts divided by the number of rows considered
    #[default]
    Frequencies,
    /// Raw counts
    Counts,
}

impl Output {
    /// Applies this output mode to a count over `num_samples` rows.
    ///
    /// Counts over zero rows are returned unchanged (they are all zero).
    pub(crate) fn apply(&self, count: f64, num_samples: usize) -> f64 {
        match self {
            Output::Frequencies if num_samples > 0 => count / num_samples as f64,
            _ => count,
        }
    }
}

/// Turns a missing column into [SummaryError::MissingField], with a warning.
pub(crate) fn require<T>(column: Option<T>, key: &FieldKey) -> Result<T, SummaryError> {
    column.ok_or_else(|| {
        warn!("Taxon table has no '{key}' column");
        SummaryError::MissingField(key.code().to_string())
    })
}
