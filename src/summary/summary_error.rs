//! Error type of the summary functions.

use thiserror::Error;

/// Errors returned by the summary functions when their arguments or the
/// queried table do not allow a meaningful result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SummaryError {
    #[error("Negative number of rows requested: {0}")]
    NegativeCount(i64),
    #[error("Fraction of rows must be non-negative, got {0}")]
    InvalidFraction(f64),
    #[error("Taxon table has no '{0}' column")]
    MissingField(String),
    #[error("No records for taxon {0}")]
    UnknownTaxon(usize),
    #[error("Area index {index} out of range for {num_areas} areas")]
    AreaOutOfRange { index: usize, num_areas: usize },
    #[error("Invalid event state {0}, expected 0 (loss) or 1 (gain)")]
    InvalidState(u8),
    #[error("Area strings of unequal length: {expected} and {found}")]
    AreaLengthMismatch { expected: usize, found: usize },
}
