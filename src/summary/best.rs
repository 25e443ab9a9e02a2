//! Selection of the highest-scoring sample rows.

use crate::model::{EventsByTaxon, ScoreField, TaxonTable};
use crate::summary::SummaryError;
use log::warn;

/// How many rows [get_best] selects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection {
    /// A fixed number of rows; more than available selects all rows
    Count(i64),
    /// A fraction of all rows, rounded down; values above 1 are clamped
    Fraction(f64),
}

impl Selection {
    /// Returns the number of rows to select out of `num_rows`.
    ///
    /// # Errors
    /// Negative counts and negative or NaN fractions are rejected.
    pub(crate) fn resolve(&self, num_rows: usize) -> Result<usize, SummaryError> {
        match *self {
            Selection::Count(n) if n < 0 => Err(SummaryError::NegativeCount(n)),
            Selection::Count(n) => Ok(usize::try_from(n).unwrap_or(usize::MAX).min(num_rows)),
            Selection::Fraction(f) if f.is_nan() || f < 0.0 => {
                Err(SummaryError::InvalidFraction(f))
            }
            Selection::Fraction(f) => {
                if f > 1.0 {
                    warn!("Fraction {f} of rows requested, using 1 instead");
                }
                Ok((f.min(1.0) * num_rows as f64).floor() as usize)
            }
        }
    }
}

/// Returns the indices of the best rows by `score`, best first.
///
/// Rows are sorted stably by ascending score, the last `n` are taken and
/// reversed. Among equal scores the later row thus comes first.
///
/// # Example
/// ```
/// use biogeolog::model::{SampleScores, ScoreField, TaxonTable};
/// use biogeolog::summary::{Selection, best_rows};
///
/// let mut table = TaxonTable::new();
/// for (i, posterior) in [1.0, 5.0, 3.0, 2.0].into_iter().enumerate() {
///     let scores = SampleScores { iteration: i as u64, posterior, likelihood: 0.0, prior: 0.0 };
///     table.push_row(scores, vec![]);
/// }
/// let rows = best_rows(&table, Selection::Count(3), ScoreField::Posterior).unwrap();
/// assert_eq!(rows, vec![1, 2, 3]);
/// ```
pub fn best_rows(
    table: &TaxonTable,
    selection: Selection,
    score: ScoreField,
) -> Result<Vec<usize>, SummaryError> {
    let scores = table.scores(score);
    let n = selection.resolve(scores.len())?;

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

    Ok(order[order.len() - n..].iter().rev().copied().collect())
}

/// Returns a new table holding the best rows by `score`, best first.
///
/// See [best_rows] for the ordering of ties.
pub fn get_best(
    table: &TaxonTable,
    selection: Selection,
    score: ScoreField,
) -> Result<TaxonTable, SummaryError> {
    let rows = best_rows(table, selection, score)?;
    Ok(table.select_rows(&rows))
}

impl EventsByTaxon {
    /// Returns the best rows of the table of `taxon`, see [get_best].
    ///
    /// # Errors
    /// Returns [SummaryError::UnknownTaxon] if no record of `taxon` exists.
    pub fn best(
        &self,
        taxon: usize,
        selection: Selection,
        score: ScoreField,
    ) -> Result<TaxonTable, SummaryError> {
        let table = self.get(taxon).ok_or(SummaryError::UnknownTaxon(taxon))?;
        get_best(table, selection, score)
    }
}
