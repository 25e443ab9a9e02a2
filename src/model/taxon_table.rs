//! Per-taxon table of sampled records.
//!
//! Provides [TaxonTable], which stores the score columns of every sample row
//! in which a taxon (vertex index) appears, together with one column per
//! annotation field. Columns are parallel: row `i` of every column refers to
//! the same source line.

use crate::model::event::Event;
use crate::model::field::{FieldKey, FieldValue};
use crate::model::score::{SampleScores, ScoreField};
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

// =#========================================================================#=
// TAXON TABLE
// =#========================================================================#=
/// Column-oriented table of all records of one taxon.
///
/// Field columns hold `Option<FieldValue>`: a field first encountered at row
/// `r` is back-filled with [None] for rows `0..r`, and a row without a value
/// for a known field gets [None]. Thus every column always has
/// [num_rows()](Self::num_rows) entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaxonTable {
    iteration: Vec<u64>,
    posterior: Vec<f64>,
    likelihood: Vec<f64>,
    prior: Vec<f64>,
    #[serde(flatten)]
    columns: BTreeMap<FieldKey, Vec<Option<FieldValue>>>,
}

impl TaxonTable {
    /// Creates a new empty [TaxonTable].
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row made of the shared scores and the decoded fields of one
    /// record.
    ///
    /// If a key occurs more than once in `fields`, the last value is kept.
    ///
    /// # Example
    /// ```
    /// use biogeolog::model::{FieldKey, FieldValue, SampleScores, TaxonTable};
    ///
    /// let scores = SampleScores { iteration: 10, posterior: -5.0, likelihood: -3.0, prior: -2.0 };
    /// let mut table = TaxonTable::new();
    /// table.push_row(scores, vec![(FieldKey::Node, FieldValue::Areas(vec![1, 0]))]);
    /// table.push_row(scores, vec![(FieldKey::CladoState, FieldValue::Code("s".into()))]);
    ///
    /// assert_eq!(table.num_rows(), 2);
    /// assert_eq!(table.column(&FieldKey::Node).unwrap().len(), 2);
    /// assert!(table.is_consistent());
    /// ```
    pub fn push_row(&mut self, scores: SampleScores, fields: Vec<(FieldKey, FieldValue)>) {
        let row = self.num_rows();
        self.iteration.push(scores.iteration);
        self.posterior.push(scores.posterior);
        self.likelihood.push(scores.likelihood);
        self.prior.push(scores.prior);

        for (key, value) in fields {
            let column = self
                .columns
                .entry(key)
                .or_insert_with(|| vec![None; row]);
            if column.len() > row {
                debug!("Field repeated in one record, keeping last value");
                column[row] = Some(value);
            } else {
                column.push(Some(value));
            }
        }

        // Pad fields this record did not mention
        for column in self.columns.values_mut() {
            if column.len() == row {
                column.push(None);
            }
        }
    }

    // ============================================================================
    // Dimensions
    // ============================================================================
    /// Returns the number of rows.
    pub fn num_rows(&self) -> usize {
        self.iteration.len()
    }

    /// Returns whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.iteration.is_empty()
    }

    /// Returns the number of areas, taken from the first `nd` value.
    pub fn num_areas(&self) -> Option<usize> {
        self.column(&FieldKey::Node)?
            .iter()
            .find_map(|value| value.as_ref().and_then(FieldValue::as_areas))
            .map(<[u8]>::len)
    }

    /// Returns the number of areas occupied by the vertex (`nd`) in `row`.
    pub fn range_size(&self, row: usize) -> Option<usize> {
        let bits = self.column(&FieldKey::Node)?.get(row)?.as_ref()?.as_areas()?;
        Some(bits.iter().filter(|&&b| b == 1).count())
    }

    /// Checks that all columns have the same length.
    pub fn is_consistent(&self) -> bool {
        let n = self.num_rows();
        self.posterior.len() == n
            && self.likelihood.len() == n
            && self.prior.len() == n
            && self.columns.values().all(|column| column.len() == n)
    }

    // ============================================================================
    // Score columns
    // ============================================================================
    /// Returns the iteration column.
    pub fn iterations(&self) -> &[u64] {
        &self.iteration
    }

    /// Returns the given score column.
    pub fn scores(&self, field: ScoreField) -> &[f64] {
        match field {
            ScoreField::Posterior => &self.posterior,
            ScoreField::Likelihood => &self.likelihood,
            ScoreField::Prior => &self.prior,
        }
    }

    /// Returns iteration and scores of a row.
    ///
    /// # Panics
    /// Panics if `row` is out of bounds.
    pub fn row_scores(&self, row: usize) -> SampleScores {
        SampleScores {
            iteration: self.iteration[row],
            posterior: self.posterior[row],
            likelihood: self.likelihood[row],
            prior: self.prior[row],
        }
    }

    // ============================================================================
    // Field columns
    // ============================================================================
    /// Returns all field keys present in this table, in key order.
    pub fn keys(&self) -> impl Iterator<Item = &FieldKey> {
        self.columns.keys()
    }

    /// Returns whether a column exists for `key`.
    pub fn has_field(&self, key: &FieldKey) -> bool {
        self.columns.contains_key(key)
    }

    /// Returns the column for `key`, one entry per row.
    pub fn column(&self, key: &FieldKey) -> Option<&[Option<FieldValue>]> {
        self.columns.get(key).map(Vec::as_slice)
    }

    /// Returns the area bits of the column for `key`, one entry per row.
    pub fn areas(&self, key: &FieldKey) -> Option<Vec<Option<&[u8]>>> {
        self.typed_column(key, FieldValue::as_areas)
    }

    /// Returns the cladogenic state codes, one entry per row.
    pub fn clado_states(&self) -> Option<Vec<Option<&str>>> {
        self.typed_column(&FieldKey::CladoState, FieldValue::as_code)
    }

    /// Returns the branch events, one entry per row.
    pub fn events(&self) -> Option<Vec<Option<&[Event]>>> {
        self.typed_column(&FieldKey::Events, FieldValue::as_events)
    }

    fn typed_column<'a, T>(
        &'a self,
        key: &FieldKey,
        extract: fn(&'a FieldValue) -> Option<T>,
    ) -> Option<Vec<Option<T>>> {
        let column = self.columns.get(key)?;
        Some(
            column
                .iter()
                .map(|value| value.as_ref().and_then(extract))
                .collect(),
        )
    }

    // ============================================================================
    // Selection
    // ============================================================================
    /// Returns a new table with the given rows, in the given order.
    ///
    /// # Panics
    /// Panics if a row index is out of bounds.
    pub fn select_rows(&self, rows: &[usize]) -> TaxonTable {
        TaxonTable {
            iteration: rows.iter().map(|&r| self.iteration[r]).collect(),
            posterior: rows.iter().map(|&r| self.posterior[r]).collect(),
            likelihood: rows.iter().map(|&r| self.likelihood[r]).collect(),
            prior: rows.iter().map(|&r| self.prior[r]).collect(),
            columns: self
                .columns
                .iter()
                .map(|(key, column)| {
                    let selected = rows.iter().map(|&r| column[r].clone()).collect();
                    (key.clone(), selected)
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(iteration: u64) -> SampleScores {
        SampleScores {
            iteration,
            posterior: iteration as f64,
            likelihood: 0.0,
            prior: 0.0,
        }
    }

    #[test]
    fn test_late_field_is_back_filled() {
        let mut table = TaxonTable::new();
        table.push_row(scores(0), vec![]);
        table.push_row(scores(1), vec![(FieldKey::BudNode, FieldValue::Int(4))]);
        table.push_row(scores(2), vec![]);

        let column = table.column(&FieldKey::BudNode).unwrap();
        assert_eq!(column, &[None, Some(FieldValue::Int(4)), None]);
        assert!(table.is_consistent());
    }

    #[test]
    fn test_repeated_field_keeps_last_value() {
        let mut table = TaxonTable::new();
        table.push_row(
            scores(0),
            vec![
                (FieldKey::BudNode, FieldValue::Int(1)),
                (FieldKey::BudNode, FieldValue::Int(2)),
            ],
        );
        assert_eq!(table.column(&FieldKey::BudNode).unwrap(), &[Some(FieldValue::Int(2))]);
        assert!(table.is_consistent());
    }

    #[test]
    fn test_range_size_and_num_areas() {
        let mut table = TaxonTable::new();
        table.push_row(scores(0), vec![(FieldKey::Node, FieldValue::Areas(vec![1, 0, 1, 1]))]);
        assert_eq!(table.num_areas(), Some(4));
        assert_eq!(table.range_size(0), Some(3));
        assert_eq!(table.range_size(1), None);
    }

    #[test]
    fn test_select_rows_keeps_columns_parallel() {
        let mut table = TaxonTable::new();
        for i in 0..4 {
            table.push_row(scores(i), vec![(FieldKey::BudNode, FieldValue::Int(i as i64))]);
        }
        let selected = table.select_rows(&[3, 1]);
        assert_eq!(selected.iterations(), &[3, 1]);
        assert_eq!(
            selected.column(&FieldKey::BudNode).unwrap(),
            &[Some(FieldValue::Int(3)), Some(FieldValue::Int(1))]
        );
        assert!(selected.is_consistent());
    }
}
