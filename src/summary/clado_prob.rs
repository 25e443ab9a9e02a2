//! Daughter range pairs per ancestral range.
//!
//! The two daughter ranges of a split are folded into one digit string: the
//! range whose bit string sorts first is doubled and added area-wise to the
//! other. Each digit is thus 0 (area in neither daughter), 1 or 2 (area in
//! one daughter only) or 3 (area in both).

use crate::model::{FieldKey, TaxonTable, area_string};
use crate::summary::{Output, SummaryError, require};
use serde::Serialize;
use std::collections::BTreeMap;

/// Clado code of an allopatric split.
const ALLOPATRY: &str = "a";

/// Counts or frequencies keyed by ancestral range, then by daughter pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CladoTable {
    /// `nd` bit string → pair key → value
    pub values: BTreeMap<String, BTreeMap<String, f64>>,
    /// Number of rows considered
    pub num_samples: usize,
}

impl CladoTable {
    /// Returns the value for an ancestral range and pair key, 0 if never
    /// observed.
    pub fn get(&self, range: &str, pair: &str) -> f64 {
        self.values
            .get(range)
            .and_then(|pairs| pairs.get(pair))
            .copied()
            .unwrap_or(0.0)
    }

    fn add(&mut self, range: String, pair: String) {
        *self.values.entry(range).or_default().entry(pair).or_default() += 1.0;
        self.num_samples += 1;
    }

    fn finish(mut self, output: Output) -> Self {
        let num_samples = self.num_samples;
        for value in self.values.values_mut().flat_map(|pairs| pairs.values_mut()) {
            *value = output.apply(*value, num_samples);
        }
        self
    }
}

/// Encodes two daughter ranges as one vector of values in `0..=3`.
///
/// # Example
/// ```
/// use biogeolog::summary::child_pair_encoding;
///
/// // "01" sorts before "10" and is doubled
/// assert_eq!(child_pair_encoding(&[1, 0], &[0, 1]).unwrap(), vec![1, 2]);
/// ```
///
/// # Errors
/// [SummaryError::AreaLengthMismatch] if the ranges differ in length.
pub fn child_pair_encoding(child0: &[u8], child1: &[u8]) -> Result<Vec<u8>, SummaryError> {
    if child0.len() != child1.len() {
        return Err(SummaryError::AreaLengthMismatch {
            expected: child0.len(),
            found: child1.len(),
        });
    }
    let (doubled, other) = if child0 <= child1 {
        (child0, child1)
    } else {
        (child1, child0)
    };
    Ok(doubled.iter().zip(other).map(|(d, o)| 2 * d + o).collect())
}

/// Tabulates the daughter pair encodings of every row, keyed by `nd`.
///
/// Rows lacking any of `nd`, `ch0` or `ch1` are not considered.
///
/// # Errors
/// * [SummaryError::MissingField] if the table has no `nd`, `ch0` or `ch1` column
/// * [SummaryError::AreaLengthMismatch] if the daughter ranges of a row differ
///   in length
pub fn get_clado_prob(table: &TaxonTable, output: Output) -> Result<CladoTable, SummaryError> {
    let mut result = CladoTable::default();
    for (node, child0, child1) in split_rows(table)?.into_iter().flatten() {
        let encoding = child_pair_encoding(child0, child1)?;
        result.add(area_string(node), area_string(&encoding));
    }
    Ok(result.finish(output))
}

/// Tabulates the daughter pair encodings of allopatric splits (`cs == "a"`).
///
/// The pair key lists, for every area occupied in `nd`, the area index and
/// its encoded value, e.g. `"0:1,2:2"`.
///
/// # Errors
/// As [get_clado_prob], plus [SummaryError::MissingField] without a `cs`
/// column and [SummaryError::AreaLengthMismatch] if `nd` and the daughters
/// differ in length.
pub fn get_allopatry_prob(
    table: &TaxonTable,
    output: Output,
) -> Result<CladoTable, SummaryError> {
    let states = require(table.clado_states(), &FieldKey::CladoState)?;
    let rows = split_rows(table)?;

    let mut result = CladoTable::default();
    for (split, state) in rows.into_iter().zip(states) {
        let Some((node, child0, child1)) = split else { continue };
        if state != Some(ALLOPATRY) {
            continue;
        }
        let encoding = child_pair_encoding(child0, child1)?;
        if encoding.len() != node.len() {
            return Err(SummaryError::AreaLengthMismatch {
                expected: node.len(),
                found: encoding.len(),
            });
        }
        let pair = node
            .iter()
            .zip(&encoding)
            .enumerate()
            .filter(|(_, (bit, _))| **bit == 1)
            .map(|(area, (_, value))| format!("{area}:{value}"))
            .collect::<Vec<_>>()
            .join(",");
        result.add(area_string(node), pair);
    }
    Ok(result.finish(output))
}

type SplitRow<'a> = (&'a [u8], &'a [u8], &'a [u8]);

/// Returns `(nd, ch0, ch1)` per row, [None] for rows lacking one of them.
fn split_rows(table: &TaxonTable) -> Result<Vec<Option<SplitRow<'_>>>, SummaryError> {
    let nodes = require(table.areas(&FieldKey::Node), &FieldKey::Node)?;
    let child0 = require(table.areas(&FieldKey::Child0), &FieldKey::Child0)?;
    let child1 = require(table.areas(&FieldKey::Child1), &FieldKey::Child1)?;

    Ok(nodes
        .into_iter()
        .zip(child0)
        .zip(child1)
        .map(|((nd, ch0), ch1)| Some((nd?, ch0?, ch1?)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldValue, SampleScores};

    const SCORES: SampleScores = SampleScores {
        iteration: 0,
        posterior: 0.0,
        likelihood: 0.0,
        prior: 0.0,
    };

    fn push(table: &mut TaxonTable, nd: &[u8], ch0: &[u8], ch1: &[u8], cs: &str) {
        table.push_row(
            SCORES,
            vec![
                (FieldKey::Node, FieldValue::Areas(nd.to_vec())),
                (FieldKey::Child0, FieldValue::Areas(ch0.to_vec())),
                (FieldKey::Child1, FieldValue::Areas(ch1.to_vec())),
                (FieldKey::CladoState, FieldValue::Code(cs.to_string())),
            ],
        );
    }

    fn example() -> TaxonTable {
        let mut table = TaxonTable::new();
        push(&mut table, &[1, 1, 0], &[1, 0, 0], &[0, 1, 0], "a");
        push(&mut table, &[1, 1, 0], &[0, 1, 0], &[1, 0, 0], "a");
        push(&mut table, &[1, 1, 0], &[1, 1, 0], &[1, 0, 0], "s");
        push(&mut table, &[1, 0, 0], &[1, 0, 0], &[1, 0, 0], "n");
        table
    }

    #[test]
    fn test_child_pair_encoding() {
        assert_eq!(child_pair_encoding(&[1, 0, 0], &[0, 1, 0]).unwrap(), vec![1, 2, 0]);
        assert_eq!(child_pair_encoding(&[0, 1, 0], &[1, 0, 0]).unwrap(), vec![1, 2, 0]);
        assert_eq!(child_pair_encoding(&[1, 1], &[1, 1]).unwrap(), vec![3, 3]);
        assert_eq!(
            child_pair_encoding(&[1, 1], &[1]).unwrap_err(),
            SummaryError::AreaLengthMismatch { expected: 2, found: 1 }
        );
    }

    // Characterization: pins the current output of the folding scheme.
    #[test]
    fn test_clado_prob_counts() {
        let result = get_clado_prob(&example(), Output::Counts).unwrap();
        assert_eq!(result.num_samples, 4);
        assert_eq!(result.get("110", "120"), 2.0);
        assert_eq!(result.get("110", "310"), 1.0);
        assert_eq!(result.get("100", "300"), 1.0);
        assert_eq!(result.values.len(), 2);
    }

    #[test]
    fn test_clado_prob_frequencies() {
        let result = get_clado_prob(&example(), Output::Frequencies).unwrap();
        assert_eq!(result.get("110", "120"), 0.5);
        let sum: f64 = result.values.values().flat_map(|pairs| pairs.values()).sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    // Characterization: pins the current output of the index:value keys.
    #[test]
    fn test_allopatry_prob() {
        let result = get_allopatry_prob(&example(), Output::Frequencies).unwrap();
        assert_eq!(result.num_samples, 2);
        assert_eq!(result.get("110", "0:1,1:2"), 1.0);
        assert_eq!(result.values["110"].len(), 1);
    }

    #[test]
    fn test_rows_without_children_are_skipped() {
        let mut table = example();
        table.push_row(
            SCORES,
            vec![(FieldKey::Node, FieldValue::Areas(vec![1, 1, 1]))],
        );
        let result = get_clado_prob(&table, Output::Counts).unwrap();
        assert_eq!(result.num_samples, 4);
        assert!(!result.values.contains_key("111"));
    }

    #[test]
    fn test_no_allopatric_rows() {
        let mut table = TaxonTable::new();
        push(&mut table, &[1, 0], &[1, 0], &[1, 0], "n");
        let result = get_allopatry_prob(&table, Output::Frequencies).unwrap();
        assert_eq!(result.num_samples, 0);
        assert!(result.values.is_empty());
    }

    #[test]
    fn test_missing_children() {
        let mut table = TaxonTable::new();
        table.push_row(SCORES, vec![(FieldKey::Node, FieldValue::Areas(vec![1]))]);
        assert_eq!(
            get_clado_prob(&table, Output::Counts).unwrap_err(),
            SummaryError::MissingField("ch0".to_string())
        );
    }
}
