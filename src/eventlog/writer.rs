//! Tab-separated output of taxon tables.

use crate::model::{FieldKey, ScoreField, TaxonTable};
use std::io::{self, Write};

/// Placeholder for a row without a value for a field
const MISSING_VALUE: &str = "NA";

/// Writes a [TaxonTable] as tab-separated text: a header line with the
/// column names, then one line per row.
///
/// Field values are rendered the way they appear in the log, e.g. `0110`
/// for areas and `{{t:0.5,a:1,s:1,i:0}}` for events; missing values as `NA`.
///
/// # Errors
/// Returns an I/O error if writing fails.
pub fn write_table<W: Write>(table: &TaxonTable, mut writer: W) -> io::Result<()> {
    let keys: Vec<&FieldKey> = table.keys().collect();

    write!(writer, "iteration")?;
    for field in [ScoreField::Posterior, ScoreField::Likelihood, ScoreField::Prior] {
        write!(writer, "\t{field}")?;
    }
    for key in &keys {
        write!(writer, "\t{key}")?;
    }
    writeln!(writer)?;

    for row in 0..table.num_rows() {
        let scores = table.row_scores(row);
        write!(
            writer,
            "{}\t{}\t{}\t{}",
            scores.iteration, scores.posterior, scores.likelihood, scores.prior
        )?;
        for key in &keys {
            match table.column(key).and_then(|column| column[row].as_ref()) {
                Some(value) => write!(writer, "\t{value}")?,
                None => write!(writer, "\t{MISSING_VALUE}")?,
            }
        }
        writeln!(writer)?;
    }

    writer.flush()
}

/// Returns the tab-separated representation of a [TaxonTable].
///
/// See [write_table] for the layout.
///
/// # Example
/// ```
/// use biogeolog::eventlog::to_tsv;
/// use biogeolog::model::{FieldKey, FieldValue, SampleScores, TaxonTable};
///
/// let mut table = TaxonTable::new();
/// let scores = SampleScores { iteration: 5, posterior: -1.5, likelihood: -1.0, prior: -0.5 };
/// table.push_row(scores, vec![(FieldKey::Node, FieldValue::Areas(vec![0, 1]))]);
///
/// assert_eq!(to_tsv(&table), "iteration\tposterior\tlikelihood\tprior\tnd\n5\t-1.5\t-1\t-0.5\t01\n");
/// ```
pub fn to_tsv(table: &TaxonTable) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_table(table, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldValue, SampleScores};

    #[test]
    fn test_missing_values_are_marked() {
        let scores = SampleScores { iteration: 1, posterior: 0.0, likelihood: 0.0, prior: 0.0 };
        let mut table = TaxonTable::new();
        table.push_row(scores, vec![]);
        table.push_row(scores, vec![(FieldKey::CladoState, FieldValue::Code("w".to_string()))]);

        let tsv = to_tsv(&table);
        let lines: Vec<&str> = tsv.lines().collect();
        assert_eq!(lines[0], "iteration\tposterior\tlikelihood\tprior\tcs");
        assert_eq!(lines[1], "1\t0\t0\t0\tNA");
        assert_eq!(lines[2], "1\t0\t0\t0\tw");
    }
}
