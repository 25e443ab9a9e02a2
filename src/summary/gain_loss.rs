//! Area gains and losses along a branch.

use crate::model::{FieldKey, TaxonTable};
use crate::summary::{Output, SummaryError, require};
use serde::Serialize;

/// Number of gains and losses per area.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GainLoss {
    /// Losses (state 0) per area
    pub loss: Vec<f64>,
    /// Gains (state 1) per area
    pub gain: Vec<f64>,
    /// Number of rows considered
    pub num_samples: usize,
}

impl GainLoss {
    /// Returns the values for `state` (0 = loss, 1 = gain).
    pub fn by_state(&self, state: u8) -> Option<&[f64]> {
        match state {
            0 => Some(&self.loss),
            1 => Some(&self.gain),
            _ => None,
        }
    }
}

/// Counts the events of every row by new state and area.
///
/// Every row counts toward the number of samples, including rows without
/// events; frequencies are thus the mean number of events per sample.
///
/// # Errors
/// * [SummaryError::MissingField] if the table has no `ev` or `nd` column
/// * [SummaryError::InvalidState] for an event state other than 0 or 1
/// * [SummaryError::AreaOutOfRange] for an area index beyond the `nd` length
pub fn get_gain_loss(table: &TaxonTable, output: Output) -> Result<GainLoss, SummaryError> {
    let events = require(table.events(), &FieldKey::Events)?;
    let num_areas = require(table.num_areas(), &FieldKey::Node)?;

    let mut counts = [vec![0.0; num_areas], vec![0.0; num_areas]];
    for event in events.into_iter().flatten().flatten() {
        if event.state > 1 {
            return Err(SummaryError::InvalidState(event.state));
        }
        if event.index >= num_areas {
            return Err(SummaryError::AreaOutOfRange { index: event.index, num_areas });
        }
        counts[event.state as usize][event.index] += 1.0;
    }

    let num_samples = table.num_rows();
    let [loss, gain] = counts.map(|per_area| {
        per_area
            .into_iter()
            .map(|count| output.apply(count, num_samples))
            .collect::<Vec<f64>>()
    });

    Ok(GainLoss { loss, gain, num_samples })
}
