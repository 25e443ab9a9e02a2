//! Score columns shared by all records of a sample row.

use log::warn;
use serde::Serialize;
use std::fmt;

/// Iteration and scores of one sample row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleScores {
    pub iteration: u64,
    pub posterior: f64,
    pub likelihood: f64,
    pub prior: f64,
}

/// Score column used to rank sample rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreField {
    #[default]
    Posterior,
    Likelihood,
    Prior,
}

impl ScoreField {
    /// Maps a column name (case-insensitive) to a score field.
    ///
    /// Unknown names fall back to [ScoreField::Posterior] with a warning.
    ///
    /// # Example
    /// ```
    /// use biogeolog::model::ScoreField;
    ///
    /// assert_eq!(ScoreField::from_name("Likelihood"), ScoreField::Likelihood);
    /// assert_eq!(ScoreField::from_name("height"), ScoreField::Posterior);
    /// ```
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "posterior" => ScoreField::Posterior,
            "likelihood" => ScoreField::Likelihood,
            "prior" => ScoreField::Prior,
            _ => {
                warn!("Unknown score field '{name}', using 'posterior' instead");
                ScoreField::Posterior
            }
        }
    }

    /// Returns the column name.
    pub fn name(&self) -> &'static str {
        match self {
            ScoreField::Posterior => "posterior",
            ScoreField::Likelihood => "likelihood",
            ScoreField::Prior => "prior",
        }
    }
}

impl fmt::Display for ScoreField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
