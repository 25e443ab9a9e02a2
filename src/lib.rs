//! Biogeolog is a library to parse and summarize the character-history logs
//! written by Bayesian biogeographic analyses.
//!
//! Each sample row of such a log holds the scores of one MCMC sample and an
//! extended Newick tree whose vertices are annotated with their range (as
//! area bits), the ranges of their daughters, the cladogenic state at the
//! split and the anagenetic events along their branch.
//! Core functionality provided:
//! - Parser: Decode a log into one [TaxonTable](model::TaxonTable) per
//!   taxon (vertex index), see [crate::eventlog].
//! - Summaries: Pure functions over a taxon table, see [crate::summary]:
//!   - best samples by posterior, likelihood or prior
//!   - area gains and losses
//!   - co-occurrence of areas within a range
//!   - cladogenic state frequencies
//!   - daughter range pairs per ancestral range (all and allopatric splits)
//! - Configurability:
//!   - Burnin: number/percentage of initial samples skipped
//!   - Skip first: the start sample of a chain can be dropped
//!   - Keep first group: by default the first annotation group of every row
//!     is dropped; logs whose first group is a real vertex can keep it
//!
//! # Usage patterns
//! 1. [get_events] and [parse_event_file] decode with default settings.
//! 2. [EventLogParserBuilder](eventlog::EventLogParserBuilder) gives full
//!    control over burnin, skip first and the first group.
//!
//! ## Example Default Configuration
//! ```no_run
//! use biogeolog::{get_gain_loss, parse_event_file};
//! use biogeolog::summary::Output;
//!
//! let events = parse_event_file("biogeo.log").unwrap();
//! for (taxon, table) in &events {
//!     let gain_loss = get_gain_loss(table, Output::Frequencies).unwrap();
//!     println!("{taxon}: {:?}", gain_loss.gain);
//! }
//! ```
//!
//! ## Example Parser Configuration
//! ```no_run
//! use biogeolog::eventlog::{Burnin, EventLogParserBuilder};
//!
//! let parser = EventLogParserBuilder::for_file("biogeo.log")?
//!     .with_skip_first()                    // Skip start sample
//!     .with_burnin(Burnin::Percentage(0.1)) // Discard first 10%
//!     .build()?;
//!
//! println!("Kept {} of {} samples", parser.num_samples(), parser.num_total_samples());
//! # Ok::<(), biogeolog::parser::ParsingError>(())
//! ```

pub mod eventlog;
pub mod model;
pub mod parser;
pub mod summary;

pub use eventlog::{get_events, read_events};
pub use summary::{
    get_allopatry_prob, get_area_pair, get_best, get_clado_prob, get_clado_state, get_gain_loss,
};

use crate::model::EventsByTaxon;
use crate::parser::ParsingError;
use std::path::Path;

// ============================================================================
// Quick API
// ============================================================================
/// Reads and decodes a log file using default settings.
///
/// See [`eventlog::parse_file`].
pub fn parse_event_file<P: AsRef<Path>>(path: P) -> Result<EventsByTaxon, ParsingError> {
    eventlog::parse_file(path)
}
