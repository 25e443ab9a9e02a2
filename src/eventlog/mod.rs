//! Parser and writer for character-history logs.
//!
//! This module provides [EventLogParserBuilder] and [EventLogParser] to decode
//! the log written by a biogeographic character-history monitor into
//! [EventsByTaxon].
//!
//! # Quick API
//! For simple use cases with default settings:
//! * [`read_events`] - reads the lines of a log file
//! * [`get_events`] - decodes lines into [EventsByTaxon]
//! * [`parse_file`] - both at once
//!
//! # Format
//! Each sample row is tab-separated:
//! * `iteration \t posterior \t likelihood \t prior \t ... \t tree`
//!
//! The last column is an extended Newick tree whose vertices carry annotation
//! groups, one per vertex:
//! * `[&index=3;nd=0110;pa=0100;ch0=0100;ch1=0010;cs=a;bn=4;ev={{t:0.2,a:1.3,s:1,i:2}}]`
//!
//! Furthermore:
//! * The first token holds the taxon (vertex) index
//! * `ch0`, `ch1`, `cs` and `bn` only occur at internal vertices
//! * A header row starting with `Iter` and blank lines are skipped
//! * The first annotation group of a row is dropped unless configured
//!   otherwise via [EventLogParserBuilder::keep_first_group]

mod parser;
mod writer;

pub use parser::{Burnin, EventLogParser, EventLogParserBuilder};
pub use writer::{to_tsv, write_table};

use crate::model::EventsByTaxon;
use crate::parser::line_source::InMemoryLineSource;
use crate::parser::ParsingError;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Reads all lines of a log file into memory.
///
/// # Errors
/// Returns a [ParsingError] of kind
/// [IoError](crate::parser::ParsingErrorType::IoError) if the file cannot be
/// read.
pub fn read_events<P: AsRef<Path>>(path: P) -> Result<Vec<String>, ParsingError> {
    Ok(InMemoryLineSource::from_file(path)?.into_lines())
}

/// Decodes log lines into [EventsByTaxon] using default settings.
///
/// # Example
/// ```
/// use biogeolog::eventlog::get_events;
///
/// let lines = [
///     "Iter\tPosterior\tLikelihood\tPrior\tTree",
///     "0\t-10.5\t-8.0\t-2.5\t(A[&index=0;nd=10]:1,B[&index=1;nd=01]:1)[&index=2;nd=11];",
/// ];
/// let events = get_events(lines)?;
/// assert_eq!(events.num_taxa(), 2);
/// assert_eq!(events[2].num_rows(), 1);
/// # Ok::<(), biogeolog::parser::ParsingError>(())
/// ```
pub fn get_events<I, S>(lines: I) -> Result<EventsByTaxon, ParsingError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Ok(EventLogParserBuilder::for_lines(lines).build()?.into_events())
}

/// Reads and decodes a log file using default settings.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<EventsByTaxon, ParsingError> {
    Ok(EventLogParserBuilder::for_file(path)?.build()?.into_events())
}
