//! Structs and logic to parse character-history logs.
//!
//! This module provides the [EventLogParserBuilder] and [EventLogParser]
//! structs, which offer methods to parse logs with different configurations.

use crate::model::{EventsByTaxon, FieldKey, FieldValue, SampleScores};
use crate::parser::annotation_scanner::{scan_groups, split_key_value, split_tokens, strip_group};
use crate::parser::defs::*;
use crate::parser::line_source::InMemoryLineSource;
use crate::parser::parsing_error::{ParsingError, ParsingErrorType};
use log::{debug, info};
use std::path::Path;
use std::str::FromStr;

// =#========================================================================#=
// BURNIN
// =#========================================================================#=
/// Specifies how many initial samples to skip as burnin.
///
/// Burnin is commonly used in MCMC sampling to discard initial samples
/// before the chain has converged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Burnin {
    /// Skip a fixed number of samples.
    ///
    /// # Example
    /// ```no_run
    /// use biogeolog::eventlog::Burnin;
    /// let burnin = Burnin::Count(1001); // Skip first 1001 samples
    /// ```
    Count(usize),

    /// Skip a percentage of total samples.
    ///
    /// The percentage must be in the range [0.0, 1.0);
    /// values outside are clamped.
    ///
    /// # Example
    /// ```no_run
    /// use biogeolog::eventlog::Burnin;
    /// let burnin = Burnin::Percentage(0.25); // Skip first 25% of samples
    /// ```
    Percentage(f64),
}

impl Burnin {
    /// Calculates the absolute number of samples to skip given the total
    /// sample count.
    ///
    /// # Arguments
    /// * `num_total_samples` - Total number of samples considered for burnin
    ///
    /// # Returns
    /// The number of samples to skip as burnin
    pub(crate) fn get_count(&self, num_total_samples: usize) -> usize {
        match self {
            Burnin::Count(n) => (*n).min(num_total_samples),
            Burnin::Percentage(p) => {
                (num_total_samples as f64 * p.clamp(0.0, 1.0)).floor() as usize
            }
        }
    }
}

// =#========================================================================#=
// EVENT LOG PARSER BUILDER
// =#========================================================================#=
/// Builder for configuring and creating an [EventLogParser].
///
/// # Configuration Options
/// * **Skip first**: Skip the first sample (the start state of the chain)
///   - [`with_skip_first()`](Self::with_skip_first)
///
/// * **Burnin**: Discard initial samples
///   - [`with_burnin()`](Self::with_burnin) — Skip a fixed count or percentage
///
/// * **First annotation group**: By default the first bracketed group of
///   every row is not treated as a taxon record and dropped
///   - [`keep_first_group()`](Self::keep_first_group) — Decode it as well
///
/// # Example
/// ```no_run
/// use biogeolog::eventlog::{Burnin, EventLogParserBuilder};
///
/// let parser = EventLogParserBuilder::for_file("bg.history.tsv")?
///     .with_skip_first()
///     .with_burnin(Burnin::Percentage(0.1))
///     .build()?;
///
/// println!("Kept {} of {} samples", parser.num_samples(), parser.num_total_samples());
/// let events = parser.into_events();
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct EventLogParserBuilder {
    source: InMemoryLineSource,
    burnin: Burnin,
    skip_first: bool,
    keep_first_group: bool,
}

// ============================================================================
// Building (pub)
// ============================================================================
impl EventLogParserBuilder {
    /// Creates a new builder from a file.
    ///
    /// The entire file is read into memory.
    /// The builder is initialized with default settings:
    /// - First sample not skipped
    /// - No burnin (all samples included)
    /// - First annotation group of each row dropped
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be read
    pub fn for_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        Ok(Self::for_source(InMemoryLineSource::from_file(path)?))
    }

    /// Creates a new builder from lines already in memory, with the same
    /// defaults as [for_file()](Self::for_file).
    pub fn for_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::for_source(InMemoryLineSource::from_lines(lines))
    }

    fn for_source(source: InMemoryLineSource) -> Self {
        EventLogParserBuilder {
            source,
            burnin: Burnin::Count(0),
            skip_first: false,
            keep_first_group: false,
        }
    }

    /// Configure burnin, i.e., discard initial samples.
    ///
    /// If both burnin and [with_skip_first()](Self::with_skip_first)
    /// are configured, the first sample is skipped, then burnin is applied
    /// to the remaining samples.
    pub fn with_burnin(mut self, burnin: Burnin) -> Self {
        self.burnin = burnin;
        self
    }

    /// Configure the parser to skip the first sample.
    pub fn with_skip_first(mut self) -> Self {
        self.skip_first = true;
        self
    }

    /// Configure the parser to decode the first annotation group of each
    /// row instead of dropping it.
    pub fn keep_first_group(mut self) -> Self {
        self.keep_first_group = true;
        self
    }

    /// Builds the [EventLogParser] and parses all kept samples.
    ///
    /// # Errors
    /// Returns a [ParsingError] for the first line that cannot be decoded:
    /// missing columns, unparsable numbers or malformed annotation groups.
    pub fn build(self) -> Result<EventLogParser, ParsingError> {
        let mut parser = EventLogParser {
            source: self.source,
            burnin: self.burnin,
            skip_first: self.skip_first,
            keep_first_group: self.keep_first_group,
            events: EventsByTaxon::default(),
            num_total_samples: 0,
            num_samples: 0,
            start_sample_pos: 0,
        };
        parser.init()?;
        Ok(parser)
    }
}

// =#========================================================================#=
// EVENT LOG PARSER
// =#========================================================================#=
/// Parser for character-history logs.
///
/// Created via [EventLogParserBuilder]; all kept samples are parsed during
/// [build()](EventLogParserBuilder::build).
pub struct EventLogParser {
    /// Lines of the log
    source: InMemoryLineSource,

    /// Whether to skip the first sample
    skip_first: bool,
    /// Amount of burnin to discard/skip
    burnin: Burnin,
    /// Whether the first annotation group of a row is a taxon record
    keep_first_group: bool,

    /// Result of parsing
    events: EventsByTaxon,

    /// The total number of sample rows in the log
    num_total_samples: usize,
    /// The number of sample rows kept after skip-first and burnin
    /// - Invariant: `num_samples <= num_total_samples`
    num_samples: usize,
    /// The first sample row to consider (0-indexed)
    /// - Invariant: `num_samples + start_sample_pos = num_total_samples`
    start_sample_pos: usize,
}

impl EventLogParser {
    /// Returns the decoded records.
    pub fn events(&self) -> &EventsByTaxon {
        &self.events
    }

    /// Consumes the parser and returns the decoded records.
    pub fn into_events(self) -> EventsByTaxon {
        self.events
    }

    /// Get the number of samples (without skipped and burnin samples).
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    /// Get the total number of samples including skipped and burnin.
    pub fn num_total_samples(&self) -> usize {
        self.num_total_samples
    }

    // ============================================================================
    // Initialization (private)
    // ============================================================================
    /// Counts samples, applies skip-first and burnin, and parses the rest.
    fn init(&mut self) -> Result<(), ParsingError> {
        let total = self.count_samples();
        self.configure_sample_counts(total);

        self.source.set_position(0);
        let mut sample_pos = 0;
        while let Some((line_no, line)) = self.source.next_line() {
            if !is_sample_line(line) {
                continue;
            }
            if sample_pos >= self.start_sample_pos {
                parse_sample(
                    line_no,
                    line,
                    self.keep_first_group,
                    &mut self.events,
                )?;
            }
            sample_pos += 1;
        }

        info!(
            "Parsed {} of {} samples into {} taxa",
            self.num_samples,
            self.num_total_samples,
            self.events.num_taxa()
        );
        Ok(())
    }

    /// Counts the sample rows, skipping blank and header lines.
    fn count_samples(&mut self) -> usize {
        self.source.set_position(0);
        let mut count = 0;
        while let Some((line_no, line)) = self.source.next_line() {
            if is_sample_line(line) {
                count += 1;
            } else if !line.trim().is_empty() {
                debug!("Skipping header at line {line_no}");
            }
        }
        count
    }

    /// Sets `num_total_samples`, `num_samples` and `start_sample_pos` based
    /// on `skip_first` and burnin configuration.
    fn configure_sample_counts(&mut self, num_total_samples: usize) {
        self.num_total_samples = num_total_samples;

        let mut skip_count = 0;
        if self.skip_first && num_total_samples > 0 {
            skip_count = 1;
        }
        skip_count += self.burnin.get_count(num_total_samples - skip_count);

        self.num_samples = num_total_samples.saturating_sub(skip_count);
        self.start_sample_pos = skip_count;
    }
}

// ============================================================================
// Line decoding (private)
// ============================================================================
/// Returns whether `line` is a sample row (not blank, not the header).
///
/// A row with an empty first column is a sample row and fails to decode.
fn is_sample_line(line: &str) -> bool {
    if line.trim().is_empty() {
        return false;
    }
    let first = line.split(COLUMN_SEPARATOR).next().unwrap_or("").trim();
    !first.eq_ignore_ascii_case(HEADER_ITERATION)
}

/// Decodes one sample row and appends its records to `events`.
///
/// The iteration and scores are appended once per record, so a row with
/// `k` records adds one row to each of `k` taxon tables.
fn parse_sample(
    line_no: usize,
    line: &str,
    keep_first_group: bool,
    events: &mut EventsByTaxon,
) -> Result<(), ParsingError> {
    let columns: Vec<&str> = line.split(COLUMN_SEPARATOR).collect();
    if columns.len() < MIN_COLUMNS {
        return Err(ParsingError::missing_column(
            line_no,
            COLUMN_NAMES[columns.len()],
            line,
        ));
    }

    let scores = SampleScores {
        iteration: parse_number(line_no, columns[0])?,
        posterior: parse_number(line_no, columns[1])?,
        likelihood: parse_number(line_no, columns[2])?,
        prior: parse_number(line_no, columns[3])?,
    };

    let annotations = columns[columns.len() - 1];
    let num_dropped = if keep_first_group { 0 } else { 1 };
    for group in scan_groups(annotations).skip(num_dropped) {
        let (taxon, fields) = parse_group(group)
            .map_err(|kind| ParsingError::at_line(kind, line_no, group))?;
        events.table_mut(taxon).push_row(scores, fields);
    }

    Ok(())
}

/// Decodes one annotation group into its taxon index and fields.
fn parse_group(group: &str) -> Result<(usize, Vec<(FieldKey, FieldValue)>), ParsingErrorType> {
    let mut tokens = split_tokens(strip_group(group));

    let index_token = tokens.next().ok_or(ParsingErrorType::MissingTaxonIndex)?;
    let (_, index_value) = split_key_value(index_token)?;
    let taxon = index_value
        .trim()
        .parse()
        .map_err(|_| ParsingErrorType::InvalidNumber(index_value.to_string()))?;

    let fields = tokens
        .map(|token| {
            let (code, value) = split_key_value(token)?;
            let key = FieldKey::from_code(code);
            let value = key.decode(value)?;
            Ok((key, value))
        })
        .collect::<Result<Vec<_>, ParsingErrorType>>()?;

    Ok((taxon, fields))
}

fn parse_number<T: FromStr>(line_no: usize, value: &str) -> Result<T, ParsingError> {
    value
        .trim()
        .parse()
        .map_err(|_| ParsingError::invalid_number(line_no, value))
}
