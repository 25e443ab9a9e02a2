use biogeolog::eventlog::{Burnin, EventLogParserBuilder, to_tsv};
use biogeolog::model::{EventsByTaxon, ScoreField, TaxonTable};
use biogeolog::summary::{
    AreaField, CladoFilter, Output, Selection, SummaryError, get_allopatry_prob, get_area_pair,
    get_best, get_clado_prob, get_clado_state, get_gain_loss,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Builder;
use log::{LevelFilter, info};
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "biogeolog")]
#[command(about = "Summaries of biogeographic character-history logs")]
struct Cli {
    /// Character-history log file
    file: PathBuf,

    /// Number of initial samples discarded as burnin
    #[arg(long, conflicts_with = "burnin_fraction")]
    burnin: Option<usize>,

    /// Fraction of initial samples discarded as burnin (0.0 to 1.0)
    #[arg(long)]
    burnin_fraction: Option<f64>,

    /// Drop the start sample before applying burnin
    #[arg(long)]
    skip_first: bool,

    /// Keep the first annotation group of every row
    #[arg(long)]
    keep_first_group: bool,

    /// More log output (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Number of rows per taxon
    Taxa,
    /// Highest-scoring rows
    Best {
        #[command(flatten)]
        taxon: TaxonArg,
        /// Number of rows
        #[arg(long, conflicts_with = "fraction", allow_negative_numbers = true)]
        count: Option<i64>,
        /// Fraction of rows
        #[arg(long, allow_negative_numbers = true)]
        fraction: Option<f64>,
        /// Score column: posterior, likelihood or prior
        #[arg(long, default_value = "posterior")]
        score: String,
        /// Print tab-separated tables instead of JSON
        #[arg(long)]
        tsv: bool,
    },
    /// Area gains and losses
    GainLoss {
        #[command(flatten)]
        taxon: TaxonArg,
        #[command(flatten)]
        output: OutputArg,
    },
    /// Co-occurrence of areas
    AreaPair {
        #[command(flatten)]
        taxon: TaxonArg,
        /// Area column
        #[arg(long, value_enum, default_value_t = AreaColumn::Nd)]
        field: AreaColumn,
        #[command(flatten)]
        output: OutputArg,
    },
    /// Cladogenic state frequencies
    CladoState {
        #[command(flatten)]
        taxon: TaxonArg,
        /// Only rows whose vertex occupies at least this many areas
        #[arg(long, conflicts_with = "exclude_narrow")]
        min_size: Option<usize>,
        /// Drop rows whose vertex occupies a single area
        #[arg(long)]
        exclude_narrow: bool,
        #[command(flatten)]
        output: OutputArg,
    },
    /// Daughter range pairs per ancestral range
    CladoProb {
        #[command(flatten)]
        taxon: TaxonArg,
        #[command(flatten)]
        output: OutputArg,
    },
    /// Daughter range pairs of allopatric splits
    AllopatryProb {
        #[command(flatten)]
        taxon: TaxonArg,
        #[command(flatten)]
        output: OutputArg,
    },
}

#[derive(Args)]
struct TaxonArg {
    /// Taxon (vertex index); all taxa if omitted
    #[arg(long)]
    taxon: Option<usize>,
}

#[derive(Args)]
struct OutputArg {
    /// Report raw counts instead of frequencies
    #[arg(long)]
    counts: bool,
}

impl OutputArg {
    fn output(&self) -> Output {
        if self.counts {
            Output::Counts
        } else {
            Output::Frequencies
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum AreaColumn {
    Nd,
    Ch0,
    Ch1,
}

impl From<AreaColumn> for AreaField {
    fn from(column: AreaColumn) -> Self {
        match column {
            AreaColumn::Nd => AreaField::Node,
            AreaColumn::Ch0 => AreaField::Child0,
            AreaColumn::Ch1 => AreaField::Child1,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    Builder::new().filter_level(level).parse_env("RUST_LOG").init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut builder = EventLogParserBuilder::for_file(&cli.file)?;
    if let Some(count) = cli.burnin {
        builder = builder.with_burnin(Burnin::Count(count));
    } else if let Some(fraction) = cli.burnin_fraction {
        builder = builder.with_burnin(Burnin::Percentage(fraction));
    }
    if cli.skip_first {
        builder = builder.with_skip_first();
    }
    if cli.keep_first_group {
        builder = builder.keep_first_group();
    }
    let parser = builder.build()?;
    info!(
        "Using {} of {} samples from {}",
        parser.num_samples(),
        parser.num_total_samples(),
        cli.file.display()
    );
    let events = parser.into_events();

    match cli.command {
        Command::Taxa => {
            let rows: BTreeMap<usize, usize> = events
                .iter()
                .map(|(taxon, table)| (*taxon, table.num_rows()))
                .collect();
            print_json(&rows)
        }
        Command::Best { taxon, count, fraction, score, tsv } => {
            let selection = match (count, fraction) {
                (_, Some(fraction)) => Selection::Fraction(fraction),
                (Some(count), None) => Selection::Count(count),
                (None, None) => Selection::Count(1),
            };
            let score = ScoreField::from_name(&score);
            let best = per_taxon(&events, taxon.taxon, |table| get_best(table, selection, score))?;
            if tsv {
                for (taxon, table) in &best {
                    println!("# taxon {taxon}");
                    print!("{}", to_tsv(table));
                }
                Ok(())
            } else {
                print_json(&best)
            }
        }
        Command::GainLoss { taxon, output } => print_json(&per_taxon(&events, taxon.taxon, |t| {
            get_gain_loss(t, output.output())
        })?),
        Command::AreaPair { taxon, field, output } => {
            print_json(&per_taxon(&events, taxon.taxon, |t| {
                get_area_pair(t, field.into(), output.output())
            })?)
        }
        Command::CladoState { taxon, min_size, exclude_narrow, output } => {
            let filter = match min_size {
                Some(k) => CladoFilter::MinRangeSize(k),
                None if exclude_narrow => CladoFilter::IncludeNarrow(false),
                None => CladoFilter::All,
            };
            print_json(&per_taxon(&events, taxon.taxon, |t| {
                get_clado_state(t, filter, output.output())
            })?)
        }
        Command::CladoProb { taxon, output } => print_json(&per_taxon(&events, taxon.taxon, |t| {
            get_clado_prob(t, output.output())
        })?),
        Command::AllopatryProb { taxon, output } => {
            print_json(&per_taxon(&events, taxon.taxon, |t| {
                get_allopatry_prob(t, output.output())
            })?)
        }
    }
}

/// Applies `summarize` to one taxon, or to every taxon if none is given.
fn per_taxon<T, F>(
    events: &EventsByTaxon,
    taxon: Option<usize>,
    summarize: F,
) -> Result<BTreeMap<usize, T>, SummaryError>
where
    F: Fn(&TaxonTable) -> Result<T, SummaryError>,
{
    match taxon {
        Some(taxon) => {
            let table = events.get(taxon).ok_or(SummaryError::UnknownTaxon(taxon))?;
            Ok(BTreeMap::from([(taxon, summarize(table)?)]))
        }
        None => events
            .iter()
            .map(|(taxon, table)| Ok((*taxon, summarize(table)?)))
            .collect(),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
