use biogeolog::model::{EventsByTaxon, ScoreField};
use biogeolog::parse_event_file;
use biogeolog::summary::{
    AreaField, CladoFilter, Output, Selection, SummaryError, get_allopatry_prob, get_area_pair,
    get_best, get_clado_prob, get_clado_state, get_gain_loss,
};
use std::path::Path;

fn events() -> EventsByTaxon {
    let path = Path::new("tests").join("fixtures").join("history_t6_n4.log");
    parse_event_file(path).unwrap()
}

#[test]
fn test_best_by_posterior() {
    let events = events();
    let best = get_best(&events[4], Selection::Count(3), ScoreField::Posterior).unwrap();

    // Iterations 20 and 50 tie; the later row comes first
    assert_eq!(best.iterations(), &[40, 50, 20]);
    assert_eq!(best.num_rows(), 3);
    assert!(best.is_consistent());
    assert_eq!(best.clado_states().unwrap(), vec![Some("a"), Some("s"), Some("n")]);
}

#[test]
fn test_best_fraction_and_score_name() {
    let events = events();
    let score = ScoreField::from_name("Likelihood");
    let best = get_best(&events[1], Selection::Fraction(0.5), score).unwrap();

    assert_eq!(best.iterations(), &[40, 50, 20]);

    // Unknown names fall back to the posterior
    let fallback = ScoreField::from_name("unknown");
    let best = events.best(1, Selection::Fraction(0.5), fallback).unwrap();
    assert_eq!(best.iterations(), &[40, 50, 20]);
}

#[test]
fn test_best_unknown_taxon() {
    let events = events();
    assert_eq!(
        events.best(0, Selection::Count(1), ScoreField::Posterior).unwrap_err(),
        SummaryError::UnknownTaxon(0)
    );
}

#[test]
fn test_gain_loss() {
    let events = events();

    let counts = get_gain_loss(&events[4], Output::Counts).unwrap();
    assert_eq!(counts.gain, vec![1.0, 1.0, 0.0]);
    assert_eq!(counts.loss, vec![0.0, 0.0, 1.0]);
    assert_eq!(counts.num_samples, 6);

    let freqs = get_gain_loss(&events[1], Output::Frequencies).unwrap();
    assert_eq!(freqs.gain, vec![1.0 / 6.0, 0.0, 0.0]);
    assert_eq!(freqs.loss, vec![0.0, 1.0 / 6.0, 0.0]);

    let none = get_gain_loss(&events[3], Output::Frequencies).unwrap();
    assert_eq!(none.gain, vec![0.0; 3]);
    assert_eq!(none.loss, vec![0.0; 3]);
}

#[test]
fn test_gain_loss_at_root() {
    let events = events();
    let root = get_gain_loss(&events[6], Output::Counts).unwrap();

    assert_eq!(root.num_samples, 6);
    assert_eq!(root.gain, vec![0.0; 3]);
    assert_eq!(root.loss, vec![0.0; 3]);
}

#[test]
fn test_area_pair() {
    let events = events();
    let matrix = get_area_pair(&events[6], AreaField::Node, Output::Counts).unwrap();

    assert!(matrix.is_symmetric());
    assert_eq!(matrix.values[0], vec![6.0, 5.0, 6.0]);
    assert_eq!(matrix.values[1], vec![5.0, 5.0, 5.0]);
    assert_eq!(matrix.values[2], vec![6.0, 5.0, 6.0]);

    for field in [AreaField::Node, AreaField::Child0, AreaField::Child1] {
        let matrix = get_area_pair(&events[5], field, Output::Frequencies).unwrap();
        assert!(matrix.is_symmetric());
        assert_eq!(matrix.num_areas(), 3);
    }
}

#[test]
fn test_clado_state() {
    let events = events();

    let root = get_clado_state(&events[6], CladoFilter::All, Output::Frequencies).unwrap();
    assert_eq!(root.get("a"), 5.0 / 6.0);
    assert_eq!(root.get("s"), 1.0 / 6.0);

    for (_, table) in events.iter().filter(|(_, t)| t.clado_states().is_some()) {
        let freqs = get_clado_state(table, CladoFilter::All, Output::Frequencies).unwrap();
        let sum: f64 = freqs.values.values().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }
}

#[test]
fn test_clado_state_filters() {
    let events = events();
    let table = &events[4];

    let wide = get_clado_state(table, CladoFilter::IncludeNarrow(false), Output::Counts).unwrap();
    assert_eq!(wide.num_samples, 5);
    assert_eq!(wide.get("n"), 0.0);
    assert_eq!(wide.get("a"), 3.0);

    let min3 = get_clado_state(table, CladoFilter::MinRangeSize(3), Output::Counts).unwrap();
    assert_eq!(min3.num_samples, 1);
    assert_eq!(min3.get("a"), 1.0);

    let leaf = get_clado_state(&events[1], CladoFilter::All, Output::Counts);
    assert_eq!(leaf.unwrap_err(), SummaryError::MissingField("cs".to_string()));
}

// Characterization: pins the current daughter pair folding.
#[test]
fn test_clado_prob() {
    let events = events();
    let result = get_clado_prob(&events[4], Output::Counts).unwrap();

    assert_eq!(result.num_samples, 6);
    assert_eq!(result.get("110", "120"), 2.0);
    assert_eq!(result.get("110", "310"), 2.0);
    assert_eq!(result.get("100", "300"), 1.0);
    assert_eq!(result.get("111", "112"), 1.0);
}

// Characterization: pins the current index:value pairing.
#[test]
fn test_allopatry_prob() {
    let events = events();
    let result = get_allopatry_prob(&events[4], Output::Frequencies).unwrap();

    assert_eq!(result.num_samples, 3);
    assert_eq!(result.get("110", "0:1,1:2"), 2.0 / 3.0);
    assert_eq!(result.get("111", "0:1,1:1,2:2"), 1.0 / 3.0);
}
