use biogeolog::eventlog::EventLogParserBuilder;
use biogeolog::model::FieldKey;
use biogeolog::summary::{AreaField, Output, get_area_pair, get_clado_prob, get_gain_loss};
use criterion::{Criterion, criterion_group, criterion_main};

const LOG_FILES: &[(&str, &str)] = &[("History100", "benches/fixtures/history_t100_n32.log")];

fn parse_log(path: &str) -> usize {
    let parser = EventLogParserBuilder::for_file(path)
        .unwrap()
        .build()
        .unwrap();
    parser.events().num_taxa()
}

fn log_parsing(c: &mut Criterion) {
    for (name, path) in LOG_FILES {
        c.bench_function(name, |b| {
            b.iter(|| parse_log(path));
        });
    }
}

fn summaries(c: &mut Criterion) {
    for (name, path) in LOG_FILES {
        let events = EventLogParserBuilder::for_file(path)
            .unwrap()
            .build()
            .unwrap()
            .into_events();

        c.bench_function(&format!("{name}-summaries"), |b| {
            b.iter(|| {
                for (_, table) in &events {
                    get_gain_loss(table, Output::Frequencies).unwrap();
                    get_area_pair(table, AreaField::Node, Output::Frequencies).unwrap();
                    if table.has_field(&FieldKey::Child0) {
                        get_clado_prob(table, Output::Frequencies).unwrap();
                    }
                }
            });
        });
    }
}

criterion_group!(regression, log_parsing);
criterion_group! {
    name = reporting;
    config = Criterion::default().sample_size(10);
    targets = summaries
}
criterion_main!(regression, reporting);
