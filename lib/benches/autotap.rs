#[macro_use]
extern crate criterion;

use criterion::{black_box, Criterion};
use manabase::autotap::{is_satisfiable_with_scratch, Scratch};
use manabase::card::{ColorSet, ManaCost, ManaProduction};

fn sources(list: &[&str]) -> Vec<ColorSet> {
    list.iter()
        .map(|s| s.parse::<ManaProduction>().expect("Bad production").colors())
        .collect()
}

fn criterion_function(c: &mut Criterion) {
    let board = sources(&["W/U", "U/B", "W/B", "W", "U", "B/R", "R/G", "C"]);
    let costs: Vec<ManaCost> = ["3WUB", "{2/W}{2/U}{2/B}", "{W/U}{U/B}{B/R}1", "WWWUUU", "8"]
        .iter()
        .map(|s| s.parse().expect("Bad mana cost"))
        .collect();
    c.bench_function("autotap eight sources", move |b| {
        let mut scratch = Scratch::default();
        b.iter(|| {
            for cost in &costs {
                black_box(is_satisfiable_with_scratch(cost, &board, &mut scratch));
            }
        })
    });
}

criterion_group!(benches, criterion_function);
criterion_main!(benches);
