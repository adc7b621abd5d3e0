#[macro_use]
extern crate criterion;

use criterion::Criterion;
use manabase::mulligan::London;
use manabase::parse_input;
use manabase::simulation::{Simulation, SimulationConfig};

fn criterion_function(c: &mut Criterion) {
    let input = parse_input(include_str!("inputs/esper.txt")).expect("Bad input file");
    c.bench_function_over_inputs(
        "esper simulation",
        move |b, runs| {
            let mulligan = London::new();
            b.iter(|| {
                Simulation::from_config(&SimulationConfig {
                    run_count: **runs,
                    turns: input.settings.turns,
                    deck: &input.deck,
                    spells: &input.spells,
                    mulligan: &mulligan,
                    on_the_play: input.settings.on_the_play,
                    seed: Some(1),
                })
                .expect("simulation failed")
            })
        },
        &[1000],
    );
}

criterion_group!(benches, criterion_function);
criterion_main!(benches);
