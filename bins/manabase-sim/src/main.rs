#[macro_use]
extern crate log;
extern crate env_logger;
extern crate manabase;
extern crate serde_json;

use clap::Parser;
use manabase::report::Output;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

/// Magic: the Gathering mana base Monte Carlo simulator
///
/// Estimates the probability of casting each target spell by each turn.
/// Simplifications: life totals are ignored, fetched and cycled basics come
/// from an unlimited supply, and every land in hand is a distinct option.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
  /// Path to the input file
  #[arg(default_value = "inputs.txt")]
  input: PathBuf,
  /// Base seed for reproducible runs, overrides the input file
  #[arg(long)]
  seed: Option<u64>,
  /// Number of turns to simulate, overrides the input file
  #[arg(long)]
  turns: Option<usize>,
  /// Number of Monte Carlo iterations, overrides the input file
  #[arg(long)]
  cycles: Option<usize>,
  /// Write the full report as JSON to this path
  #[arg(long)]
  json: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
  env_logger::init();
  let args = Args::parse();

  info!("Reading input file @ {:?}", args.input);
  let text = fs::read_to_string(&args.input)
    .map_err(|e| format!("cannot read input file {:?}: {}", args.input, e))?;
  let mut input = manabase::parse_input(&text)?;
  if let Some(seed) = args.seed {
    input.settings.seed = Some(seed);
  }
  if let Some(turns) = args.turns {
    input.settings.turns = turns;
  }
  if let Some(cycles) = args.cycles {
    input.settings.cycles = cycles;
  }

  println!(
    "Running simulation with {} lands, {} cyclers and {} target spell(s)...",
    input.deck.land_count(),
    input.deck.cycler_count(),
    input.spells.len()
  );
  println!("Monte Carlo cycles: {}", input.settings.cycles);
  println!(
    "On the {}",
    if input.settings.on_the_play {
      "play"
    } else {
      "draw"
    }
  );
  println!();

  let sim = manabase::run(&input)?;
  let output = Output::new(&input.deck, &input.spells, &sim);
  println!("{}", output);
  println!("Seed: {}", output.seed);

  if let Some(path) = args.json {
    info!("Writing JSON report to {:?}", path);
    fs::write(&path, serde_json::to_string_pretty(&output)?)?;
  }
  Ok(())
}
