//! # Monte Carlo driver and castability observations
use crate::card::ManaCost;
use crate::config::MAX_TURNS;
use crate::deck::Deck;
use crate::error::{Error, Result};
use crate::game::GameState;
use crate::mulligan::{London, Mulligan};
use crate::parse::Input;
use rand::prelude::*;
use rand::rngs::SmallRng;
use rayon::prelude::*;

pub struct SimulationConfig<'a, 'b, M: Mulligan> {
  /// The number of independent trials
  pub run_count: usize,
  /// The last turn tracked
  pub turns: usize,
  pub deck: &'a Deck,
  pub spells: &'a [ManaCost],
  pub mulligan: &'b M,
  pub on_the_play: bool,
  /// Trial `i` is seeded with `seed + i`. Drawn from entropy when unset
  pub seed: Option<u64>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Simulation {
  /// One entry per target spell, in input order
  pub observations: Vec<Observations>,
  pub run_count: usize,
  pub turns: usize,
  pub on_the_play: bool,
  pub seed: u64,
}

/// Observations counts, for a single spell, the turn on which it first
/// became castable in each trial
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observations {
  /// `first_castable[t]` is the number of trials first castable on turn `t + 1`
  pub first_castable: Vec<usize>,
  /// Trials in which the spell was never castable
  pub never: usize,
  pub total_runs: usize,
}

impl Observations {
  pub fn new(turns: usize) -> Self {
    Self {
      first_castable: vec![0; turns],
      never: 0,
      total_runs: 0,
    }
  }

  /// Records one trial's outcome
  pub fn observe(&mut self, first_castable: Option<usize>) {
    self.total_runs += 1;
    match first_castable {
      Some(turn) if turn >= 1 && turn <= self.first_castable.len() => {
        self.first_castable[turn - 1] += 1
      }
      _ => self.never += 1,
    }
  }

  /// Adds the counts of `other` to `self`
  pub fn merge(mut self, other: &Self) -> Self {
    for (count, o) in self.first_castable.iter_mut().zip(&other.first_castable) {
      *count += o;
    }
    self.never += other.never;
    self.total_runs += other.total_runs;
    self
  }

  /// Returns the probability that the spell was castable on or before `turn`
  pub fn p_by_turn(&self, turn: usize) -> f64 {
    if self.total_runs == 0 {
      return 0.0;
    }
    let turn = std::cmp::min(turn, self.first_castable.len());
    let castable: usize = self.first_castable[..turn].iter().sum();
    castable as f64 / self.total_runs as f64
  }

  /// Returns the probability that the spell was castable at all
  pub fn p_ever(&self) -> f64 {
    if self.total_runs == 0 {
      return 0.0;
    }
    (self.total_runs - self.never) as f64 / self.total_runs as f64
  }

  /// Returns `p_by_turn` for every tracked turn, starting at turn 1
  pub fn cumulative(&self) -> Vec<f64> {
    (1..=self.first_castable.len())
      .map(|turn| self.p_by_turn(turn))
      .collect()
  }
}

impl Simulation {
  pub fn from_config<M: Mulligan + Sync>(config: &SimulationConfig<M>) -> Result<Self> {
    if config.run_count == 0 {
      return Err(Error::NotPositive("cycles"));
    }
    if config.turns == 0 {
      return Err(Error::NotPositive("turns"));
    }
    if config.turns > MAX_TURNS {
      return Err(Error::TooLarge {
        name: "turns",
        max: MAX_TURNS,
      });
    }
    config.deck.validate()?;
    let seed = config
      .seed
      .unwrap_or_else(|| SmallRng::from_entropy().gen::<u64>());
    info!(
      "Running {} trials over {} turns for {} spells (seed {})",
      config.run_count,
      config.turns,
      config.spells.len(),
      seed
    );
    let empty = || vec![Observations::new(config.turns); config.spells.len()];
    let observations = (0..config.run_count)
      .into_par_iter()
      .fold(empty, |mut observations, trial| {
        let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(trial as u64));
        let first_castable = run_trial(config, &mut rng);
        for (obs, turn) in observations.iter_mut().zip(first_castable) {
          obs.observe(turn);
        }
        observations
      })
      .reduce(empty, |accum, partial| {
        accum
          .into_iter()
          .zip(&partial)
          .map(|(a, p)| a.merge(p))
          .collect()
      });
    info!("Finished {} trials", config.run_count);
    Ok(Self {
      observations,
      run_count: config.run_count,
      turns: config.turns,
      on_the_play: config.on_the_play,
      seed,
    })
  }
}

/// Runs the simulation described by a parsed input file, using the London mulligan
pub fn run(input: &Input) -> Result<Simulation> {
  input.settings.validate()?;
  Simulation::from_config(&SimulationConfig {
    run_count: input.settings.cycles,
    turns: input.settings.turns,
    deck: &input.deck,
    spells: &input.spells,
    mulligan: &London::new(),
    on_the_play: input.settings.on_the_play,
    seed: input.settings.seed,
  })
}

/// Plays one game up to the last tracked turn and returns, for each spell,
/// the first turn it was castable
pub fn run_trial<M: Mulligan>(
  config: &SimulationConfig<M>,
  rng: &mut impl Rng,
) -> Vec<Option<usize>> {
  let mut state = GameState::new(config.deck, config.spells.len(), config.on_the_play, rng);
  state.draw_opening_hand(config.mulligan, rng);
  for _ in 0..config.turns {
    state.play_turn(config.spells, rng);
    debug_assert_eq!(state.card_count(), config.deck.deck_size);
  }
  state.first_castable
}
