//! # Simulation report
//!
//! `Output` is the serializable result of a run, and its `Display`
//! implementation renders the per-spell probability table.
use crate::card::ManaCost;
use crate::deck::Deck;
use crate::simulation::{Observations, Simulation};
use std::fmt;

// Number of turns shown per spell, starting at its first castable turn
const TURNS_SHOWN: usize = 4;
const RULE_WIDTH: usize = 60;

/// Per-spell result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpellReport {
  /// The cost as written in the input
  pub cost: String,
  /// `by_turn[t]` is the probability the spell was castable on or before turn `t + 1`
  pub by_turn: Vec<f64>,
  /// The probability the spell was castable within the tracked turns
  pub total: f64,
  pub observations: Observations,
}

impl SpellReport {
  pub fn new(cost: &ManaCost, observations: &Observations) -> Self {
    Self {
      cost: cost.to_string(),
      by_turn: observations.cumulative(),
      total: observations.p_ever(),
      observations: observations.clone(),
    }
  }

  /// The first turn with a non-zero probability
  pub fn first_turn(&self) -> Option<usize> {
    self.by_turn.iter().position(|p| *p > 0.0).map(|i| i + 1)
  }
}

/// Output of a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Output {
  pub spells: Vec<SpellReport>,
  pub cycles: usize,
  pub turns: usize,
  pub on_the_play: bool,
  pub seed: u64,
  pub deck_size: usize,
  pub land_count: usize,
  pub cycler_count: usize,
}

impl Output {
  pub fn new(deck: &Deck, spells: &[ManaCost], sim: &Simulation) -> Self {
    Self {
      spells: spells
        .iter()
        .zip(&sim.observations)
        .map(|(cost, obs)| SpellReport::new(cost, obs))
        .collect(),
      cycles: sim.run_count,
      turns: sim.turns,
      on_the_play: sim.on_the_play,
      seed: sim.seed,
      deck_size: deck.deck_size,
      land_count: deck.land_count(),
      cycler_count: deck.cycler_count(),
    }
  }
}

impl fmt::Display for Output {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    writeln!(f, "Results (probability of casting each spell by turn):")?;
    writeln!(f, "{}", heavy)?;
    for (i, spell) in self.spells.iter().enumerate() {
      writeln!(f)?;
      writeln!(f, "Spell {}: {}", i + 1, spell.cost)?;
      writeln!(f, "{}", light)?;
      match spell.first_turn() {
        None => writeln!(f, "  Never castable within simulated turns")?,
        Some(first) => {
          let last = std::cmp::min(first + TURNS_SHOWN - 1, spell.by_turn.len());
          for turn in first..=last {
            writeln!(f, "  Turn {:2}: {:6.2}%", turn, spell.by_turn[turn - 1] * 100.0)?;
          }
        }
      }
    }
    writeln!(f)?;
    write!(f, "{}", heavy)
  }
}
