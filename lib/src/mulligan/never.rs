use crate::deck::SimCard;
use crate::mulligan::mulligan::draw_hand;
use crate::mulligan::{Mulligan, STARTING_HAND_SIZE};
use rand::prelude::*;
use std::collections::VecDeque;

/// Never represents the mulligan strategy wherein the
/// player always keeps their initially drawn starting hand
#[derive(Debug, Serialize, Deserialize)]
pub struct Never {
  pub starting_hand_size: usize,
}

impl Never {
  pub fn new() -> Self {
    Self {
      starting_hand_size: STARTING_HAND_SIZE,
    }
  }
}

impl Default for Never {
  fn default() -> Self {
    Self::new()
  }
}

impl Mulligan for Never {
  fn simulate_hand(
    &self,
    _rng: &mut impl Rng,
    library: &mut VecDeque<SimCard>,
  ) -> (Vec<SimCard>, usize) {
    (draw_hand(library, self.starting_hand_size), 0)
  }
}
