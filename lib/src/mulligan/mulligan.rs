use crate::deck::SimCard;
use rand::prelude::*;
use std::collections::VecDeque;

/// The base trait for any mulligan type
pub trait Mulligan {
  /// Draws an opening hand from the front of `library` and returns the kept
  /// hand along with the number of mulligans taken
  ///
  /// # Arguments
  ///
  /// * `rng` - A random number generator used to reshuffle the library and to choose cards to bottom
  /// * `library` - The shuffled library. Kept cards are removed from its front, bottomed cards are appended to its back
  fn simulate_hand(
    &self,
    rng: &mut impl Rng,
    library: &mut VecDeque<SimCard>,
  ) -> (Vec<SimCard>, usize);
}

/// Moves up to `count` cards from the front of `library` into a new hand
pub fn draw_hand(library: &mut VecDeque<SimCard>, count: usize) -> Vec<SimCard> {
  let count = std::cmp::min(count, library.len());
  library.drain(..count).collect()
}
