use crate::deck::SimCard;
use crate::mulligan::mulligan::draw_hand;
use crate::mulligan::{Mulligan, STARTING_HAND_SIZE};
use rand::prelude::*;
use std::collections::VecDeque;

// Hands at or below this size are always kept
const ALWAYS_KEEP_SIZE: usize = 4;

/// London represents a mulligan strategy that adheres to the
/// [London mulligan rule](https://mtg.gamepedia.com/Mulligan#London_mulligan):
/// after each mulligan the player draws a full hand and puts one more card
/// on the bottom of the library.
///
/// A hand is kept or thrown back based on its land count alone:
/// * 7 or 6 cards: mulligan with 1 land or fewer, or with 6 lands or more
/// * 5 cards: mulligan with no lands, or with only lands
/// * 4 cards or fewer: always keep
#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize)]
pub struct London;

impl London {
  pub fn new() -> Self {
    Self
  }

  /// Returns true if a hand of `hand_size` cards holding `land_count` lands
  /// should be thrown back
  pub fn should_mulligan(hand_size: usize, land_count: usize) -> bool {
    match hand_size {
      6..=7 => land_count <= 1 || land_count >= 6,
      5 => land_count == 0 || land_count == hand_size,
      _ => false,
    }
  }

  /// Removes `count` cards from `hand` and appends them to the back of
  /// `library`. Non-lands go first, in random order, then random lands
  pub fn bottom(
    rng: &mut impl Rng,
    hand: &mut Vec<SimCard>,
    count: usize,
    library: &mut VecDeque<SimCard>,
  ) {
    let (mut lands, mut others): (Vec<SimCard>, Vec<SimCard>) =
      hand.drain(..).partition(|card| card.is_land());
    others.shuffle(rng);
    lands.shuffle(rng);
    let mut ordered = others;
    ordered.append(&mut lands);
    let count = std::cmp::min(count, ordered.len());
    library.extend(ordered.drain(..count));
    *hand = ordered;
  }
}

impl Mulligan for London {
  fn simulate_hand(
    &self,
    rng: &mut impl Rng,
    library: &mut VecDeque<SimCard>,
  ) -> (Vec<SimCard>, usize) {
    let mut mulligan_count = 0;
    loop {
      let mut hand = draw_hand(library, STARTING_HAND_SIZE);
      London::bottom(rng, &mut hand, mulligan_count, library);
      let land_count = hand.iter().filter(|card| card.is_land()).count();
      let keep =
        hand.len() <= ALWAYS_KEEP_SIZE || !London::should_mulligan(hand.len(), land_count);
      if keep {
        return (hand, mulligan_count);
      }
      // Shuffle the hand back and try again with one more card to bottom
      library.extend(hand);
      library.make_contiguous().shuffle(rng);
      mulligan_count += 1;
    }
  }
}
