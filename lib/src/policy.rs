//! # Land play decisions
//!
//! Chooses which land, if any, the simulated player puts onto the battlefield
//! each turn and which color a choice-locking land locks to.
//!
//! A land that makes a pending spell castable right away is always preferred.
//! Lands that do not lock a color are tried first. Choice-locking lands are
//! tried afterwards, once per color they can lock to. When no land enables a
//! spell, the land comes from the first non-empty tier:
//!
//! 1. lands that enter tapped, except slowlands and multiversal lands
//! 2. lands that enter untapped, except multiversal lands
//! 3. slowlands that enter tapped
//! 4. multiversal lands
//!
//! Within a tier the land sharing the most colors with the target spells wins,
//! and remaining ties are broken uniformly at random.
use crate::autotap::is_satisfiable;
use crate::card::{ColorSet, LandDefinition, LandKind, ManaColor, ManaCost};
use crate::deck::SimCard;
use crate::game::{GameState, PlayedLand};
use rand::prelude::*;

/// The land to move from hand to the battlefield this turn
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LandPlay {
  pub hand_index: usize,
  pub locked_color: Option<ManaColor>,
}

// Color scoring weights
const REQUIRED_BY_SPELL: i32 = 10;
const MISSING_FROM_PLAY: i32 = 5;
const MISSING_FROM_HAND: i32 = 3;
const PER_PRODUCER_IN_PLAY: i32 = -1;

/// Returns the land to play from `state.hand`, or `None` if the hand holds
/// no land
pub fn choose_land_play(
  state: &GameState,
  spells: &[ManaCost],
  rng: &mut impl Rng,
) -> Option<LandPlay> {
  let candidates: Vec<(usize, &LandDefinition)> = state
    .hand
    .iter()
    .enumerate()
    .filter_map(|(i, card)| match card {
      SimCard::Land(l) => Some((i, state.deck.land(*l))),
      _ => None,
    })
    .collect();
  if candidates.is_empty() {
    return None;
  }
  let wanted = required_colors(spells);

  let current = state.sources();
  let pending: Vec<&ManaCost> = spells
    .iter()
    .enumerate()
    .filter(|(i, spell)| state.first_castable[*i].is_none() && !is_satisfiable(spell, &current))
    .map(|(_, spell)| spell)
    .collect();

  if !pending.is_empty() {
    if let Some(play) = enabling_play(state, &candidates, &pending, spells, wanted, rng) {
      debug!("turn {}: land enables a pending spell", state.turn);
      return Some(play);
    }
  }

  let tiered: Vec<(usize, usize, &LandDefinition)> = candidates
    .iter()
    .map(|(i, land)| {
      let tapped = land.kind.enters_tapped(state.lands.len(), state.turn);
      (tier(land.kind, tapped), *i, *land)
    })
    .collect();
  let best_tier = tiered.iter().map(|(t, _, _)| *t).min()?;
  let scored: Vec<((usize, &LandDefinition), i32)> = tiered
    .iter()
    .filter(|(t, _, _)| *t == best_tier)
    .map(|(_, i, land)| ((*i, *land), overlap(land, wanted)))
    .collect();
  let (hand_index, land) = pick_best(&scored, rng)?;
  let locked_color = if land.kind.is_choice_locking() {
    choose_color(state, hand_index, land, spells, rng)
  } else {
    None
  };
  Some(LandPlay {
    hand_index,
    locked_color,
  })
}

// Looks for a land whose play makes at least one pending spell castable
fn enabling_play(
  state: &GameState,
  candidates: &[(usize, &LandDefinition)],
  pending: &[&ManaCost],
  spells: &[ManaCost],
  wanted: ColorSet,
  rng: &mut impl Rng,
) -> Option<LandPlay> {
  let enables = |hand_index: usize, locked_color: Option<ManaColor>| {
    state
      .land_from_hand(hand_index, locked_color)
      .map(|played: PlayedLand| {
        let sources = state.sources_with(played);
        pending.iter().any(|spell| is_satisfiable(spell, &sources))
      })
      .unwrap_or(false)
  };

  let plain: Vec<(usize, i32)> = candidates
    .iter()
    .filter(|(i, land)| !land.kind.is_choice_locking() && enables(*i, None))
    .map(|(i, land)| (*i, overlap(land, wanted)))
    .collect();
  if let Some(hand_index) = pick_best(&plain, rng) {
    return Some(LandPlay {
      hand_index,
      locked_color: None,
    });
  }

  let mut locking = Vec::new();
  for (i, land) in candidates.iter().filter(|(_, l)| l.kind.is_choice_locking()) {
    for color in land.colors().iter() {
      if enables(*i, Some(color)) {
        locking.push(((*i, color), color_score(state, *i, color, spells)));
      }
    }
  }
  pick_best(&locking, rng).map(|(hand_index, color)| LandPlay {
    hand_index,
    locked_color: Some(color),
  })
}

// Lower tiers are played first
fn tier(kind: LandKind, enters_tapped: bool) -> usize {
  match kind {
    LandKind::Multiversal => 4,
    LandKind::Slowland if enters_tapped => 3,
    _ if enters_tapped => 1,
    _ => 2,
  }
}

/// Returns the union of the colored requirements of `spells`
pub fn required_colors(spells: &[ManaCost]) -> ColorSet {
  spells
    .iter()
    .fold(ColorSet::EMPTY, |set, spell| set.union(spell.colored_requirements()))
}

fn overlap(land: &LandDefinition, wanted: ColorSet) -> i32 {
  land.colors().intersection(wanted).len() as i32
}

/// Picks the color a choice-locking land at `hand_index` locks to: the
/// highest `color_score`, ties broken uniformly at random
pub fn choose_color(
  state: &GameState,
  hand_index: usize,
  land: &LandDefinition,
  spells: &[ManaCost],
  rng: &mut impl Rng,
) -> Option<ManaColor> {
  let scored: Vec<(ManaColor, i32)> = land
    .colors()
    .iter()
    .map(|color| (color, color_score(state, hand_index, color, spells)))
    .collect();
  pick_best(&scored, rng)
}

/// Scores `color` for a choice-locking land about to be played from
/// `hand_index`
pub fn color_score(
  state: &GameState,
  hand_index: usize,
  color: ManaColor,
  spells: &[ManaCost],
) -> i32 {
  let mut score = 0;
  if spells
    .iter()
    .any(|spell| spell.colored_requirements().contains(color))
  {
    score += REQUIRED_BY_SPELL;
  }
  let producers = (0..state.lands.len())
    .filter(|i| PlayedLand::produces(*i, &state.lands).contains(color))
    .count() as i32;
  if producers == 0 {
    score += MISSING_FROM_PLAY;
  }
  score += PER_PRODUCER_IN_PLAY * producers;
  let in_hand = state
    .hand
    .iter()
    .enumerate()
    .filter(|(i, _)| *i != hand_index)
    .any(|(_, card)| match card {
      SimCard::Land(l) => state.deck.land(*l).colors().contains(color),
      SimCard::Cycler(c) => state.deck.cycler(*c).color == color,
      SimCard::Other => false,
    });
  if !in_hand {
    score += MISSING_FROM_HAND;
  }
  score
}

// Returns an item with the highest score, ties broken uniformly at random
fn pick_best<T: Copy>(scored: &[(T, i32)], rng: &mut impl Rng) -> Option<T> {
  let best = scored.iter().map(|(_, score)| *score).max()?;
  let top: Vec<T> = scored
    .iter()
    .filter(|(_, score)| *score == best)
    .map(|(item, _)| *item)
    .collect();
  top.choose(rng).copied()
}

#[cfg(test)]
mod tests {
  use crate::card::*;
  use crate::deck::*;
  use crate::game::*;
  use crate::policy::*;
  use rand::rngs::SmallRng;
  use rand::SeedableRng;

  fn land(kind: LandKind, production: &str) -> LandDefinition {
    LandDefinition::new(kind, production.parse().unwrap()).unwrap()
  }

  fn cost(s: &str) -> ManaCost {
    s.parse().unwrap()
  }

  fn state_with_hand<'a>(deck: &'a Deck, hand: Vec<SimCard>) -> GameState<'a> {
    let mut state = GameState::from_library(deck, 1, true, Default::default());
    state.hand = hand;
    state.turn = 1;
    state
  }

  #[test]
  fn no_land_in_hand() {
    let deck = DeckBuilder::new(10)
      .land(LandDefinition::basic(ManaColor::Red), 1)
      .build()
      .unwrap();
    let state = state_with_hand(&deck, vec![SimCard::Other, SimCard::Other]);
    let mut rng = SmallRng::seed_from_u64(0);
    assert_eq!(choose_land_play(&state, &[cost("R")], &mut rng), None);
  }

  #[test]
  fn enabling_land_beats_tapped_land() {
    let deck = DeckBuilder::new(10)
      .land(land(LandKind::Tapped, "R"), 1)
      .land(LandDefinition::basic(ManaColor::Red), 1)
      .build()
      .unwrap();
    let state = state_with_hand(&deck, vec![SimCard::Land(0), SimCard::Land(1)]);
    let mut rng = SmallRng::seed_from_u64(0);
    for _ in 0..20 {
      let play = choose_land_play(&state, &[cost("R")], &mut rng).unwrap();
      assert_eq!(play.hand_index, 1);
    }
  }

  #[test]
  fn tapped_land_first_when_nothing_enables() {
    let deck = DeckBuilder::new(10)
      .land(land(LandKind::Tapped, "R"), 1)
      .land(LandDefinition::basic(ManaColor::Red), 1)
      .build()
      .unwrap();
    let state = state_with_hand(&deck, vec![SimCard::Land(1), SimCard::Land(0)]);
    let mut rng = SmallRng::seed_from_u64(0);
    for _ in 0..20 {
      let play = choose_land_play(&state, &[cost("3R")], &mut rng).unwrap();
      assert_eq!(play.hand_index, 1);
    }
  }

  #[test]
  fn tier_order() {
    assert_eq!(tier(LandKind::Tapped, true), 1);
    assert_eq!(tier(LandKind::Surveil, true), 1);
    assert_eq!(tier(LandKind::Basic, false), 2);
    assert_eq!(tier(LandKind::Slowland, false), 2);
    assert_eq!(tier(LandKind::Slowland, true), 3);
    assert_eq!(tier(LandKind::Multiversal, false), 4);
  }

  #[test]
  fn multiversal_played_last() {
    let deck = DeckBuilder::new(10)
      .land(land(LandKind::Multiversal, "WUBRG"), 1)
      .land(land(LandKind::Slowland, "WU"), 1)
      .build()
      .unwrap();
    let state = state_with_hand(&deck, vec![SimCard::Land(0), SimCard::Land(1)]);
    let mut rng = SmallRng::seed_from_u64(0);
    for _ in 0..20 {
      let play = choose_land_play(&state, &[cost("5G")], &mut rng).unwrap();
      assert_eq!(play.hand_index, 1);
      assert_eq!(play.locked_color, None);
    }
  }

  #[test]
  fn overlap_breaks_ties_within_tier() {
    let deck = DeckBuilder::new(10)
      .land(LandDefinition::basic(ManaColor::White), 1)
      .land(LandDefinition::basic(ManaColor::Green), 1)
      .build()
      .unwrap();
    let state = state_with_hand(&deck, vec![SimCard::Land(0), SimCard::Land(1)]);
    let mut rng = SmallRng::seed_from_u64(0);
    for _ in 0..20 {
      let play = choose_land_play(&state, &[cost("2GG")], &mut rng).unwrap();
      assert_eq!(play.hand_index, 1);
    }
  }

  #[test]
  fn equal_lands_pick_randomly() {
    let deck = DeckBuilder::new(10)
      .land(LandDefinition::basic(ManaColor::White), 2)
      .build()
      .unwrap();
    let state = state_with_hand(&deck, vec![SimCard::Land(0), SimCard::Land(0)]);
    let mut rng = SmallRng::seed_from_u64(0);
    let mut seen = [false; 2];
    for _ in 0..100 {
      let play = choose_land_play(&state, &[cost("5")], &mut rng).unwrap();
      seen[play.hand_index] = true;
    }
    assert_eq!(seen, [true, true]);
  }

  #[test]
  fn locking_land_picks_the_enabling_color() {
    let deck = DeckBuilder::new(10)
      .land(land(LandKind::Multiversal, "WUBRG"), 1)
      .build()
      .unwrap();
    let state = state_with_hand(&deck, vec![SimCard::Land(0)]);
    let mut rng = SmallRng::seed_from_u64(0);
    for _ in 0..20 {
      let play = choose_land_play(&state, &[cost("B")], &mut rng).unwrap();
      assert_eq!(play.locked_color, Some(ManaColor::Black));
    }
  }

  #[test]
  fn plain_enabling_land_beats_locking_enabling_land() {
    let deck = DeckBuilder::new(10)
      .land(land(LandKind::Multiversal, "WUBRG"), 1)
      .land(LandDefinition::basic(ManaColor::Red), 1)
      .build()
      .unwrap();
    let state = state_with_hand(&deck, vec![SimCard::Land(0), SimCard::Land(1)]);
    let mut rng = SmallRng::seed_from_u64(0);
    for _ in 0..20 {
      let play = choose_land_play(&state, &[cost("R")], &mut rng).unwrap();
      assert_eq!(play.hand_index, 1);
      assert_eq!(play.locked_color, None);
    }
  }

  #[test]
  fn tapped_locking_land_keeps_its_color() {
    let deck = DeckBuilder::new(10)
      .land(land(LandKind::Wilds, "WUBRG"), 1)
      .build()
      .unwrap();
    let mut state = state_with_hand(&deck, vec![SimCard::Land(0)]);
    let spells = [cost("1G")];
    let mut rng = SmallRng::seed_from_u64(0);
    let play = choose_land_play(&state, &spells, &mut rng).unwrap();
    assert_eq!(play.hand_index, 0);
    assert_eq!(play.locked_color, Some(ManaColor::Green));

    assert!(state.play_land(play.hand_index, play.locked_color));
    assert!(state.lands[0].tapped_this_turn);
    assert!(state.sources().is_empty());
    let green = ColorSet::single(ManaColor::Green);
    for _ in 0..3 {
      state.begin_turn();
      assert_eq!(state.lands[0].locked_color, Some(ManaColor::Green));
      assert_eq!(PlayedLand::produces(0, &state.lands), green);
      assert_eq!(state.sources(), vec![green]);
    }
  }

  #[test]
  fn color_score_rewards_missing_required_colors() {
    let wilds = land(LandKind::Wilds, "WUBRG");
    let deck = DeckBuilder::new(10)
      .land(wilds, 1)
      .land(LandDefinition::basic(ManaColor::Green), 1)
      .cycler(CyclerDefinition::new(ManaColor::Red, 2).unwrap(), 1)
      .build()
      .unwrap();
    let mut state = state_with_hand(&deck, vec![SimCard::Land(0), SimCard::Cycler(0)]);
    state.lands.push(PlayedLand::new(deck.land(1), None, false));
    let spells = [cost("GR"), cost("U")];
    // Required, already produced once, not elsewhere in hand
    assert_eq!(color_score(&state, 0, ManaColor::Green, &spells), 10 - 1 + 3);
    // Required, missing from play, available from the cycler
    assert_eq!(color_score(&state, 0, ManaColor::Red, &spells), 10 + 5);
    // Required and missing everywhere
    assert_eq!(color_score(&state, 0, ManaColor::Blue, &spells), 10 + 5 + 3);
    // Not required
    assert_eq!(color_score(&state, 0, ManaColor::White, &spells), 5 + 3);

    let mut rng = SmallRng::seed_from_u64(0);
    let choice = choose_color(&state, 0, deck.land(0), &spells, &mut rng);
    assert_eq!(choice, Some(ManaColor::Blue));
  }
}
