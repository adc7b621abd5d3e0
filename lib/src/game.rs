//! # Per-trial game state
//!
//! A `GameState` holds everything a single simulated game mutates: the
//! library, the hand, the lands on the battlefield and the first turn on
//! which each target spell was castable. Cards are moved between zones but
//! never created or destroyed, so `card_count` always equals the deck size.
use crate::autotap::{is_satisfiable_with_scratch, Scratch};
use crate::card::{ColorSet, LandDefinition, LandKind, ManaColor, ManaCost};
use crate::deck::{Deck, SimCard};
use crate::mulligan::Mulligan;
use crate::policy;
use rand::prelude::*;
use std::collections::VecDeque;

/// PlayedLand is a land on the battlefield
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlayedLand<'a> {
  pub land: &'a LandDefinition,
  /// The color fixed when a choice-locking land was played
  pub locked_color: Option<ManaColor>,
  /// True only during the turn the land entered, if it entered tapped
  pub tapped_this_turn: bool,
}

impl<'a> PlayedLand<'a> {
  pub fn new(land: &'a LandDefinition, locked_color: Option<ManaColor>, tapped: bool) -> Self {
    Self {
      land,
      locked_color,
      tapped_this_turn: tapped,
    }
  }

  /// Returns the colors of the land at `index` of `in_play`, collected from
  /// its resolved `LandDefinition::options`. A verge land gets its second
  /// color when any other land in play is a shock, dual or surveil land
  /// sharing one of the verge's colors
  pub fn produces(index: usize, in_play: &[PlayedLand]) -> ColorSet {
    let played = &in_play[index];
    let verge_enabled = played.land.kind == LandKind::Verge && {
      let verge_colors = played.land.colors();
      in_play.iter().enumerate().any(|(i, other)| {
        i != index
          && other.land.kind.enables_verge()
          && other.land.colors().intersects(verge_colors)
      })
    };
    played.land.produces(played.locked_color, verge_enabled)
  }
}

/// Returns one entry per untapped land of `in_play`: the colors it can tap for
pub fn sources_for(in_play: &[PlayedLand]) -> Vec<ColorSet> {
  (0..in_play.len())
    .filter(|i| !in_play[*i].tapped_this_turn)
    .map(|i| PlayedLand::produces(i, in_play))
    .collect()
}

#[derive(Debug)]
pub struct GameState<'a> {
  pub deck: &'a Deck,
  /// The current turn, 0 before the first turn begins
  pub turn: usize,
  pub on_the_play: bool,
  pub library: VecDeque<SimCard>,
  pub hand: Vec<SimCard>,
  pub lands: Vec<PlayedLand<'a>>,
  pub mulligan_count: usize,
  /// First turn each target spell was castable, indexed like the spell list
  pub first_castable: Vec<Option<usize>>,
  scratch: Scratch,
}

impl<'a> GameState<'a> {
  /// Returns a game with every card of `deck` shuffled into the library
  pub fn new(deck: &'a Deck, spell_count: usize, on_the_play: bool, rng: &mut impl Rng) -> Self {
    let mut cards = deck.cards();
    cards.shuffle(rng);
    Self::from_library(deck, spell_count, on_the_play, cards.into())
  }

  /// Returns a game whose library is `library`, in draw order
  pub fn from_library(
    deck: &'a Deck,
    spell_count: usize,
    on_the_play: bool,
    library: VecDeque<SimCard>,
  ) -> Self {
    Self {
      deck,
      turn: 0,
      on_the_play,
      library,
      hand: Vec::with_capacity(16),
      lands: Vec::with_capacity(16),
      mulligan_count: 0,
      first_castable: vec![None; spell_count],
      scratch: Scratch::default(),
    }
  }

  /// Moves the top card of the library to the hand. Does nothing when the
  /// library is empty
  pub fn draw(&mut self) {
    if let Some(card) = self.library.pop_front() {
      self.hand.push(card);
    }
  }

  /// Runs the mulligan procedure and keeps the resulting hand
  pub fn draw_opening_hand<M: Mulligan>(&mut self, mulligan: &M, rng: &mut impl Rng) {
    let (hand, mulligan_count) = mulligan.simulate_hand(rng, &mut self.library);
    self.hand = hand;
    self.mulligan_count = mulligan_count;
  }

  /// Untaps, advances the turn counter and draws, except on the first turn
  /// when on the play
  pub fn begin_turn(&mut self) {
    for land in self.lands.iter_mut() {
      land.tapped_this_turn = false;
    }
    self.turn += 1;
    if !(self.turn == 1 && self.on_the_play) {
      self.draw();
    }
  }

  /// Converts every cycler in hand whose threshold is met into a tapped basic.
  /// The land count is taken once, before any conversion
  pub fn cycle_cyclers(&mut self) {
    let deck = self.deck;
    let lands_in_play = self.lands.len();
    let mut cycled = Vec::new();
    self.hand.retain(|card| match card {
      SimCard::Cycler(i) if deck.cycler(*i).can_cycle(lands_in_play) => {
        cycled.push(*i);
        false
      }
      _ => true,
    });
    for i in cycled {
      self.lands.push(PlayedLand::new(deck.cycler(i).land(), None, true));
    }
  }

  /// Returns the land the card at `hand_index` would become if played now
  pub fn land_from_hand(
    &self,
    hand_index: usize,
    locked_color: Option<ManaColor>,
  ) -> Option<PlayedLand<'a>> {
    match self.hand.get(hand_index) {
      Some(SimCard::Land(i)) => {
        let land = self.deck.land(*i);
        let tapped = land.kind.enters_tapped(self.lands.len(), self.turn);
        Some(PlayedLand::new(land, locked_color, tapped))
      }
      _ => None,
    }
  }

  /// Moves the land at `hand_index` onto the battlefield. Returns false if
  /// that card is not a land
  pub fn play_land(&mut self, hand_index: usize, locked_color: Option<ManaColor>) -> bool {
    match self.land_from_hand(hand_index, locked_color) {
      Some(played) => {
        self.hand.swap_remove(hand_index);
        self.lands.push(played);
        true
      }
      None => false,
    }
  }

  /// The colors of every untapped land in play
  pub fn sources(&self) -> Vec<ColorSet> {
    sources_for(&self.lands)
  }

  /// The untapped sources there would be if `extra` were also in play
  pub fn sources_with(&self, extra: PlayedLand<'a>) -> Vec<ColorSet> {
    let mut in_play = self.lands.clone();
    in_play.push(extra);
    sources_for(&in_play)
  }

  pub fn can_cast(&mut self, cost: &ManaCost) -> bool {
    let sources = self.sources();
    is_satisfiable_with_scratch(cost, &sources, &mut self.scratch)
  }

  /// Marks the current turn for every spell castable for the first time
  pub fn record_castable(&mut self, spells: &[ManaCost]) {
    let sources = self.sources();
    for (i, spell) in spells.iter().enumerate() {
      if self.first_castable[i].is_some() {
        continue;
      }
      if is_satisfiable_with_scratch(spell, &sources, &mut self.scratch) {
        self.first_castable[i] = Some(self.turn);
      }
    }
  }

  /// Plays a full turn: untap and draw, cycle, play a land, then check spells
  pub fn play_turn(&mut self, spells: &[ManaCost], rng: &mut impl Rng) {
    self.begin_turn();
    self.cycle_cyclers();
    if let Some(play) = policy::choose_land_play(self, spells, rng) {
      trace!(
        "turn {}: playing {:?} (locked {:?})",
        self.turn,
        self.hand[play.hand_index],
        play.locked_color
      );
      self.play_land(play.hand_index, play.locked_color);
    }
    self.record_castable(spells);
  }

  /// The number of cards across library, hand and battlefield
  pub fn card_count(&self) -> usize {
    self.library.len() + self.hand.len() + self.lands.len()
  }
}
