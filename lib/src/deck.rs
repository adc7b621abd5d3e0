//! # Deck description and compact simulation cards
use crate::card::{CyclerDefinition, LandDefinition, LandKind};
use crate::config::MAX_DECK_SIZE;
use crate::error::{Error, Result};

/// SimCard is the compact card handle stored in libraries and hands.
/// Lands and cyclers index into the owning `Deck`
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SimCard {
  Land(usize),
  Cycler(usize),
  /// Any card that is neither a land nor a cycler
  Other,
}

impl SimCard {
  #[inline]
  pub fn is_land(self) -> bool {
    match self {
      Self::Land(_) => true,
      _ => false,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckLand {
  pub land: LandDefinition,
  pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckCycler {
  pub cycler: CyclerDefinition,
  pub count: usize,
}

/// Deck is the validated description of the cards a trial starts with.
/// Cards not declared as lands or cyclers fill the deck up to `deck_size`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
  pub lands: Vec<DeckLand>,
  pub cyclers: Vec<DeckCycler>,
  pub deck_size: usize,
}

#[derive(Debug, Clone)]
pub struct DeckBuilder {
  lands: Vec<DeckLand>,
  cyclers: Vec<DeckCycler>,
  deck_size: usize,
}

impl DeckBuilder {
  pub fn new(deck_size: usize) -> Self {
    Self {
      lands: Vec::new(),
      cyclers: Vec::new(),
      deck_size,
    }
  }

  /// Adds `count` copies of `land`, merging with an identical definition
  pub fn land(mut self, land: LandDefinition, count: usize) -> Self {
    match self.lands.iter_mut().find(|dl| dl.land == land) {
      Some(existing) => existing.count += count,
      None => self.lands.push(DeckLand { land, count }),
    }
    self
  }

  /// Adds `count` copies of `cycler`, merging with an identical definition
  pub fn cycler(mut self, cycler: CyclerDefinition, count: usize) -> Self {
    match self.cyclers.iter_mut().find(|dc| dc.cycler == cycler) {
      Some(existing) => existing.count += count,
      None => self.cyclers.push(DeckCycler { cycler, count }),
    }
    self
  }

  pub fn build(self) -> Result<Deck> {
    Deck::new(self.lands, self.cyclers, self.deck_size)
  }
}

impl Deck {
  /// Returns a deck after checking that the declared cards fit in `deck_size`
  pub fn new(lands: Vec<DeckLand>, cyclers: Vec<DeckCycler>, deck_size: usize) -> Result<Self> {
    let deck = Self {
      lands,
      cyclers,
      deck_size,
    };
    deck.validate()?;
    Ok(deck)
  }

  /// Checks the deck size, that the declared cards fit in it, and every
  /// land and cycler definition
  pub fn validate(&self) -> Result<()> {
    if self.deck_size == 0 {
      return Err(Error::NotPositive("deck_size"));
    }
    if self.deck_size > MAX_DECK_SIZE {
      return Err(Error::TooLarge {
        name: "deck_size",
        max: MAX_DECK_SIZE,
      });
    }
    let cards = self.land_count().saturating_add(self.cycler_count());
    if cards > self.deck_size {
      return Err(Error::TooManyCards {
        cards,
        deck_size: self.deck_size,
      });
    }
    for dl in &self.lands {
      dl.land.kind.validate(&dl.land.production)?;
    }
    for dc in &self.cyclers {
      dc.cycler.validate()?;
    }
    Ok(())
  }

  pub fn land_count(&self) -> usize {
    self
      .lands
      .iter()
      .fold(0, |accum: usize, dl| accum.saturating_add(dl.count))
  }

  pub fn cycler_count(&self) -> usize {
    self
      .cyclers
      .iter()
      .fold(0, |accum: usize, dc| accum.saturating_add(dc.count))
  }

  /// Returns the number of filler cards
  pub fn other_count(&self) -> usize {
    self
      .deck_size
      .saturating_sub(self.land_count())
      .saturating_sub(self.cycler_count())
  }

  /// Returns the number of land cards of `kind`
  pub fn count_of_kind(&self, kind: LandKind) -> usize {
    self
      .lands
      .iter()
      .filter(|dl| dl.land.kind == kind)
      .fold(0, |accum, dl| accum + dl.count)
  }

  #[inline]
  pub fn land(&self, index: usize) -> &LandDefinition {
    &self.lands[index].land
  }

  #[inline]
  pub fn cycler(&self, index: usize) -> &CyclerDefinition {
    &self.cyclers[index].cycler
  }

  /// Returns every card of the deck, in declaration order
  pub fn cards(&self) -> Vec<SimCard> {
    let mut result = Vec::with_capacity(self.deck_size);
    for (i, dl) in self.lands.iter().enumerate() {
      result.extend(std::iter::repeat(SimCard::Land(i)).take(dl.count));
    }
    for (i, dc) in self.cyclers.iter().enumerate() {
      result.extend(std::iter::repeat(SimCard::Cycler(i)).take(dc.count));
    }
    result.extend(std::iter::repeat(SimCard::Other).take(self.other_count()));
    result
  }
}
