use crate::card::{ColorSet, ManaColor};
use crate::error::{Error, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// The largest total of generic mana a cost may ask for
pub const MAX_GENERIC: usize = 99;

lazy_static! {
  static ref COST_TOKEN: Regex =
    Regex::new(r"\{([^}]+)\}|(\d+)|([WUBRGCwubrgc])").expect("valid regex");
}

/// A single requirement of a mana cost
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CostSlot {
  /// One mana of any color
  Generic,
  /// One mana of the given color
  Color(ManaColor),
  /// One mana of `color`, or `generic` mana of any color, e.g. `{2/W}`
  Hybrid { color: ManaColor, generic: u8 },
  /// One mana of either color, e.g. `{W/U}`
  Either(ManaColor, ManaColor),
}

impl CostSlot {
  /// The colors that can pay this slot on their own, empty for generic mana
  pub fn colors(self) -> ColorSet {
    match self {
      Self::Generic => ColorSet::EMPTY,
      Self::Color(c) => ColorSet::single(c),
      Self::Hybrid { color, .. } => ColorSet::single(color),
      Self::Either(a, b) => ColorSet::single(a).with(b),
    }
  }
}

/// ManaCost represents the card [mana cost](https://mtg.gamepedia.com/Mana_cost)
/// as an ordered list of requirement slots. Order is kept from the input
/// but has no effect on whether the cost can be paid.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManaCost {
  slots: Vec<CostSlot>,
  text: String,
}

impl ManaCost {
  /// Returns a new ManaCost worth 0 mana
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns a cost made of `slots`
  pub fn from_slots(slots: Vec<CostSlot>) -> Self {
    let text = render(&slots);
    Self { slots, text }
  }

  /// Returns a cost of `count` generic mana
  pub fn generic(count: usize) -> Self {
    Self::from_slots(vec![CostSlot::Generic; count])
  }

  pub fn slots(&self) -> &[CostSlot] {
    &self.slots
  }

  /// The cost as it was written
  pub fn text(&self) -> &str {
    &self.text
  }

  /// True if the cost requires no mana at all
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.slots.is_empty()
  }

  /// Returns the minimum number of sources needed, counting each hybrid slot
  /// as paid by its color
  #[inline]
  pub fn min_units(&self) -> usize {
    self.slots.len()
  }

  /// Returns the number of generic slots
  pub fn generic_count(&self) -> usize {
    self
      .slots
      .iter()
      .filter(|s| **s == CostSlot::Generic)
      .count()
  }

  /// Returns every color mentioned by a colored or hybrid slot
  pub fn colored_requirements(&self) -> ColorSet {
    self
      .slots
      .iter()
      .fold(ColorSet::EMPTY, |set, slot| set.union(slot.colors()))
  }
}

impl FromStr for ManaCost {
  type Err = Error;

  /// Parses costs such as `2G`, `{1}UB`, `{3/R}{3/W}` and `{W/U}U`
  fn from_str(s: &str) -> Result<Self> {
    let text: String = s.split_whitespace().collect();
    let bad = || Error::BadManaCost(s.trim().to_string());
    let mut slots = Vec::new();
    let mut end = 0;
    for caps in COST_TOKEN.captures_iter(&text) {
      let whole = caps.get(0).ok_or_else(bad)?;
      if whole.start() != end {
        return Err(bad());
      }
      end = whole.end();
      if let Some(bracket) = caps.get(1) {
        parse_bracket(bracket.as_str(), &mut slots).ok_or_else(bad)?;
      } else if let Some(number) = caps.get(2) {
        let count = number.as_str().parse::<usize>().map_err(|_| bad())?;
        push_generic(count, &mut slots).ok_or_else(bad)?;
      } else if let Some(symbol) = caps.get(3) {
        let color = symbol
          .as_str()
          .chars()
          .next()
          .and_then(ManaColor::from_symbol)
          .ok_or_else(bad)?;
        slots.push(CostSlot::Color(color));
      }
    }
    if end != text.len() {
      return Err(bad());
    }
    Ok(Self { slots, text })
  }
}

// Handles the inside of a {...} symbol
fn parse_bracket(inner: &str, slots: &mut Vec<CostSlot>) -> Option<()> {
  let parts: Vec<&str> = inner.split('/').map(|p| p.trim()).collect();
  match parts.as_slice() {
    [single] => {
      if let Ok(count) = single.parse::<usize>() {
        push_generic(count, slots)?;
      } else {
        slots.push(CostSlot::Color(color_symbol(single)?));
      }
    }
    [left, right] => {
      if let Ok(generic) = left.parse::<u8>() {
        if generic == 0 {
          return None;
        }
        slots.push(CostSlot::Hybrid {
          color: color_symbol(right)?,
          generic,
        });
      } else {
        slots.push(CostSlot::Either(color_symbol(left)?, color_symbol(right)?));
      }
    }
    _ => return None,
  }
  Some(())
}

// Adds `count` generic slots, or fails if the cost would exceed MAX_GENERIC
fn push_generic(count: usize, slots: &mut Vec<CostSlot>) -> Option<()> {
  let existing = slots.iter().filter(|s| **s == CostSlot::Generic).count();
  if count > MAX_GENERIC - existing {
    return None;
  }
  slots.extend(std::iter::repeat(CostSlot::Generic).take(count));
  Some(())
}

fn color_symbol(part: &str) -> Option<ManaColor> {
  let mut chars = part.chars();
  match (chars.next(), chars.next()) {
    (Some(c), None) => ManaColor::from_symbol(c),
    _ => None,
  }
}

fn render(slots: &[CostSlot]) -> String {
  let generic = slots.iter().filter(|s| **s == CostSlot::Generic).count();
  let mut text = String::new();
  if generic > 0 {
    text.push_str(&generic.to_string());
  }
  for slot in slots {
    match slot {
      CostSlot::Generic => {}
      CostSlot::Color(c) => text.push(c.symbol()),
      CostSlot::Hybrid { color, generic } => text.push_str(&format!("{{{}/{}}}", generic, color)),
      CostSlot::Either(a, b) => text.push_str(&format!("{{{}/{}}}", a, b)),
    }
  }
  text
}

impl fmt::Display for ManaCost {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    if self.text.is_empty() {
      write!(f, "0")
    } else {
      write!(f, "{}", self.text)
    }
  }
}
