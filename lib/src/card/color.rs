use std::fmt;
use std::iter::FromIterator;

/// ManaColor represents a [color](https://mtg.gamepedia.com/Color) of mana,
/// including colorless
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ManaColor {
  #[serde(rename = "W")]
  White = 0,
  #[serde(rename = "U")]
  Blue = 1,
  #[serde(rename = "B")]
  Black = 2,
  #[serde(rename = "R")]
  Red = 3,
  #[serde(rename = "G")]
  Green = 4,
  #[serde(rename = "C")]
  Colorless = 5,
}

impl ManaColor {
  pub const ALL: [ManaColor; 6] = [
    ManaColor::White,
    ManaColor::Blue,
    ManaColor::Black,
    ManaColor::Red,
    ManaColor::Green,
    ManaColor::Colorless,
  ];

  /// Returns the color for a `WUBRGC` symbol
  pub fn from_symbol(symbol: char) -> Option<Self> {
    match symbol.to_ascii_uppercase() {
      'W' => Some(Self::White),
      'U' => Some(Self::Blue),
      'B' => Some(Self::Black),
      'R' => Some(Self::Red),
      'G' => Some(Self::Green),
      'C' => Some(Self::Colorless),
      _ => None,
    }
  }

  pub fn symbol(self) -> char {
    match self {
      Self::White => 'W',
      Self::Blue => 'U',
      Self::Black => 'B',
      Self::Red => 'R',
      Self::Green => 'G',
      Self::Colorless => 'C',
    }
  }

  #[inline]
  fn bit(self) -> u8 {
    1 << (self as u8)
  }
}

impl fmt::Display for ManaColor {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}", self.symbol())
  }
}

/// A set of colors stored as bits, one per `ManaColor`
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorSet(u8);

impl ColorSet {
  pub const EMPTY: Self = Self(0);
  /// The five colors, without colorless
  pub const WUBRG: Self = Self(0b0001_1111);
  /// The five colors and colorless
  pub const WUBRGC: Self = Self(0b0011_1111);

  pub fn new() -> Self {
    Self::EMPTY
  }

  pub fn single(color: ManaColor) -> Self {
    Self(color.bit())
  }

  #[inline]
  pub fn is_empty(self) -> bool {
    self.0 == 0
  }

  #[inline]
  pub fn contains(self, color: ManaColor) -> bool {
    self.0 & color.bit() != 0
  }

  #[inline]
  pub fn with(self, color: ManaColor) -> Self {
    Self(self.0 | color.bit())
  }

  #[inline]
  pub fn union(self, other: Self) -> Self {
    Self(self.0 | other.0)
  }

  #[inline]
  pub fn intersection(self, other: Self) -> Self {
    Self(self.0 & other.0)
  }

  #[inline]
  pub fn intersects(self, other: Self) -> bool {
    self.0 & other.0 != 0
  }

  /// Returns the number of colors in the set
  #[inline]
  pub fn len(self) -> usize {
    self.0.count_ones() as usize
  }

  /// Returns the only color in the set, if the set holds exactly one
  pub fn only(self) -> Option<ManaColor> {
    if self.len() == 1 {
      self.iter().next()
    } else {
      None
    }
  }

  /// Iterates the colors in `WUBRGC` order
  pub fn iter(self) -> impl Iterator<Item = ManaColor> {
    ManaColor::ALL.iter().copied().filter(move |c| self.contains(*c))
  }
}

impl From<ManaColor> for ColorSet {
  fn from(color: ManaColor) -> Self {
    Self::single(color)
  }
}

impl FromIterator<ManaColor> for ColorSet {
  fn from_iter<T: IntoIterator<Item = ManaColor>>(iter: T) -> Self {
    iter.into_iter().fold(Self::EMPTY, |set, color| set.with(color))
  }
}

impl fmt::Display for ColorSet {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    for color in self.iter() {
      write!(f, "{}", color)?;
    }
    Ok(())
  }
}
