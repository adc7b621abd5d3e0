use crate::card::{LandDefinition, ManaColor, ManaProduction};
use crate::error::{Error, Result};

/// CyclerDefinition describes a non-land card that turns into a basic land of
/// `color` once at least `threshold` lands are in play.
///
/// The basic comes from an inexhaustible pool, so cycling never changes what
/// is left in the library.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CyclerDefinition {
  pub color: ManaColor,
  pub threshold: usize,
  land: LandDefinition,
}

impl CyclerDefinition {
  pub fn new(color: ManaColor, threshold: usize) -> Result<Self> {
    if threshold == 0 {
      return Err(Error::NotPositive("cycling cost"));
    }
    Ok(Self {
      color,
      threshold,
      land: LandDefinition::basic(color),
    })
  }

  /// Returns a cycler from a declared production, which must be a single color
  pub fn from_production(production: &ManaProduction, threshold: usize) -> Result<Self> {
    if !production.is_single_color() {
      return Err(Error::InvalidCyclerProduction(production.to_string()));
    }
    let color = production.groups()[0][0];
    Self::new(color, threshold)
  }

  /// Checks a definition that did not come through `new`, e.g. deserialized
  pub fn validate(&self) -> Result<()> {
    if self.threshold == 0 {
      return Err(Error::NotPositive("cycling cost"));
    }
    if self.land != LandDefinition::basic(self.color) {
      return Err(Error::InvalidCyclerProduction(self.land.production.to_string()));
    }
    Ok(())
  }

  /// The basic land this card becomes
  pub fn land(&self) -> &LandDefinition {
    &self.land
  }

  /// True if the cycler can be converted with `lands_in_play` lands on the battlefield
  #[inline]
  pub fn can_cycle(&self, lands_in_play: usize) -> bool {
    lands_in_play >= self.threshold
  }
}

#[cfg(test)]
mod tests {
  use crate::card::*;

  fn production(s: &str) -> ManaProduction {
    s.parse().expect("valid production")
  }

  #[test]
  fn cycler_creation() {
    let cycler = CyclerDefinition::from_production(&production("W"), 3).unwrap();
    assert_eq!(cycler.color, ManaColor::White);
    assert_eq!(cycler.threshold, 3);
    assert_eq!(cycler.land().kind, LandKind::Basic);
    assert!(!cycler.can_cycle(2));
    assert!(cycler.can_cycle(3));
  }

  #[test]
  fn cycler_must_be_single_color() {
    assert!(CyclerDefinition::from_production(&production("WU"), 3).is_err());
    assert!(CyclerDefinition::from_production(&production("W/U"), 3).is_err());
  }

  #[test]
  fn cycler_threshold_must_be_positive() {
    assert!(CyclerDefinition::new(ManaColor::Red, 0).is_err());
  }

  #[test]
  fn validate_catches_edited_fields() {
    let mut cycler = CyclerDefinition::new(ManaColor::Red, 2).unwrap();
    assert!(cycler.validate().is_ok());
    cycler.threshold = 0;
    assert!(cycler.validate().is_err());
    cycler.threshold = 2;
    cycler.color = ManaColor::Blue;
    assert!(cycler.validate().is_err());
  }
}
