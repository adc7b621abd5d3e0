use crate::card::{ColorSet, ManaColor, ManaProduction};
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// LandKind is the closed set of land categories the simulator understands.
/// Each category decides whether the land enters tapped, whether it locks to
/// one color when played, and whether it fetches.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandKind {
  /// One color, enters untapped
  Basic,
  /// Enters untapped
  Shock,
  /// Same as shock
  Dual,
  /// Enters tapped with three or more lands in play
  Fastland,
  /// Enters tapped with two or fewer lands in play
  Slowland,
  /// Always enters tapped
  Surveil,
  /// Two colors; the second only with a shock, dual or surveil land of
  /// either color in play
  Verge,
  /// Fetches a basic of any color, locks to it, always enters tapped
  Wilds,
  /// Always enters tapped
  Tapped,
  /// Enters untapped, does not search the library
  Fetch,
  /// Enters untapped
  Untapped,
  /// Any color, locked when played, enters untapped
  Multiversal,
  /// Fetches a basic, locks to it, enters tapped unless three or more lands are in play
  Fabled,
  /// Any color or colorless, locked when played, enters tapped from turn four on
  #[serde(rename = "startingtown")]
  StartingTown,
}

// Land count at which a fastland starts entering tapped, and at which slowland and
// fabled lands start entering untapped
const LAND_COUNT_THRESHOLD: usize = 3;
// First turn on which a starting town enters tapped
const STARTING_TOWN_TAPPED_TURN: usize = 4;

impl LandKind {
  pub const ALL: [LandKind; 14] = [
    LandKind::Basic,
    LandKind::Shock,
    LandKind::Dual,
    LandKind::Fastland,
    LandKind::Slowland,
    LandKind::Surveil,
    LandKind::Verge,
    LandKind::Wilds,
    LandKind::Tapped,
    LandKind::Fetch,
    LandKind::Untapped,
    LandKind::Multiversal,
    LandKind::Fabled,
    LandKind::StartingTown,
  ];

  /// The name used in input files
  pub fn name(self) -> &'static str {
    match self {
      Self::Basic => "basic",
      Self::Shock => "shock",
      Self::Dual => "dual",
      Self::Fastland => "fastland",
      Self::Slowland => "slowland",
      Self::Surveil => "surveil",
      Self::Verge => "verge",
      Self::Wilds => "wilds",
      Self::Tapped => "tapped",
      Self::Fetch => "fetch",
      Self::Untapped => "untapped",
      Self::Multiversal => "multiversal",
      Self::Fabled => "fabled",
      Self::StartingTown => "startingtown",
    }
  }

  /// Returns true if a land of this kind enters tapped when played with
  /// `lands_in_play` lands already on the battlefield during `turn`
  pub fn enters_tapped(self, lands_in_play: usize, turn: usize) -> bool {
    match self {
      Self::Fastland => lands_in_play >= LAND_COUNT_THRESHOLD,
      Self::Slowland => lands_in_play < LAND_COUNT_THRESHOLD,
      Self::Fabled => lands_in_play < LAND_COUNT_THRESHOLD,
      Self::StartingTown => turn >= STARTING_TOWN_TAPPED_TURN,
      Self::Surveil | Self::Wilds | Self::Tapped => true,
      Self::Basic
      | Self::Shock
      | Self::Dual
      | Self::Verge
      | Self::Fetch
      | Self::Untapped
      | Self::Multiversal => false,
    }
  }

  /// True if the land fixes a single color at the moment it is played
  pub fn is_choice_locking(self) -> bool {
    match self {
      Self::Multiversal | Self::Wilds | Self::Fabled | Self::StartingTown => true,
      _ => false,
    }
  }

  /// True if the land searches for a basic. The search never fails and
  /// leaves the library untouched
  pub fn is_fetch(self) -> bool {
    match self {
      Self::Wilds | Self::Fabled => true,
      _ => false,
    }
  }

  /// True if the land turns on the second color of a verge land
  pub fn enables_verge(self) -> bool {
    match self {
      Self::Shock | Self::Dual | Self::Surveil => true,
      _ => false,
    }
  }

  /// Checks the declared production against what this kind of land can make
  pub fn validate(self, production: &ManaProduction) -> Result<()> {
    let colors = production.colors();
    let requirement = match self {
      Self::Basic if colors.len() != 1 => "must produce exactly one color",
      Self::Verge if colors.len() != 2 => "must produce exactly two colors",
      Self::Wilds | Self::Multiversal if colors != ColorSet::WUBRG => "must produce WUBRG",
      Self::StartingTown if colors != ColorSet::WUBRGC => "must produce WUBRGC",
      Self::Fabled if colors.contains(ManaColor::Colorless) => {
        "can only fetch basic land colors (WUBRG)"
      }
      _ => return Ok(()),
    };
    Err(Error::InvalidLandProduction {
      kind: self,
      requirement,
      production: production.to_string(),
    })
  }
}

impl FromStr for LandKind {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    let name = s.trim().to_lowercase().replace(|c: char| c == '_' || c == '-', "");
    Self::ALL
      .iter()
      .copied()
      .find(|kind| kind.name() == name)
      .ok_or_else(|| Error::UnknownLandType(s.trim().to_string()))
  }
}

impl fmt::Display for LandKind {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}", self.name())
  }
}

/// LandDefinition pairs a land category with the mana it declares
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LandDefinition {
  pub kind: LandKind,
  pub production: ManaProduction,
}

impl LandDefinition {
  /// Returns a validated land definition
  pub fn new(kind: LandKind, production: ManaProduction) -> Result<Self> {
    kind.validate(&production)?;
    Ok(Self { kind, production })
  }

  /// Returns a basic land of `color`
  pub fn basic(color: ManaColor) -> Self {
    Self {
      kind: LandKind::Basic,
      production: ManaProduction::single(color),
    }
  }

  /// Every color this land can make, ignoring play-state conditions
  pub fn colors(&self) -> ColorSet {
    self.production.colors()
  }

  /// Resolves the production to the (color, choice group index) pairs the land
  /// can use right now. `locked_color` overrides the declared production;
  /// `verge_enabled` tells a verge land whether its second color is available
  pub fn options(
    &self,
    locked_color: Option<ManaColor>,
    verge_enabled: bool,
  ) -> Vec<(ManaColor, usize)> {
    if let Some(color) = locked_color {
      return vec![(color, 0)];
    }
    let mut options: Vec<(ManaColor, usize)> = self.production.options().collect();
    if self.kind == LandKind::Verge && !verge_enabled {
      if let Some(&(first, _)) = options.first() {
        options.retain(|(color, _)| *color == first);
      }
    }
    options
  }

  /// Returns the colors the land can tap for, from `options`
  pub fn produces(&self, locked_color: Option<ManaColor>, verge_enabled: bool) -> ColorSet {
    self
      .options(locked_color, verge_enabled)
      .into_iter()
      .map(|(color, _)| color)
      .collect()
  }
}
