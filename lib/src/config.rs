//! # Simulation settings
use crate::error::{Error, Result};

pub const DEFAULT_CYCLES: usize = 20000;
pub const DEFAULT_DECK_SIZE: usize = 60;
pub const DEFAULT_TURNS: usize = 10;
pub const MAX_DECK_SIZE: usize = 1000;
pub const MAX_TURNS: usize = 100;

/// Settings controls a simulation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
  /// The number of trials
  pub cycles: usize,
  pub on_the_play: bool,
  pub deck_size: usize,
  /// The last turn tracked
  pub turns: usize,
  /// Base seed for reproducible runs
  pub seed: Option<u64>,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      cycles: DEFAULT_CYCLES,
      on_the_play: true,
      deck_size: DEFAULT_DECK_SIZE,
      turns: DEFAULT_TURNS,
      seed: None,
    }
  }
}

impl Settings {
  /// Returns an error if a count is zero or above its maximum
  pub fn validate(&self) -> Result<()> {
    if self.cycles == 0 {
      return Err(Error::NotPositive("cycles"));
    }
    if self.deck_size == 0 {
      return Err(Error::NotPositive("deck_size"));
    }
    if self.turns == 0 {
      return Err(Error::NotPositive("turns"));
    }
    if self.deck_size > MAX_DECK_SIZE {
      return Err(Error::TooLarge {
        name: "deck_size",
        max: MAX_DECK_SIZE,
      });
    }
    if self.turns > MAX_TURNS {
      return Err(Error::TooLarge {
        name: "turns",
        max: MAX_TURNS,
      });
    }
    Ok(())
  }
}

/// SettingsBuilder collects `key value` pairs. Giving only one of `play` and
/// `draw` implies the other; giving both requires opposite values
#[derive(Debug, Default, Clone)]
pub struct SettingsBuilder {
  settings: Settings,
  play: Option<bool>,
  draw: Option<bool>,
}

impl SettingsBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  /// Applies a single setting. Keys are case-insensitive
  pub fn set(&mut self, key: &str, value: &str) -> Result<&mut Self> {
    let key = key.to_lowercase();
    let bad_value = || Error::BadSettingValue {
      key: key.clone(),
      value: value.to_string(),
    };
    match key.as_str() {
      "play" => self.play = Some(parse_bool(value).ok_or_else(bad_value)?),
      "draw" => self.draw = Some(parse_bool(value).ok_or_else(bad_value)?),
      "cycles" => self.settings.cycles = parse_positive(value).ok_or_else(bad_value)?,
      "deck_size" | "decksize" => {
        self.settings.deck_size = parse_positive(value)
          .filter(|v| *v <= MAX_DECK_SIZE)
          .ok_or_else(bad_value)?
      }
      "turns" => {
        self.settings.turns = parse_positive(value)
          .filter(|v| *v <= MAX_TURNS)
          .ok_or_else(bad_value)?
      }
      "seed" => self.settings.seed = Some(value.parse().map_err(|_| bad_value())?),
      _ => return Err(Error::UnknownSetting(key.clone())),
    }
    Ok(self)
  }

  pub fn build(&self) -> Result<Settings> {
    let on_the_play = match (self.play, self.draw) {
      (Some(play), Some(draw)) if play == draw => return Err(Error::ContradictoryPlayDraw),
      (Some(play), _) => play,
      (None, Some(draw)) => !draw,
      (None, None) => self.settings.on_the_play,
    };
    let settings = Settings {
      on_the_play,
      ..self.settings.clone()
    };
    settings.validate()?;
    Ok(settings)
  }
}

fn parse_bool(value: &str) -> Option<bool> {
  match value.to_lowercase().as_str() {
    "true" | "t" | "1" | "yes" | "y" => Some(true),
    "false" | "f" | "0" | "no" | "n" => Some(false),
    _ => None,
  }
}

fn parse_positive(value: &str) -> Option<usize> {
  value.parse::<usize>().ok().filter(|v| *v > 0)
}
