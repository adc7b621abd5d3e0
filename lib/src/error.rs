//! # Error types
use crate::card::LandKind;
use thiserror::Error;

/// Every failure the library reports. All of them are detected before the
/// first trial runs; a simulation that starts always completes.
#[derive(Error, Debug)]
pub enum Error {
    #[error("'play' and 'draw' settings must be opposite values")]
    ContradictoryPlayDraw,

    #[error("{0} must be a positive integer")]
    NotPositive(&'static str),

    #[error("{name} must be at most {max}")]
    TooLarge { name: &'static str, max: usize },

    #[error("too many cards ({cards}) for deck size ({deck_size})")]
    TooManyCards { cards: usize, deck_size: usize },

    #[error("{kind} lands {requirement}, got {production}")]
    InvalidLandProduction {
        kind: LandKind,
        requirement: &'static str,
        production: String,
    },

    #[error("cyclers must produce exactly one color, got {0}")]
    InvalidCyclerProduction(String),

    #[error("invalid mana cost: {0:?}")]
    BadManaCost(String),

    #[error("invalid mana production: {0:?}")]
    BadManaProduction(String),

    #[error("unknown land type: {0}")]
    UnknownLandType(String),

    #[error("unknown setting: {0}")]
    UnknownSetting(String),

    #[error("invalid value for {key}: {value}")]
    BadSettingValue { key: String, value: String },

    #[error("expected {expected}, got {text:?}")]
    MalformedLine { expected: &'static str, text: String },

    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("no lands specified in input")]
    NoLands,

    #[error("no spells specified in input")]
    NoSpells,
}

impl Error {
    /// Attaches a 1-based input line number to `self`
    pub fn at_line(self, line: usize) -> Self {
        Self::AtLine {
            line,
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
