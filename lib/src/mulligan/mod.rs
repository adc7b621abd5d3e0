//! # Mulligan strategies
//!
//! The `mulligan` module defines a `Mulligan` trait and
//! the strategies a simulation can draw its opening hand with.

mod london;
mod mulligan;
mod never;

pub use london::London;
pub use mulligan::Mulligan;
pub use never::Never;

/// The number of cards in a hand before any mulligan
pub const STARTING_HAND_SIZE: usize = 7;
