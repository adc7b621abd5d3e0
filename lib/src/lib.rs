//! # Magic: The Gathering Mana Base Simulation Library
//!
//! manabase estimates, through repeated randomized games, the probability of
//! being able to pay the mana cost of target spells by each of the first turns
//! of a game, given a deck's lands and cyclers. Lands come in fourteen kinds
//! that differ in when they enter tapped, which colors they can make and
//! whether they lock to a single color when played.
//!
//! ```
//! let input = manabase::parse_input("LANDS\nbasic W 17\nSPELLS\nW\nSETTINGS\ncycles 100\nseed 1\n").unwrap();
//! let sim = manabase::run(&input).unwrap();
//! assert!(sim.observations[0].p_by_turn(3) > 0.5);
//! ```

#[macro_use]
extern crate serde_derive;
extern crate serde;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
extern crate rand;
extern crate rayon;
extern crate regex;
extern crate wasm_bindgen;

pub mod autotap;
pub mod bipartite;
pub mod card;
pub mod config;
pub mod deck;
pub mod error;
pub mod game;
pub mod mulligan;
pub mod parse;
pub mod policy;
pub mod report;
pub mod simulation;
pub mod web;

pub use crate::error::{Error, Result};
pub use crate::parse::{parse_input, Input};
pub use crate::report::Output;
pub use crate::simulation::run;
