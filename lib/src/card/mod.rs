mod color;
mod cycler;
mod land;
mod mana_cost;
mod mana_production;

pub use color::*;
pub use cycler::*;
pub use land::*;
pub use mana_cost::*;
pub use mana_production::*;
