use crate::card::{ColorSet, ManaColor};
use crate::error::{Error, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;

lazy_static! {
  // A bracketed group like {R/U} or {WU}, or a bare color optionally chained with /
  static ref PRODUCTION_TOKEN: Regex =
    Regex::new(r"\{([^}]+)\}|([WUBRGCwubrgc](?:/[WUBRGCwubrgc])*)").expect("valid regex");
}

/// ManaProduction represents the mana a source can contribute: a conjunction of
/// choice groups, where each group is a set of colors to choose from.
///
/// A source still contributes a single unit of mana when it is tapped. The groups
/// describe which colors that unit may be, and in which order they were declared.
///
/// | text      | groups          |
/// |-----------|-----------------|
/// | `W`       | `[W]`           |
/// | `WU`      | `[W] [U]`       |
/// | `W/U`     | `[W U]`         |
/// | `{R/U}U`  | `[R U] [U]`     |
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManaProduction {
  groups: Vec<Vec<ManaColor>>,
}

impl ManaProduction {
  /// Returns a production from choice groups. Fails if there are no groups or
  /// if any group is empty
  pub fn from_groups(groups: Vec<Vec<ManaColor>>) -> Result<Self> {
    if groups.is_empty() || groups.iter().any(|g| g.is_empty()) {
      let text = groups
        .iter()
        .map(|g| g.iter().map(|c| c.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join(" ");
      return Err(Error::BadManaProduction(text));
    }
    Ok(Self { groups })
  }

  /// Returns a production of exactly one color
  pub fn single(color: ManaColor) -> Self {
    Self {
      groups: vec![vec![color]],
    }
  }

  pub fn groups(&self) -> &[Vec<ManaColor>] {
    &self.groups
  }

  /// Iterates every (color, choice group index) pair the production offers
  pub fn options(&self) -> impl Iterator<Item = (ManaColor, usize)> + '_ {
    self
      .groups
      .iter()
      .enumerate()
      .flat_map(|(i, group)| group.iter().map(move |c| (*c, i)))
  }

  /// Returns every color this production can make
  pub fn colors(&self) -> ColorSet {
    self.options().map(|(c, _)| c).collect()
  }

  /// Returns the distinct colors in declaration order
  pub fn colors_in_order(&self) -> Vec<ManaColor> {
    let mut seen = ColorSet::EMPTY;
    let mut ordered = Vec::with_capacity(self.groups.len());
    for (color, _) in self.options() {
      if !seen.contains(color) {
        seen = seen.with(color);
        ordered.push(color);
      }
    }
    ordered
  }

  /// True if the production is a single group holding a single color
  pub fn is_single_color(&self) -> bool {
    self.groups.len() == 1 && self.groups[0].len() == 1
  }
}

impl FromStr for ManaProduction {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    let text = s.trim();
    let bad = || Error::BadManaProduction(text.to_string());
    let mut groups = Vec::new();
    let mut end = 0;
    for caps in PRODUCTION_TOKEN.captures_iter(text) {
      let whole = caps.get(0).ok_or_else(bad)?;
      // Tokens must be contiguous, anything in between is garbage
      if whole.start() != end {
        return Err(bad());
      }
      end = whole.end();
      if let Some(bracket) = caps.get(1) {
        let inner = bracket.as_str();
        if inner.contains('/') {
          let group = inner
            .split('/')
            .map(|part| single_symbol(part.trim()))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(bad)?;
          groups.push(group);
        } else {
          for symbol in inner.chars() {
            groups.push(vec![ManaColor::from_symbol(symbol).ok_or_else(bad)?]);
          }
        }
      } else if let Some(chain) = caps.get(2) {
        let group = chain
          .as_str()
          .split('/')
          .map(single_symbol)
          .collect::<Option<Vec<_>>>()
          .ok_or_else(bad)?;
        groups.push(group);
      }
    }
    if end != text.len() || groups.is_empty() {
      return Err(bad());
    }
    Ok(Self { groups })
  }
}

fn single_symbol(part: &str) -> Option<ManaColor> {
  let mut chars = part.chars();
  match (chars.next(), chars.next()) {
    (Some(c), None) => ManaColor::from_symbol(c),
    _ => None,
  }
}

impl fmt::Display for ManaProduction {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    for group in &self.groups {
      if group.len() == 1 {
        write!(f, "{}", group[0])?;
      } else {
        let symbols: Vec<String> = group.iter().map(|c| c.to_string()).collect();
        write!(f, "{{{}}}", symbols.join("/"))?;
      }
    }
    Ok(())
  }
}
