//! # Auto tap algorithm
//!
//! Decides whether a set of untapped mana sources can pay a mana cost.
//!
//! Every source taps for a single unit of mana of one of its colors, and every
//! slot of the cost needs exactly one unit, except for a `{N/C}` hybrid slot paid
//! generically, which needs N units. The check proceeds as follows:
//!
//! 1. Cheap rejections: a zero cost is always payable; a colored slot no source
//!    can make, or fewer sources than slots, is never payable.
//! 2. Fixed-color slots are paid first by sources that can only make that
//!    color. Such a source can pay a subset of what any other source of that
//!    color can pay, so this assignment never loses a solution.
//! 3. Every way of paying the remaining `{N/C}` slots (by color or generically)
//!    is tried, counting identical slots as one group. For each, the colored requirements are matched to sources with
//!    a maximum bipartite matching, and the generic requirements are paid with
//!    whatever sources the matching left unused.
use crate::bipartite::maximum_bipartite_matching;
use crate::card::{ColorSet, CostSlot, ManaColor, ManaCost};

/// Returns true if `sources` can pay `cost`. Each entry of `sources` is one
/// untapped source and the colors it can tap for
pub fn is_satisfiable(cost: &ManaCost, sources: &[ColorSet]) -> bool {
  let mut scratch = Scratch::default();
  is_satisfiable_with_scratch(cost, sources, &mut scratch)
}

/// Scratch space reused across calls to reduce allocations
#[derive(Debug, Default)]
pub struct Scratch {
  used: Vec<bool>,
  free: Vec<ColorSet>,
  rest: Vec<CostSlot>,
  hybrids: Vec<HybridGroup>,
  paid_generically: Vec<usize>,
  requirements: Vec<ColorSet>,
  edges: Vec<bool>,
  seen: Vec<bool>,
  matches: Vec<Option<usize>>,
}

/// The actual `is_satisfiable` implementation that exposes
/// the scratch space data structure for performance purposes
pub fn is_satisfiable_with_scratch(
  cost: &ManaCost,
  sources: &[ColorSet],
  scratch: &mut Scratch,
) -> bool {
  if cost.is_empty() {
    return true;
  }
  if sources.len() < cost.min_units() {
    return false;
  }
  let available = sources
    .iter()
    .fold(ColorSet::EMPTY, |set, source| set.union(*source));
  let impossible = cost.slots().iter().any(|slot| match slot {
    CostSlot::Color(c) => !available.contains(*c),
    CostSlot::Either(..) => !available.intersects(slot.colors()),
    CostSlot::Generic | CostSlot::Hybrid { .. } => false,
  });
  if impossible {
    return false;
  }

  // Pay fixed colors with single color sources
  scratch.used.clear();
  scratch.used.resize(sources.len(), false);
  scratch.rest.clear();
  for slot in cost.slots() {
    if let CostSlot::Color(color) = slot {
      let only = ColorSet::single(*color);
      let found = sources
        .iter()
        .enumerate()
        .position(|(i, source)| !scratch.used[i] && *source == only);
      if let Some(i) = found {
        scratch.used[i] = true;
        continue;
      }
    }
    scratch.rest.push(*slot);
  }
  scratch.free.clear();
  for (i, source) in sources.iter().enumerate() {
    if !scratch.used[i] {
      scratch.free.push(*source);
    }
  }

  // Hybrid slots sharing a color and a generic cost are interchangeable, so
  // only the number of each group paid generically matters
  scratch.hybrids.clear();
  for slot in scratch.rest.iter() {
    if let CostSlot::Hybrid { color, generic } = *slot {
      match scratch
        .hybrids
        .iter_mut()
        .find(|g| g.color == color && g.generic == generic)
      {
        Some(group) => group.count += 1,
        None => scratch.hybrids.push(HybridGroup {
          color,
          generic,
          count: 1,
        }),
      }
    }
  }
  scratch.paid_generically.clear();
  scratch.paid_generically.resize(scratch.hybrids.len(), 0);

  loop {
    scratch.requirements.clear();
    let mut generic_units = 0;
    for slot in scratch.rest.iter() {
      match slot {
        CostSlot::Generic => generic_units += 1,
        CostSlot::Hybrid { .. } => {}
        CostSlot::Color(_) | CostSlot::Either(..) => scratch.requirements.push(slot.colors()),
      }
    }
    for (group, paid) in scratch.hybrids.iter().zip(&scratch.paid_generically) {
      generic_units += group.generic as usize * paid;
      let by_color = group.count - paid;
      scratch
        .requirements
        .extend(std::iter::repeat(ColorSet::single(group.color)).take(by_color));
    }
    if scratch.requirements.len() + generic_units <= scratch.free.len()
      && match_requirements(scratch)
    {
      return true;
    }
    if !next_split(&mut scratch.paid_generically, &scratch.hybrids) {
      return false;
    }
  }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct HybridGroup {
  color: ManaColor,
  generic: u8,
  count: usize,
}

// Advances `paid` like an odometer where digit i runs from 0 to the size of
// group i. Returns false once every split was visited
fn next_split(paid: &mut [usize], groups: &[HybridGroup]) -> bool {
  for (digit, group) in paid.iter_mut().zip(groups) {
    if *digit < group.count {
      *digit += 1;
      return true;
    }
    *digit = 0;
  }
  false
}

// True if every colored requirement in scratch can be matched to a distinct free source
fn match_requirements(scratch: &mut Scratch) -> bool {
  let slot_count = scratch.requirements.len();
  let source_count = scratch.free.len();
  if slot_count == 0 {
    return true;
  }
  scratch.edges.clear();
  for requirement in &scratch.requirements {
    for source in &scratch.free {
      scratch.edges.push(requirement.intersects(*source));
    }
  }
  let matched = maximum_bipartite_matching(
    &scratch.edges,
    slot_count,
    source_count,
    &mut scratch.seen,
    &mut scratch.matches,
  );
  matched == slot_count
}

#[cfg(test)]
mod tests {
  use crate::autotap::*;
  use crate::card::*;

  fn cost(s: &str) -> ManaCost {
    s.parse().expect("valid cost")
  }

  fn sources(list: &[&str]) -> Vec<ColorSet> {
    list
      .iter()
      .map(|s| s.parse::<ManaProduction>().expect("valid production").colors())
      .collect()
  }

  #[test]
  fn zero_cost_always_payable() {
    assert!(is_satisfiable(&cost(""), &[]));
    assert!(is_satisfiable(&cost("0"), &sources(&["W"])));
  }

  #[test]
  fn generic_cost_needs_enough_sources() {
    for k in 0..6 {
      let c = ManaCost::generic(k);
      for n in 0..6 {
        let s: Vec<_> = (0..n).map(|_| ColorSet::single(ManaColor::Black)).collect();
        assert_eq!(is_satisfiable(&c, &s), n >= k, "k={} n={}", k, n);
      }
    }
  }

  #[test]
  fn generic_cost_ignores_colors() {
    assert!(is_satisfiable(&cost("3"), &sources(&["W", "C", "R/G"])));
  }

  #[test]
  fn one_choice_source_pays_one_color() {
    assert!(!is_satisfiable(&cost("WU"), &sources(&["W/U"])));
    assert!(is_satisfiable(&cost("WU"), &sources(&["W/U", "W/U"])));
  }

  #[test]
  fn and_production_still_one_unit() {
    assert!(!is_satisfiable(&cost("WU"), &sources(&["WU"])));
    assert!(is_satisfiable(&cost("W"), &sources(&["WU"])));
  }

  #[test]
  fn missing_color_is_unpayable() {
    assert!(!is_satisfiable(&cost("2R"), &sources(&["W", "W", "W", "W"])));
  }

  #[test]
  fn colored_and_generic() {
    assert!(is_satisfiable(&cost("2W"), &sources(&["W", "W", "W"])));
    assert!(!is_satisfiable(&cost("2W"), &sources(&["W", "W"])));
    assert!(is_satisfiable(&cost("1WW"), &sources(&["U", "W", "W"])));
    assert!(!is_satisfiable(&cost("1WW"), &sources(&["U", "U", "W"])));
  }

  #[test]
  fn flexible_sources_need_the_right_assignment() {
    // The R/U source must pay U, leaving the R source for R
    assert!(is_satisfiable(&cost("RU"), &sources(&["R/U", "R"])));
    assert!(is_satisfiable(&cost("RU"), &sources(&["R", "R/U"])));
    // Greedy choice of the first dual for W would fail here
    assert!(is_satisfiable(
      &cost("WUB"),
      &sources(&["W/U", "U/B", "W/B"])
    ));
    assert!(is_satisfiable(&cost("WWU"), &sources(&["W/U", "U/B", "W/B"])));
    assert!(!is_satisfiable(&cost("WWW"), &sources(&["W/U", "U/B", "W/B"])));
  }

  #[test]
  fn rrw_with_duals() {
    assert!(is_satisfiable(&cost("RRW"), &sources(&["RW", "RW", "RW"])));
    assert!(!is_satisfiable(&cost("RRW"), &sources(&["RW", "RW"])));
  }

  #[test]
  fn hybrid_paid_by_color() {
    assert!(is_satisfiable(&cost("{3/R}"), &sources(&["R"])));
    assert!(!is_satisfiable(&cost("{3/R}"), &sources(&["W"])));
  }

  #[test]
  fn hybrid_paid_generically() {
    assert!(is_satisfiable(&cost("{3/R}"), &sources(&["W", "W", "W"])));
    assert!(!is_satisfiable(&cost("{3/R}"), &sources(&["W", "W"])));
    // One hybrid by color, the other generically
    assert!(is_satisfiable(
      &cost("{2/R}{2/W}"),
      &sources(&["R", "B", "B"])
    ));
    assert!(!is_satisfiable(&cost("{2/R}{2/W}"), &sources(&["R", "B"])));
  }

  #[test]
  fn many_identical_hybrid_slots() {
    let slots = vec![
      CostSlot::Hybrid {
        color: ManaColor::Red,
        generic: 1
      };
      64
    ];
    let c = ManaCost::from_slots(slots);
    let white = vec![ColorSet::single(ManaColor::White); 64];
    assert!(is_satisfiable(&c, &white));
    assert!(!is_satisfiable(&c, &white[..63]));
    let mut mixed = vec![ColorSet::single(ManaColor::Red); 40];
    mixed.extend(vec![ColorSet::single(ManaColor::Blue); 24]);
    assert!(is_satisfiable(&c, &mixed));
  }

  #[test]
  fn mixed_hybrid_groups() {
    let c = cost("{2/R}{2/R}{2/R}{2/W}{2/W}");
    // Two R by color, one R and two W generically
    let s = vec![ColorSet::single(ManaColor::Red); 2]
      .into_iter()
      .chain(vec![ColorSet::single(ManaColor::Black); 6])
      .collect::<Vec<_>>();
    assert!(is_satisfiable(&c, &s));
    assert!(!is_satisfiable(&c, &s[..7]));
    let many = vec![ColorSet::single(ManaColor::Green); 30];
    assert!(!is_satisfiable(&cost(&"{2/R}".repeat(16)), &many));
  }

  #[test]
  fn two_color_hybrid() {
    assert!(is_satisfiable(&cost("{W/U}U"), &sources(&["W", "U"])));
    assert!(!is_satisfiable(&cost("{W/U}U"), &sources(&["U", "B"])));
    assert!(is_satisfiable(&cost("{W/U}U"), &sources(&["U", "U"])));
  }

  #[test]
  fn colorless_requirement_needs_colorless_source() {
    assert!(!is_satisfiable(&cost("C"), &sources(&["W"])));
    assert!(is_satisfiable(&cost("1C"), &sources(&["W", "C"])));
  }

  #[test]
  fn scratch_can_be_reused() {
    let mut scratch = Scratch::default();
    let s = sources(&["W/U", "U"]);
    assert!(is_satisfiable_with_scratch(&cost("WU"), &s, &mut scratch));
    assert!(!is_satisfiable_with_scratch(&cost("WW"), &s, &mut scratch));
    assert!(is_satisfiable_with_scratch(&cost("1U"), &s, &mut scratch));
  }
}
