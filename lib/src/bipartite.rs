//! # Maximum bipartite matching implementation

// - https://en.wikipedia.org/wiki/Ford%E2%80%93Fulkerson_algorithm
// - https://en.wikipedia.org/wiki/Hopcroft%E2%80%93Karp_algorithm
// - http://olympiad.cs.uct.ac.za/presentations/camp2_2017/bipartitematching-robin.pdf

/// Matches the rows of the bipartite graph represented by the
/// adjacency matrix `edges` with `slot_count` rows (cost requirements)
/// and `source_count` columns (mana sources), and returns the number
/// of rows matched. Matching stops at the first row that cannot be
/// augmented, so the result equals `slot_count` exactly when every
/// row can be matched.
/// `seen` and `matches` are scratch space owned by the caller;
/// they are resized here as needed.
/// Implementation based on the "Alternate Approach" from
/// http://olympiad.cs.uct.ac.za/presentations/camp2_2017/bipartitematching-robin.pdf
pub fn maximum_bipartite_matching(
    edges: &[bool],
    slot_count: usize,
    source_count: usize,
    seen: &mut Vec<bool>,
    matches: &mut Vec<Option<usize>>,
) -> usize {
    debug_assert_eq!(edges.len(), slot_count * source_count);
    matches.clear();
    matches.resize(source_count, None);
    seen.resize(source_count, false);
    let mut match_count = 0;
    for slot in 0..slot_count {
        for s in seen.iter_mut() {
            *s = false;
        }
        if find_source(edges, source_count, slot, seen, matches) {
            match_count += 1;
        } else {
            break;
        }
    }
    match_count
}

fn find_source(
    edges: &[bool],
    source_count: usize,
    slot: usize,
    seen: &mut [bool],
    matches: &mut [Option<usize>],
) -> bool {
    for source in 0..source_count {
        if !edges[source_count * slot + source] || seen[source] {
            continue;
        }
        seen[source] = true;
        // Is this source free, or can the slot currently using it move elsewhere?
        let available = match matches[source] {
            None => true,
            Some(other_slot) => find_source(edges, source_count, other_slot, seen, matches),
        };
        if available {
            matches[source] = Some(slot);
            return true;
        }
    }
    false
}
