//! Grouping engine: random partition of the roster into fixed-size groups.
//!
//! Each [`generate`] call shuffles the roster and slices it into
//! consecutive windows; the result set is complete, disjoint, and covers
//! the roster. Nothing is carried between calls -- regenerating replaces
//! the previous result wholesale, and the reshuffle makes repeated calls
//! intentionally nondeterministic. There is no reproducible-seed mode.

use rand::Rng;
use teamspirit_types::{Group, Participant};

/// Errors that can occur during group generation.
#[derive(Debug, thiserror::Error)]
pub enum GroupingError {
    /// Grouping was attempted with zero participants. Hosts surface this
    /// as an empty-state message and do not invoke the engine.
    #[error("cannot group an empty roster")]
    EmptyRoster,
}

/// Produce a uniformly random permutation of the participants.
///
/// Fisher--Yates: walk index `i` from the last element down to 1 and swap
/// it with a position `j` drawn uniformly from `[0, i]`. Every permutation
/// of the input is equally likely.
pub fn shuffle(rng: &mut impl Rng, participants: &[Participant]) -> Vec<Participant> {
    let mut shuffled = participants.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.random_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}

/// Slice an already-shuffled sequence into consecutive groups of
/// `group_size`, the last of which may be shorter.
///
/// A non-positive size is clamped to 1 rather than rejected, so the call
/// can never loop forever or produce empty groups. Group ids are assigned
/// sequentially from 1 in window order; the group count is
/// `ceil(len / group_size)` and every participant lands in exactly one
/// group.
pub fn partition(shuffled: &[Participant], group_size: usize) -> Vec<Group> {
    let size = group_size.max(1);
    let mut groups = Vec::with_capacity(shuffled.len().div_ceil(size));
    for (index, members) in shuffled.chunks(size).enumerate() {
        let id = u32::try_from(index.saturating_add(1)).unwrap_or(u32::MAX);
        groups.push(Group {
            id,
            members: members.to_vec(),
        });
    }
    groups
}

/// Shuffle the roster and partition it into groups of `group_size`.
///
/// # Errors
///
/// Returns [`GroupingError::EmptyRoster`] if the roster is empty.
pub fn generate(
    rng: &mut impl Rng,
    roster: &[Participant],
    group_size: usize,
) -> Result<Vec<Group>, GroupingError> {
    if roster.is_empty() {
        return Err(GroupingError::EmptyRoster);
    }
    let shuffled = shuffle(rng, roster);
    Ok(partition(&shuffled, group_size))
}

/// The number of groups a partition of `roster_len` participants into
/// groups of `group_size` would produce.
///
/// Uses the same size clamp as [`partition`], so the preview a host shows
/// before generating always matches the generated count. Returns 0 for an
/// empty roster.
pub fn expected_group_count(roster_len: usize, group_size: usize) -> usize {
    roster_len.div_ceil(group_size.max(1))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use teamspirit_types::ParticipantId;

    use super::*;

    fn roster_of(names: &[&str]) -> Vec<Participant> {
        names.iter().map(|name| Participant::new(*name)).collect()
    }

    fn sorted_ids(participants: &[Participant]) -> Vec<ParticipantId> {
        let mut ids: Vec<ParticipantId> = participants.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn shuffle_preserves_the_multiset() {
        let roster = roster_of(&["A", "B", "C", "D", "E", "F", "G"]);
        let mut rng = SmallRng::seed_from_u64(5);
        let shuffled = shuffle(&mut rng, &roster);
        assert_eq!(sorted_ids(&shuffled), sorted_ids(&roster));
    }

    #[test]
    fn shuffle_of_singleton_and_empty_is_identity() {
        let mut rng = SmallRng::seed_from_u64(5);
        assert!(shuffle(&mut rng, &[]).is_empty());

        let one = roster_of(&["A"]);
        assert_eq!(shuffle(&mut rng, &one), one);
    }

    #[test]
    fn shuffle_is_approximately_uniform_over_permutations() {
        // 12,000 shuffles of 3 elements: each of the 6 orderings expects
        // 2,000 hits. Bounds are wide enough that only real bias fails.
        const TRIALS: u32 = 12_000;
        const LOWER: usize = 1_700;
        const UPPER: usize = 2_300;

        let roster = roster_of(&["A", "B", "C"]);
        let mut rng = SmallRng::seed_from_u64(17);

        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for _ in 0..TRIALS {
            let ordering: String = shuffle(&mut rng, &roster)
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join("");
            counts
                .entry(ordering)
                .and_modify(|c| *c = c.saturating_add(1))
                .or_insert(1);
        }

        assert_eq!(counts.len(), 6, "all 3! orderings should occur");
        for (ordering, count) in counts {
            assert!(
                (LOWER..=UPPER).contains(&count),
                "ordering {ordering} occurred {count} times, outside [{LOWER}, {UPPER}]"
            );
        }
    }

    #[test]
    fn partition_covers_roster_exactly_once() {
        let roster = roster_of(&["A", "B", "C", "D", "E", "F", "G"]);
        let groups = partition(&roster, 3);

        assert_eq!(groups.len(), 3);
        let ids: Vec<u32> = groups.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let mut seen = BTreeSet::new();
        for group in &groups {
            for member in &group.members {
                assert!(seen.insert(member.id), "participant appears twice");
            }
        }
        assert_eq!(seen.len(), roster.len());
    }

    #[test]
    fn all_groups_but_the_last_are_full() {
        let roster = roster_of(&["A", "B", "C", "D", "E", "F", "G", "H"]);
        let groups = partition(&roster, 3);

        let sizes: Vec<usize> = groups.iter().map(|g| g.members.len()).collect();
        assert_eq!(sizes, vec![3, 3, 2]);
    }

    #[test]
    fn five_participants_in_pairs_make_three_groups() {
        let roster = roster_of(&["A", "B", "C", "D", "E"]);
        let mut rng = SmallRng::seed_from_u64(23);
        let groups = generate(&mut rng, &roster, 2).unwrap();

        assert_eq!(groups.len(), 3);
        let sizes: Vec<usize> = groups.iter().map(|g| g.members.len()).collect();
        assert_eq!(sizes, vec![2, 2, 1]);
        let total: usize = sizes.iter().sum();
        assert_eq!(total, 5);
    }

    #[test]
    fn zero_group_size_clamps_to_singleton_groups() {
        let roster = roster_of(&["A", "B", "C"]);
        let groups = partition(&roster, 0);

        assert_eq!(groups.len(), 3);
        assert!(groups.iter().all(|g| g.members.len() == 1));
    }

    #[test]
    fn oversized_group_size_yields_one_group() {
        let roster = roster_of(&["A", "B", "C"]);
        let groups = partition(&roster, 10);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups.first().map(|g| g.members.len()), Some(3));
    }

    #[test]
    fn generate_rejects_empty_roster() {
        let mut rng = SmallRng::seed_from_u64(1);
        let result = generate(&mut rng, &[], 4);
        assert!(matches!(result, Err(GroupingError::EmptyRoster)));
    }

    #[test]
    fn regenerating_reshuffles() {
        // Repeated calls are expected to produce different assignments;
        // over 20 runs of 10 participants at least two distinct orderings
        // must appear.
        let roster = roster_of(&["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"]);
        let mut rng = SmallRng::seed_from_u64(29);

        let mut orderings = BTreeSet::new();
        for _ in 0..20 {
            let groups = generate(&mut rng, &roster, 4).unwrap();
            let flat: Vec<String> = groups
                .iter()
                .flat_map(|g| g.members.iter().map(|m| m.name.clone()))
                .collect();
            let _ = orderings.insert(flat.join(""));
        }
        assert!(orderings.len() > 1, "20 regenerations never reshuffled");
    }

    #[test]
    fn expected_count_matches_generated_count() {
        let roster = roster_of(&["A", "B", "C", "D", "E"]);
        let mut rng = SmallRng::seed_from_u64(31);

        for size in [0_usize, 1, 2, 3, 5, 9] {
            let groups = generate(&mut rng, &roster, size).unwrap();
            assert_eq!(groups.len(), expected_group_count(roster.len(), size));
        }
        assert_eq!(expected_group_count(0, 4), 0);
    }
}
