//! Round-robin schedule enumeration
//!
//! Matches are the unordered pairs `(i, j)` with `i < j` over roster
//! positions, in lexicographic order. The roster order therefore fixes
//! the whole match sequence deterministically.

use crate::errors::ScheduleError;

/// Total matches in a full round robin over `n` players.
pub fn match_count(n: usize) -> usize {
    if n < 2 {
        0
    } else {
        n * (n - 1) / 2
    }
}

/// All pairs `(i, j)` with `0 <= i < j < n`, lexicographic.
pub fn round_robin_pairs(n: usize) -> Vec<(usize, usize)> {
    let mut pairs = Vec::with_capacity(match_count(n));
    for i in 0..n {
        for j in (i + 1)..n {
            pairs.push((i, j));
        }
    }
    pairs
}

/// The pair at a given position of the schedule, without materializing
/// it. Errors if the index is past the end of the schedule, which a
/// driver iterating `0..match_count(n)` can never hit.
pub fn pair_at(n: usize, index: usize) -> Result<(usize, usize), ScheduleError> {
    let total = match_count(n);
    if index >= total {
        return Err(ScheduleError::Exhausted { index, total });
    }
    // Walk rows: player i owns the next (n - 1 - i) pairs.
    let mut remaining = index;
    for i in 0..n {
        let row = n - 1 - i;
        if remaining < row {
            return Ok((i, i + 1 + remaining));
        }
        remaining -= row;
    }
    unreachable!("index {index} < total {total} must land in a row");
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_empty_and_single_roster() {
        assert!(round_robin_pairs(0).is_empty());
        assert!(round_robin_pairs(1).is_empty());
        assert_eq!(match_count(0), 0);
        assert_eq!(match_count(1), 0);
    }

    #[test]
    fn test_two_players() {
        assert_eq!(round_robin_pairs(2), vec![(0, 1)]);
    }

    #[test]
    fn test_four_players_lexicographic() {
        assert_eq!(
            round_robin_pairs(4),
            vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]
        );
    }

    #[test]
    fn test_pair_at_matches_enumeration() {
        for n in 0..12 {
            let pairs = round_robin_pairs(n);
            for (index, &pair) in pairs.iter().enumerate() {
                assert_eq!(pair_at(n, index).unwrap(), pair);
            }
        }
    }

    #[test]
    fn test_pair_at_exhaustion() {
        let err = pair_at(4, 6).unwrap_err();
        assert_eq!(err, ScheduleError::Exhausted { index: 6, total: 6 });
        assert!(pair_at(0, 0).is_err());
    }

    proptest! {
        #[test]
        fn test_schedule_complete_and_unique(n in 0usize..60) {
            let pairs = round_robin_pairs(n);
            prop_assert_eq!(pairs.len(), match_count(n));

            let mut seen = HashSet::new();
            for &(i, j) in &pairs {
                prop_assert!(i < j, "pair ({}, {}) not ordered", i, j);
                prop_assert!(j < n, "pair ({}, {}) out of roster", i, j);
                prop_assert!(seen.insert((i, j)), "pair ({}, {}) repeated", i, j);
            }
            // every unordered pair appears
            for i in 0..n {
                for j in (i + 1)..n {
                    prop_assert!(seen.contains(&(i, j)));
                }
            }
        }

        #[test]
        fn test_pairs_sorted_lexicographically(n in 0usize..60) {
            let pairs = round_robin_pairs(n);
            prop_assert!(pairs.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
