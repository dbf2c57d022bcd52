//! Counting bounded sub-multisets, used to cap the size of a belief state.

use crate::model::hand::HandVector;
use crate::model::rules::Rules;

/// `C(n, k)` with exact integer arithmetic.
pub fn binomial(n: u64, k: u64) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        acc = acc * u128::from(n - i) / u128::from(i + 1);
    }
    acc
}

/// Number of size-`k` multisets over `n` types with no cap: `C(n + k - 1, k)`.
pub fn multi_choose(n: usize, k: usize) -> u128 {
    if n == 0 {
        return u128::from(k == 0);
    }
    binomial((n + k - 1) as u64, k as u64)
}

/// Number of size-`k` sub-multisets of a multiset with the given per-type multiplicities.
///
/// Inclusion–exclusion over the types forced above their cap: each forced type `i`
/// consumes `multiplicities[i] + 1` elements up front.
pub fn count_sub_multisets(multiplicities: &[u8], k: usize) -> u128 {
    let count = exclude_from(multiplicities, multiplicities.len(), k, 0);
    debug_assert!(count >= 0, "inclusion-exclusion went negative");
    count.max(0) as u128
}

fn exclude_from(multiplicities: &[u8], types: usize, remaining: usize, start: usize) -> i128 {
    let mut count = multi_choose(types, remaining) as i128;
    for (offset, &cap) in multiplicities[start..].iter().enumerate() {
        let forced = cap as usize + 1;
        if forced <= remaining {
            count -= exclude_from(multiplicities, types, remaining - forced, start + offset + 1);
        }
    }
    count
}

/// Removes `amount` cards round-robin across the non-empty ranks.
///
/// Spreading the removal is the worst case for the number of hands the remaining
/// cards can form. Returns `None` if fewer than `amount` cards are available.
pub fn distribute_decrement(counts: &[u8], amount: usize) -> Option<Vec<u8>> {
    let available: usize = counts.iter().map(|&count| count as usize).sum();
    if amount > available {
        return None;
    }
    let mut remaining = counts.to_vec();
    let mut left = amount;
    let mut index = 0;
    while left > 0 {
        if remaining[index] > 0 {
            remaining[index] -= 1;
            left -= 1;
        }
        index = (index + 1) % remaining.len();
    }
    Some(remaining)
}

/// Worst-case number of worlds a player entertains right after the deal, knowing
/// their own `hand_size` cards drawn from a deck with `cards` copies per rank.
pub fn initial_world_bound(cards: &[u8], hand_size: usize) -> Option<u128> {
    let unseen = distribute_decrement(cards, hand_size)?;
    Some(count_sub_multisets(&unseen, hand_size))
}

/// Number of distinct think-vectors possible for a target holding `target_cards`
/// cards, given what the observer holds.
pub fn world_bound(rules: &Rules, observer_hand: &HandVector, target_cards: usize) -> u128 {
    let caps: Vec<u8> = observer_hand
        .counts()
        .iter()
        .map(|&held| rules.suit_size.saturating_sub(held))
        .collect();
    count_sub_multisets(&caps, target_cards)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force(multiplicities: &[u8], k: usize) -> u128 {
        fn walk(multiplicities: &[u8], k: usize) -> u128 {
            match multiplicities.split_first() {
                None => u128::from(k == 0),
                Some((&cap, rest)) => (0..=cap as usize)
                    .take_while(|&take| take <= k)
                    .map(|take| walk(rest, k - take))
                    .sum(),
            }
        }
        walk(multiplicities, k)
    }

    #[test]
    fn binomial_matches_known_values() {
        assert_eq!(binomial(5, 2), 10);
        assert_eq!(binomial(52, 5), 2_598_960);
        assert_eq!(binomial(3, 4), 0);
        assert_eq!(binomial(0, 0), 1);
    }

    #[test]
    fn multi_choose_handles_degenerate_sizes() {
        assert_eq!(multi_choose(3, 2), 6);
        assert_eq!(multi_choose(0, 0), 1);
        assert_eq!(multi_choose(0, 3), 0);
        assert_eq!(multi_choose(4, 0), 1);
    }

    #[test]
    fn three_types_of_four_choose_two_matches_enumeration() {
        assert_eq!(count_sub_multisets(&[4, 4, 4], 2), brute_force(&[4, 4, 4], 2));
        assert_eq!(count_sub_multisets(&[4, 4, 4], 2), 6);
    }

    #[test]
    fn caps_are_respected() {
        for (multiplicities, k) in [
            (vec![1, 1, 1], 2),
            (vec![2, 0, 3], 3),
            (vec![4; 13], 7),
            (vec![1, 2, 3, 4], 6),
            (vec![0, 0], 1),
        ] {
            assert_eq!(
                count_sub_multisets(&multiplicities, k),
                brute_force(&multiplicities, k),
                "multiplicities {multiplicities:?}, k = {k}"
            );
        }
    }

    #[test]
    fn distribute_spreads_removal() {
        assert_eq!(distribute_decrement(&[4, 4, 4], 4), Some(vec![2, 3, 3]));
        assert_eq!(distribute_decrement(&[0, 2], 2), Some(vec![0, 0]));
        assert_eq!(distribute_decrement(&[1, 1], 3), None);
    }

    #[test]
    fn initial_bound_for_small_table() {
        // Two ranks of two, one card each: the opponent holds one of two ranks.
        assert_eq!(initial_world_bound(&[2, 2], 1), Some(2));
    }

    #[test]
    fn world_bound_shrinks_with_observer_holdings() {
        let rules = Rules::new(3, 2, 2);
        let empty = HandVector::zeroed(3);
        let holding = HandVector::from_counts(vec![2, 0, 0]);
        assert_eq!(world_bound(&rules, &empty, 2), 6);
        assert_eq!(world_bound(&rules, &holding, 2), 3);
    }
}
