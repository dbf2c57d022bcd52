//! Read-only marginals over a [`BeliefState`].

use super::BeliefState;
use crate::model::hand::HandVector;
use crate::model::rank::Rank;

/// Total probability of the worlds satisfying `condition`.
pub fn probability_of<F>(belief: &BeliefState, condition: F) -> f64
where
    F: Fn(&HandVector) -> bool,
{
    belief
        .iter()
        .filter(|(think, _)| condition(think))
        .map(|(_, p)| p)
        .sum()
}

/// Probability the target holds at least one card of `rank`. Zero for a rank outside the table.
pub fn marginal_has_rank(belief: &BeliefState, rank: Rank) -> f64 {
    marginal_at_least(belief, rank, 1)
}

/// Probability the target holds at least `k` cards of `rank`. Zero for a rank outside the table.
pub fn marginal_at_least(belief: &BeliefState, rank: Rank, k: u8) -> f64 {
    if rank.index() >= usize::from(belief.ranks()) {
        return 0.0;
    }
    probability_of(belief, |think| think[rank] >= k)
}

/// [`marginal_has_rank`] for every rank, indexed by rank.
pub fn has_rank_probabilities(belief: &BeliefState) -> Vec<f64> {
    Rank::all(belief.ranks())
        .map(|rank| marginal_has_rank(belief, rank))
        .collect()
}

/// Expected number of cards of each rank in the target's hand.
pub fn expected_counts(belief: &BeliefState) -> Vec<f64> {
    let mut expected = vec![0.0; belief.ranks() as usize];
    for (think, p) in belief.iter() {
        for (rank, count) in think.iter() {
            expected[rank.index()] += p * f64::from(count);
        }
    }
    expected
}
