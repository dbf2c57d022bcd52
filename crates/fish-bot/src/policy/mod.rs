mod heuristic;
mod random;

pub use heuristic::{Heuristic, HeuristicStrategy};
pub use random::RandomStrategy;

use fish_core::game::PlayerView;
use fish_core::model::Rank;

/// Chooses which rank to ask for.
///
/// Strategies only ever see a [`PlayerView`]; they cannot touch the ledger or beliefs.
pub trait Strategy: Send {
    fn name(&self) -> &str;

    /// Picks one of `actions`, which the runner guarantees is non-empty.
    fn choose(&mut self, actions: &[Rank], view: &PlayerView<'_>) -> Option<Rank>;
}

/// First action with the highest score; ties keep the lowest rank.
pub(crate) fn argmax_by<F>(actions: &[Rank], mut score: F) -> Option<(Rank, f64)>
where
    F: FnMut(Rank) -> f64,
{
    let mut best: Option<(Rank, f64)> = None;
    for &rank in actions {
        let value = score(rank);
        match best {
            Some((_, top)) if value <= top => {}
            _ => best = Some((rank, value)),
        }
    }
    best
}
