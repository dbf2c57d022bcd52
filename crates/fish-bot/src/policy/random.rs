use super::Strategy;
use fish_core::game::PlayerView;
use fish_core::model::Rank;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Uniformly random legal ask; ignores beliefs entirely.
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Strategy for RandomStrategy {
    fn name(&self) -> &str {
        "random"
    }

    fn choose(&mut self, actions: &[Rank], _view: &PlayerView<'_>) -> Option<Rank> {
        actions.choose(&mut self.rng).copied()
    }
}
