use super::{Strategy, argmax_by};
use fish_core::game::PlayerView;
use fish_core::model::Rank;
use tracing::{Level, event};

/// Belief-driven ask selection rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Heuristic {
    /// Ask for the rank the opponent most likely holds at all.
    Hoarding,
    /// Ask for the rank whose possession is closest to a coin flip.
    MinimizeUncertainty,
    /// Ask for the rank the opponent most likely holds every missing copy of.
    FinishFast,
    /// `FinishFast`, falling back to `MinimizeUncertainty` when its best
    /// probability is below `boundary`.
    ExploitExplore { boundary: f64 },
}

impl Heuristic {
    pub const DEFAULT_BOUNDARY: f64 = 0.2;

    pub fn label(&self) -> &'static str {
        match self {
            Heuristic::Hoarding => "hoarding",
            Heuristic::MinimizeUncertainty => "minimize_uncertainty",
            Heuristic::FinishFast => "finish_fast",
            Heuristic::ExploitExplore { .. } => "exploit_explore",
        }
    }

    fn evaluate(&self, actions: &[Rank], view: &PlayerView<'_>) -> Option<(Rank, &'static str)> {
        match *self {
            Heuristic::Hoarding => hoarding(actions, view).map(|rank| (rank, "most_likely_held")),
            Heuristic::MinimizeUncertainty => {
                most_uncertain(actions, view).map(|rank| (rank, "most_uncertain"))
            }
            Heuristic::FinishFast => {
                finish_fast(actions, view).map(|(rank, _)| (rank, "completes_book"))
            }
            Heuristic::ExploitExplore { boundary } => {
                let (rank, probability) = finish_fast(actions, view)?;
                if probability < boundary {
                    most_uncertain(actions, view).map(|rank| (rank, "explore"))
                } else {
                    Some((rank, "exploit"))
                }
            }
        }
    }
}

fn hoarding(actions: &[Rank], view: &PlayerView<'_>) -> Option<Rank> {
    argmax_by(actions, |rank| view.has_rank_probability(rank)).map(|(rank, _)| rank)
}

fn most_uncertain(actions: &[Rank], view: &PlayerView<'_>) -> Option<Rank> {
    argmax_by(actions, |rank| -(0.5 - view.has_rank_probability(rank)).abs()).map(|(rank, _)| rank)
}

fn finish_fast(actions: &[Rank], view: &PlayerView<'_>) -> Option<(Rank, f64)> {
    argmax_by(actions, |rank| {
        view.at_least_probability(rank, view.missing(rank))
    })
}

/// Adapter exposing a [`Heuristic`] as a [`Strategy`].
pub struct HeuristicStrategy {
    heuristic: Heuristic,
}

impl HeuristicStrategy {
    pub fn new(heuristic: Heuristic) -> Self {
        Self { heuristic }
    }

    pub fn hoarding() -> Self {
        Self::new(Heuristic::Hoarding)
    }

    pub fn finish_fast() -> Self {
        Self::new(Heuristic::FinishFast)
    }

    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }
}

impl Strategy for HeuristicStrategy {
    fn name(&self) -> &str {
        self.heuristic.label()
    }

    fn choose(&mut self, actions: &[Rank], view: &PlayerView<'_>) -> Option<Rank> {
        let (rank, reason) = self.heuristic.evaluate(actions, view)?;
        event!(
            target: "fish_bot::ask",
            Level::DEBUG,
            player = %view.player(),
            heuristic = self.heuristic.label(),
            legal_count = actions.len(),
            chosen = %rank,
            has_rank = view.has_rank_probability(rank),
            worlds = view.belief_about_opponent().len(),
            reason,
        );
        Some(rank)
    }
}
