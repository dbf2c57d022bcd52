//! Turn orchestration: asks strategies for ranks and drives the game through the engine.

use crate::policy::Strategy;
use fish_core::belief::{AskOutcome, BeliefObserver};
use fish_core::error::EngineError;
use fish_core::game::GoFish;
use fish_core::model::{PlayerId, Rank};
use thiserror::Error;
use tracing::{Level, event};

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("strategy '{strategy}' for {player} returned no action")]
    NoAction { player: PlayerId, strategy: String },
    #[error("strategy '{strategy}' for {player} chose illegal rank {rank}")]
    IllegalChoice {
        player: PlayerId,
        strategy: String,
        rank: Rank,
    },
    #[error("game exceeded the turn limit of {limit}")]
    TurnLimit { limit: usize },
}

/// What happened during one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAction {
    /// No rank could be asked; the player drew (if possible) and passed.
    ForcedDraw { drew: Option<Rank> },
    Asked {
        rank: Rank,
        outcome: AskOutcome,
        moved: u8,
        drew: Option<Rank>,
    },
}

/// Plays the current player's turn. A confirmed ask keeps the turn; anything else passes it.
pub fn play_turn<O: BeliefObserver>(
    game: &mut GoFish<O>,
    strategy: &mut dyn Strategy,
) -> Result<TurnAction, RunnerError> {
    let player = game.turn();
    let opponent = player.opponent();
    let actions = game.legal_actions(player);

    if actions.is_empty() {
        let drew = fish(game, player)?;
        game.advance_turn();
        return Ok(TurnAction::ForcedDraw { drew });
    }

    let rank = strategy
        .choose(&actions, &game.view(player))
        .ok_or_else(|| RunnerError::NoAction {
            player,
            strategy: strategy.name().to_string(),
        })?;
    if !actions.contains(&rank) {
        return Err(RunnerError::IllegalChoice {
            player,
            strategy: strategy.name().to_string(),
            rank,
        });
    }

    let outcome = game.ask(player, rank)?;
    let (moved, drew) = match outcome {
        AskOutcome::Confirm => (game.transfer(opponent, player, rank)?, None),
        AskOutcome::Deny => {
            // An empty deck cannot deny a two-player ask, but pass the turn regardless.
            let drew = fish(game, player)?;
            game.advance_turn();
            (0, drew)
        }
    };

    event!(
        target: "fish_bot::turn",
        Level::DEBUG,
        player = %player,
        strategy = strategy.name(),
        rank = %rank,
        outcome = outcome.as_str(),
        moved,
        drew = ?drew,
        deck = game.ledger().deck_len(),
    );

    Ok(TurnAction::Asked {
        rank,
        outcome,
        moved,
        drew,
    })
}

fn fish<O: BeliefObserver>(game: &mut GoFish<O>, player: PlayerId) -> Result<Option<Rank>, RunnerError> {
    if game.ledger().deck_len() == 0 {
        return Ok(None);
    }
    Ok(Some(game.draw(player)?))
}

/// Summary of a finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOutcome {
    pub winner: PlayerId,
    pub totals: [usize; 2],
    pub books: [usize; 2],
    pub turns: usize,
    pub confirms: usize,
    pub denies: usize,
    pub forced_draws: usize,
    /// Largest belief state either player held at any point.
    pub peak_worlds: usize,
}

/// Runs turns until the game is over. `strategies` is indexed by [`PlayerId::index`].
pub fn play_game<O: BeliefObserver>(
    game: &mut GoFish<O>,
    strategies: &mut [Box<dyn Strategy>; 2],
    turn_limit: usize,
) -> Result<GameOutcome, RunnerError> {
    let mut turns = 0usize;
    let mut confirms = 0usize;
    let mut denies = 0usize;
    let mut forced_draws = 0usize;
    let mut peak_worlds = peak(game);

    while !game.is_over() {
        if turns >= turn_limit {
            return Err(RunnerError::TurnLimit { limit: turn_limit });
        }
        let player = game.turn();
        let strategy = strategies[player.index()].as_mut();
        match play_turn(game, strategy)? {
            TurnAction::ForcedDraw { .. } => forced_draws += 1,
            TurnAction::Asked {
                outcome: AskOutcome::Confirm,
                ..
            } => confirms += 1,
            TurnAction::Asked {
                outcome: AskOutcome::Deny,
                ..
            } => denies += 1,
        }
        turns += 1;
        peak_worlds = peak_worlds.max(peak(game));
    }

    let ledger = game.ledger();
    let outcome = GameOutcome {
        winner: ledger.winner(),
        totals: ledger.totals(),
        books: [ledger.books(PlayerId::First), ledger.books(PlayerId::Second)],
        turns,
        confirms,
        denies,
        forced_draws,
        peak_worlds,
    };
    event!(
        target: "fish_bot::game",
        Level::INFO,
        winner = %outcome.winner,
        turns,
        confirms,
        denies,
        peak_worlds,
    );
    Ok(outcome)
}

fn peak<O: BeliefObserver>(game: &GoFish<O>) -> usize {
    PlayerId::LOOP
        .iter()
        .map(|&player| game.belief(player).len())
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{Heuristic, HeuristicStrategy, RandomStrategy};
    use fish_core::game::PlayerView;
    use fish_core::model::{Deck, Rules};

    struct Stubborn(Rank);

    impl Strategy for Stubborn {
        fn name(&self) -> &str {
            "stubborn"
        }

        fn choose(&mut self, _actions: &[Rank], _view: &PlayerView<'_>) -> Option<Rank> {
            Some(self.0)
        }
    }

    fn deck(top_last: &[u8]) -> Deck {
        Deck::from_cards(top_last.iter().copied().map(Rank::new).collect())
    }

    #[test]
    fn confirm_keeps_the_turn() {
        let rules = Rules::new(3, 2, 2);
        // First is dealt 0 and 1; Second is dealt 1 and 2.
        let mut game = GoFish::from_deck(rules, deck(&[0, 2, 2, 1, 1, 0])).unwrap();
        let mut strategy = Stubborn(Rank::new(1));
        let action = play_turn(&mut game, &mut strategy).unwrap();
        assert_eq!(
            action,
            TurnAction::Asked {
                rank: Rank::new(1),
                outcome: AskOutcome::Confirm,
                moved: 1,
                drew: None,
            }
        );
        assert_eq!(game.turn(), PlayerId::First);
        assert_eq!(game.ledger().hand(PlayerId::First)[Rank::new(1)], 2);
    }

    #[test]
    fn deny_draws_and_passes() {
        let rules = Rules::new(3, 2, 2);
        let mut game = GoFish::from_deck(rules, deck(&[0, 2, 2, 1, 1, 0])).unwrap();
        let mut strategy = Stubborn(Rank::new(0));
        let action = play_turn(&mut game, &mut strategy).unwrap();
        assert_eq!(
            action,
            TurnAction::Asked {
                rank: Rank::new(0),
                outcome: AskOutcome::Deny,
                moved: 0,
                drew: Some(Rank::new(2)),
            }
        );
        assert_eq!(game.turn(), PlayerId::Second);
        assert_eq!(game.ledger().deck_len(), 1);
    }

    #[test]
    fn illegal_choice_is_reported() {
        let rules = Rules::new(3, 2, 2);
        let mut game = GoFish::from_deck(rules, deck(&[0, 2, 2, 1, 1, 0])).unwrap();
        let mut strategy = Stubborn(Rank::new(2));
        let err = play_turn(&mut game, &mut strategy).unwrap_err();
        assert!(matches!(err, RunnerError::IllegalChoice { .. }));
        assert_eq!(game.ledger().deck_len(), 2);
    }

    #[test]
    fn full_games_terminate_with_consistent_totals() {
        let rules = Rules::new(5, 4, 4);
        for seed in 0..8u64 {
            let mut game = GoFish::new_game(rules, seed).unwrap();
            let mut strategies: [Box<dyn Strategy>; 2] = [
                Box::new(RandomStrategy::with_seed(seed)),
                Box::new(HeuristicStrategy::new(Heuristic::ExploitExplore {
                    boundary: Heuristic::DEFAULT_BOUNDARY,
                })),
            ];
            let outcome = play_game(&mut game, &mut strategies, 1_000).unwrap();
            assert!(game.is_over());
            assert_eq!(outcome.totals.iter().sum::<usize>(), rules.total_cards());
            assert_eq!(outcome.books.iter().sum::<usize>(), rules.ranks as usize);
            assert_eq!(outcome.turns, outcome.confirms + outcome.denies + outcome.forced_draws);
            assert!(outcome.peak_worlds >= 1);
        }
    }

    #[test]
    fn turn_limit_is_enforced() {
        let mut game = GoFish::new_game(Rules::new(5, 4, 4), 3).unwrap();
        let mut strategies: [Box<dyn Strategy>; 2] = [
            Box::new(HeuristicStrategy::hoarding()),
            Box::new(HeuristicStrategy::hoarding()),
        ];
        let err = play_game(&mut game, &mut strategies, 1).unwrap_err();
        assert!(matches!(err, RunnerError::TurnLimit { limit: 1 }));
    }
}
