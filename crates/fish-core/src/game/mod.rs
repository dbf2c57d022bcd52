//! Game façade tying the ledger to both players' beliefs.

mod view;

pub use view::PlayerView;

use crate::belief::combinatorics::initial_world_bound;
use crate::belief::{AskOutcome, BeliefEngine, BeliefObserver, BeliefState, NullObserver};
use crate::error::{EngineError, RulesError};
use crate::model::deck::Deck;
use crate::model::ledger::GameLedger;
use crate::model::player::PlayerId;
use crate::model::rank::Rank;
use crate::model::rules::Rules;

/// Errors raised while setting up a game.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Rules(#[from] RulesError),
    #[error("dealing failed: {0}")]
    Deal(#[from] EngineError),
}

#[derive(Debug, Clone)]
pub struct GoFish<O = NullObserver> {
    ledger: GameLedger,
    engine: BeliefEngine<O>,
}

impl GoFish<NullObserver> {
    /// Shuffles a full deck with `seed` and deals `hand_size` cards to each player.
    pub fn new_game(rules: Rules, seed: u64) -> Result<Self, SetupError> {
        Self::from_deck(rules, Deck::shuffled_with_seed(&rules, seed))
    }

    /// Deals from `deck` in its given order.
    pub fn from_deck(rules: Rules, deck: Deck) -> Result<Self, SetupError> {
        Self::from_deck_with_observer(rules, deck, NullObserver)
    }

    /// Both players start with empty hands and certain, empty beliefs.
    pub fn undealt(rules: Rules, deck: Deck) -> Result<Self, SetupError> {
        Self::undealt_with_observer(rules, deck, NullObserver)
    }
}

impl<O: BeliefObserver> GoFish<O> {
    pub fn new_game_with_observer(rules: Rules, seed: u64, observer: O) -> Result<Self, SetupError> {
        Self::from_deck_with_observer(rules, Deck::shuffled_with_seed(&rules, seed), observer)
    }

    pub fn from_deck_with_observer(
        rules: Rules,
        deck: Deck,
        observer: O,
    ) -> Result<Self, SetupError> {
        let mut game = Self::undealt_with_observer(rules, deck, observer)?;
        game.deal()?;
        Ok(game)
    }

    pub fn undealt_with_observer(rules: Rules, deck: Deck, observer: O) -> Result<Self, SetupError> {
        let ledger = GameLedger::new(rules, deck)?;
        Ok(Self {
            ledger,
            engine: BeliefEngine::with_observer(rules, observer),
        })
    }

    /// Every dealt card is a draw, so beliefs already reflect the deal.
    fn deal(&mut self) -> Result<(), EngineError> {
        let hand_size = self.rules().hand_size;
        for player in PlayerId::LOOP {
            for _ in 0..hand_size {
                self.draw(player)?;
            }
        }
        if let Some(bound) = self.initial_world_bound() {
            for player in PlayerId::LOOP {
                debug_assert!(
                    self.belief(player).len() as u128 <= bound,
                    "{player} holds more worlds than any deal allows"
                );
            }
        }
        Ok(())
    }

    /// Worst-case belief size right after the deal, over every possible hand.
    pub fn initial_world_bound(&self) -> Option<u128> {
        let rules = self.rules();
        let cards = vec![rules.suit_size; usize::from(rules.ranks)];
        initial_world_bound(&cards, usize::from(rules.hand_size))
    }

    pub fn rules(&self) -> &Rules {
        self.ledger.rules()
    }

    pub fn ledger(&self) -> &GameLedger {
        &self.ledger
    }

    pub fn engine(&self) -> &BeliefEngine<O> {
        &self.engine
    }

    pub fn observer_mut(&mut self) -> &mut O {
        self.engine.observer_mut()
    }

    /// `observer`'s belief about the opponent.
    pub fn belief(&self, observer: PlayerId) -> &BeliefState {
        self.engine.belief(observer)
    }

    pub fn turn(&self) -> PlayerId {
        self.ledger.turn()
    }

    pub fn legal_actions(&self, player: PlayerId) -> Vec<Rank> {
        self.ledger.legal_actions(player)
    }

    pub fn draw(&mut self, drawer: PlayerId) -> Result<Rank, EngineError> {
        self.engine.draw(drawer, &mut self.ledger)
    }

    pub fn ask(&mut self, asker: PlayerId, rank: Rank) -> Result<AskOutcome, EngineError> {
        self.engine.ask(asker, rank, &self.ledger)
    }

    pub fn transfer(
        &mut self,
        giver: PlayerId,
        receiver: PlayerId,
        rank: Rank,
    ) -> Result<u8, EngineError> {
        self.engine.transfer(giver, receiver, rank, &mut self.ledger)
    }

    pub fn advance_turn(&mut self) {
        self.ledger.advance_turn();
    }

    pub fn is_over(&self) -> bool {
        self.ledger.is_over()
    }

    pub fn winner(&self) -> PlayerId {
        self.ledger.winner()
    }

    /// Read-only handle handed to a strategy acting as `player`.
    pub fn view(&self, player: PlayerId) -> PlayerView<'_> {
        PlayerView::new(player, &self.ledger, self.engine.belief(player))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::belief::RecordingObserver;
    use crate::belief::BeliefEvent;

    #[test]
    fn new_game_deals_hand_size_to_each_player() {
        let rules = Rules::standard();
        let game = GoFish::new_game(rules, 7).expect("game starts");
        for player in PlayerId::LOOP {
            assert_eq!(game.ledger().hand(player).total(), 7);
            assert!(game.belief(player).is_normalized());
        }
        assert_eq!(game.ledger().deck_len(), 52 - 14);
        assert_eq!(game.turn(), PlayerId::First);
    }

    #[test]
    fn dealt_beliefs_stay_within_initial_bound() {
        let rules = Rules::new(5, 4, 4);
        for seed in 0..6 {
            let game = GoFish::new_game(rules, seed).unwrap();
            let bound = game.initial_world_bound().expect("deal fits the deck");
            for player in PlayerId::LOOP {
                assert!(game.belief(player).len() as u128 <= bound);
            }
        }
        // Two ranks of two, one card each: at most two hypotheses.
        let tiny = GoFish::new_game(Rules::new(2, 2, 1), 0).unwrap();
        assert_eq!(tiny.initial_world_bound(), Some(2));
    }

    #[test]
    fn same_seed_same_game() {
        let rules = Rules::new(4, 4, 3);
        let a = GoFish::new_game(rules, 99).unwrap();
        let b = GoFish::new_game(rules, 99).unwrap();
        for player in PlayerId::LOOP {
            assert_eq!(a.ledger().hand(player), b.ledger().hand(player));
            assert_eq!(a.belief(player), b.belief(player));
        }
    }

    #[test]
    fn invalid_rules_are_rejected() {
        let err = GoFish::new_game(Rules::new(2, 2, 3), 1).expect_err("deal too large");
        assert!(matches!(err, SetupError::Rules(RulesError::DealExceedsDeck { .. })));
    }

    #[test]
    fn deal_notifies_observer_per_card() {
        let rules = Rules::new(3, 2, 2);
        let deck = Deck::shuffled_with_seed(&rules, 3);
        let mut game =
            GoFish::from_deck_with_observer(rules, deck, RecordingObserver::new()).unwrap();
        let draws = game
            .observer_mut()
            .events()
            .iter()
            .filter(|event| matches!(event, BeliefEvent::Drew { .. }))
            .count();
        assert_eq!(draws, 4);
    }

    #[test]
    fn view_exposes_own_hand_and_belief() {
        let game = GoFish::new_game(Rules::new(3, 2, 2), 11).unwrap();
        let view = game.view(PlayerId::Second);
        assert_eq!(view.player(), PlayerId::Second);
        assert_eq!(view.hand(), game.ledger().hand(PlayerId::Second));
        assert_eq!(view.belief_about_opponent(), game.belief(PlayerId::Second));
        assert_eq!(view.opponent_card_count(), 2);
        assert_eq!(view.deck_len(), 2);
    }
}
