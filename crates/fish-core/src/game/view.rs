use crate::belief::BeliefState;
use crate::belief::query;
use crate::model::hand::HandVector;
use crate::model::ledger::GameLedger;
use crate::model::player::PlayerId;
use crate::model::rank::Rank;
use crate::model::rules::Rules;

/// What a player may legitimately consult when choosing an action: public counts,
/// its own hand and its own belief about the opponent.
#[derive(Debug, Clone, Copy)]
pub struct PlayerView<'a> {
    player: PlayerId,
    ledger: &'a GameLedger,
    belief: &'a BeliefState,
}

impl<'a> PlayerView<'a> {
    pub fn new(
        player: PlayerId,
        ledger: &'a GameLedger,
        belief: &'a BeliefState,
    ) -> Self {
        Self {
            player,
            ledger,
            belief,
        }
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn rules(&self) -> &'a Rules {
        self.ledger.rules()
    }

    pub fn hand(&self) -> &'a HandVector {
        self.ledger.hand(self.player)
    }

    pub fn opponent_card_count(&self) -> usize {
        self.ledger.hand(self.player.opponent()).total()
    }

    pub fn deck_len(&self) -> usize {
        self.ledger.deck_len()
    }

    pub fn belief_about_opponent(&self) -> &'a BeliefState {
        self.belief
    }

    pub fn has_rank_probability(&self, rank: Rank) -> f64 {
        query::marginal_has_rank(self.belief, rank)
    }

    pub fn at_least_probability(&self, rank: Rank, k: u8) -> f64 {
        query::marginal_at_least(self.belief, rank, k)
    }

    /// Copies of `rank` this player still lacks for a book.
    pub fn missing(&self, rank: Rank) -> u8 {
        self.rules().suit_size.saturating_sub(self.hand()[rank])
    }
}
