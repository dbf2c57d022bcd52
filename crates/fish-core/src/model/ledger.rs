//! Ground truth for a game in progress.

use crate::error::{InvalidActionError, RulesError};
use crate::model::deck::Deck;
use crate::model::hand::HandVector;
use crate::model::player::PlayerId;
use crate::model::rank::Rank;
use crate::model::rules::Rules;
use std::array;

/// Real hands, the remaining deck and whose turn it is.
#[derive(Debug, Clone)]
pub struct GameLedger {
    rules: Rules,
    hands: [HandVector; 2],
    deck: Deck,
    turn: PlayerId,
}

impl GameLedger {
    /// Creates a ledger with empty hands. The deck must contain every card exactly once.
    pub fn new(rules: Rules, deck: Deck) -> Result<Self, RulesError> {
        rules.validate()?;
        if deck.len() != rules.total_cards() {
            return Err(RulesError::DeckMismatch {
                found: deck.len(),
                expected: rules.total_cards(),
            });
        }
        if let Some(&rank) = deck.cards().iter().find(|rank| rank.value() >= rules.ranks) {
            return Err(RulesError::DeckComposition {
                rank,
                found: 1,
                expected: 0,
            });
        }
        let composition = deck.composition(rules.ranks);
        if let Some((rank, found)) = composition
            .iter()
            .find(|&(_, count)| count != rules.suit_size)
        {
            return Err(RulesError::DeckComposition {
                rank,
                found,
                expected: rules.suit_size,
            });
        }

        Ok(Self {
            rules,
            hands: array::from_fn(|_| HandVector::zeroed(rules.ranks)),
            deck,
            turn: PlayerId::First,
        })
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn hand(&self, player: PlayerId) -> &HandVector {
        &self.hands[player.index()]
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn turn(&self) -> PlayerId {
        self.turn
    }

    pub fn advance_turn(&mut self) {
        self.turn = self.turn.opponent();
    }

    /// Ranks `player` may ask for: held, but not as a complete book.
    pub fn legal_actions(&self, player: PlayerId) -> Vec<Rank> {
        self.hand(player)
            .iter()
            .filter(|&(_, count)| count > 0 && count < self.rules.suit_size)
            .map(|(rank, _)| rank)
            .collect()
    }

    /// The deck is exhausted and every rank sits whole in one hand.
    pub fn is_over(&self) -> bool {
        self.deck.is_empty()
            && self.hands.iter().all(|hand| {
                hand.counts()
                    .iter()
                    .all(|&count| count == 0 || count == self.rules.suit_size)
            })
    }

    pub fn totals(&self) -> [usize; 2] {
        array::from_fn(|index| self.hands[index].total())
    }

    pub fn books(&self, player: PlayerId) -> usize {
        self.hand(player)
            .counts()
            .iter()
            .filter(|&&count| count == self.rules.suit_size)
            .count()
    }

    /// Player holding more cards. A tie goes to `PlayerId::First`.
    pub fn winner(&self) -> PlayerId {
        let totals = self.totals();
        if totals[PlayerId::Second.index()] > totals[PlayerId::First.index()] {
            PlayerId::Second
        } else {
            PlayerId::First
        }
    }

    pub fn check_rank(&self, rank: Rank) -> Result<(), InvalidActionError> {
        if rank.value() >= self.rules.ranks {
            return Err(InvalidActionError::RankOutOfRange {
                rank,
                ranks: self.rules.ranks,
            });
        }
        Ok(())
    }

    pub(crate) fn peek_card(&self) -> Option<Rank> {
        self.deck.peek()
    }

    pub(crate) fn take_top_card(&mut self, player: PlayerId) -> Option<Rank> {
        let rank = self.deck.draw()?;
        self.hands[player.index()].increment(rank);
        Some(rank)
    }

    /// Moves every card of `rank` from `giver` to `receiver`, returning the count.
    pub(crate) fn move_rank(&mut self, giver: PlayerId, receiver: PlayerId, rank: Rank) -> u8 {
        let moved = self.hands[giver.index()].clear(rank);
        self.hands[receiver.index()].add(rank, moved);
        moved
    }
}
