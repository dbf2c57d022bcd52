//! Belief updates applied in lockstep with ledger actions.

use super::combinatorics::world_bound;
use super::observer::{BeliefEvent, BeliefObserver, NullObserver};
use super::state::BeliefState;
use crate::error::{EngineError, InvalidActionError};
use crate::model::ledger::GameLedger;
use crate::model::player::PlayerId;
use crate::model::rank::Rank;
use crate::model::rules::Rules;
use std::array;

/// Answer to an ask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AskOutcome {
    Confirm,
    Deny,
}

impl AskOutcome {
    pub const fn is_confirm(self) -> bool {
        matches!(self, AskOutcome::Confirm)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            AskOutcome::Confirm => "confirm",
            AskOutcome::Deny => "deny",
        }
    }
}

/// Owns both first-order beliefs: `belief(p)` is `p`'s distribution over `p.opponent()`'s hand.
///
/// Every operation validates first, computes the new states without touching
/// `self`, then commits ledger and beliefs together. A rejected action leaves
/// everything as it was.
#[derive(Debug, Clone)]
pub struct BeliefEngine<O = NullObserver> {
    rules: Rules,
    beliefs: [BeliefState; 2],
    observer: O,
}

impl BeliefEngine<NullObserver> {
    pub fn new(rules: Rules) -> Self {
        Self::with_observer(rules, NullObserver)
    }
}

impl<O: BeliefObserver> BeliefEngine<O> {
    pub fn with_observer(rules: Rules, observer: O) -> Self {
        Self {
            rules,
            beliefs: array::from_fn(|_| BeliefState::new(rules.ranks)),
            observer,
        }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// `observer`'s belief about the opponent's hand.
    pub fn belief(&self, observer: PlayerId) -> &BeliefState {
        &self.beliefs[observer.index()]
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Upper bound on the worlds `observer` can hold given the current ledger.
    pub fn world_bound(&self, observer: PlayerId, ledger: &GameLedger) -> u128 {
        world_bound(
            &self.rules,
            ledger.hand(observer),
            ledger.hand(observer.opponent()).total(),
        )
    }

    /// `drawer` takes the top card of the deck.
    ///
    /// The drawer rules out worlds where the opponent would hold more copies of the
    /// drawn rank than remain; the opponent branches over every rank the card could be.
    pub fn draw(&mut self, drawer: PlayerId, ledger: &mut GameLedger) -> Result<Rank, EngineError> {
        let deck_before = ledger.deck_len();
        let rank = ledger.peek_card().ok_or(InvalidActionError::EmptyDeck)?;
        let opponent = drawer.opponent();
        let suit_size = self.rules.suit_size;

        let held_after = ledger.hand(drawer)[rank] + 1;
        let limit = suit_size.saturating_sub(held_after);
        let drawer_view = self
            .belief(drawer)
            .conditioned(|think| think[rank] <= limit)
            .map_err(|err| err.for_observer(drawer))?;
        let opponent_view =
            self.belief(opponent)
                .branched_on_draw(suit_size, ledger.hand(opponent), deck_before)?;

        ledger.take_top_card(drawer);
        self.observer.notify(&BeliefEvent::Drew {
            drawer,
            rank,
            deck_remaining: ledger.deck_len(),
        });
        let before = self.commit(drawer, drawer_view);
        self.observer.notify(&BeliefEvent::Conditioned {
            observer: drawer,
            before,
            after: self.belief(drawer).len(),
        });
        let before = self.commit(opponent, opponent_view);
        self.observer.notify(&BeliefEvent::Branched {
            observer: opponent,
            before,
            after: self.belief(opponent).len(),
        });

        self.debug_check(ledger);
        Ok(rank)
    }

    /// `asker` asks the opponent for `rank`, which the asker must hold without owning the book.
    pub fn ask(
        &mut self,
        asker: PlayerId,
        rank: Rank,
        ledger: &GameLedger,
    ) -> Result<AskOutcome, EngineError> {
        ledger.check_rank(rank)?;
        let held = ledger.hand(asker)[rank];
        if held == 0 || held >= self.rules.suit_size {
            return Err(InvalidActionError::RankNotAskable {
                player: asker,
                rank,
                count: held,
                suit_size: self.rules.suit_size,
            }
            .into());
        }

        let askee = asker.opponent();
        // Asking reveals the asker holds the rank.
        let askee_view = self
            .belief(askee)
            .conditioned(|think| think[rank] > 0)
            .map_err(|err| err.for_observer(askee))?;

        let outcome = if ledger.hand(askee)[rank] > 0 {
            AskOutcome::Confirm
        } else {
            AskOutcome::Deny
        };
        let asker_view = match outcome {
            AskOutcome::Confirm => self.belief(asker).conditioned(|think| think[rank] > 0),
            AskOutcome::Deny => self.belief(asker).conditioned(|think| think[rank] == 0),
        }
        .map_err(|err| err.for_observer(asker))?;

        self.observer.notify(&BeliefEvent::Asked {
            asker,
            rank,
            outcome,
        });
        for (observer, view) in [(askee, askee_view), (asker, asker_view)] {
            let before = self.commit(observer, view);
            self.observer.notify(&BeliefEvent::Conditioned {
                observer,
                before,
                after: self.belief(observer).len(),
            });
        }

        self.debug_check(ledger);
        Ok(outcome)
    }

    /// `giver` hands every card of `rank` to `receiver`, returning how many moved.
    pub fn transfer(
        &mut self,
        giver: PlayerId,
        receiver: PlayerId,
        rank: Rank,
        ledger: &mut GameLedger,
    ) -> Result<u8, EngineError> {
        if giver == receiver {
            return Err(InvalidActionError::SamePlayer(giver).into());
        }
        ledger.check_rank(rank)?;
        let count = ledger.hand(giver)[rank];
        if count == 0 {
            return Err(InvalidActionError::NothingToTransfer {
                player: giver,
                rank,
            }
            .into());
        }

        // The receiver now knows the exact count and that none remain with the giver.
        let receiver_view = self
            .belief(receiver)
            .conditioned(|think| think[rank] == count)
            .map_err(|err| err.for_observer(receiver))?
            .mapped(|think| {
                think.clear(rank);
            });
        // The giver already knew the count; every world gains it.
        let giver_view = self.belief(giver).mapped(|think| think.add(rank, count));

        let moved = ledger.move_rank(giver, receiver, rank);
        debug_assert_eq!(moved, count);
        self.observer.notify(&BeliefEvent::Transferred {
            giver,
            receiver,
            rank,
            count,
        });
        let before = self.commit(receiver, receiver_view);
        self.observer.notify(&BeliefEvent::Conditioned {
            observer: receiver,
            before,
            after: self.belief(receiver).len(),
        });
        self.commit(giver, giver_view);

        self.debug_check(ledger);
        Ok(count)
    }

    fn commit(&mut self, observer: PlayerId, state: BeliefState) -> usize {
        std::mem::replace(&mut self.beliefs[observer.index()], state).len()
    }

    fn debug_check(&self, ledger: &GameLedger) {
        for observer in PlayerId::LOOP {
            let belief = self.belief(observer);
            debug_assert!(
                belief.is_normalized(),
                "belief of {observer} sums to {}",
                belief.total_probability()
            );
            debug_assert!(
                belief.len() as u128 <= self.world_bound(observer, ledger),
                "belief of {observer} exceeds its world bound"
            );
        }
    }
}
