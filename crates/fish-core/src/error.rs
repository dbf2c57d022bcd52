//! Error types surfaced by the ledger and the belief engine.

use crate::model::player::PlayerId;
use crate::model::rank::Rank;
use thiserror::Error;

/// Conditioning removed every hypothesis: the observation contradicts the belief state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("observation contradicts all {worlds} worlds held by {}", observer_label(.observer))]
pub struct ContradictionError {
    pub observer: Option<PlayerId>,
    pub worlds: usize,
}

impl ContradictionError {
    pub fn new(worlds: usize) -> Self {
        Self {
            observer: None,
            worlds,
        }
    }

    pub fn for_observer(mut self, observer: PlayerId) -> Self {
        self.observer = Some(observer);
        self
    }
}

fn observer_label(observer: &Option<PlayerId>) -> String {
    match observer {
        Some(player) => player.to_string(),
        None => "an unattached belief".to_string(),
    }
}

/// An action that is structurally impossible for the current ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidActionError {
    #[error("the deck is empty")]
    EmptyDeck,
    #[error("rank {rank} is outside the {ranks} ranks in play")]
    RankOutOfRange { rank: Rank, ranks: u8 },
    #[error("{player} holds {count} of rank {rank}; asking needs strictly between 0 and {suit_size}")]
    RankNotAskable {
        player: PlayerId,
        rank: Rank,
        count: u8,
        suit_size: u8,
    },
    #[error("{player} holds no cards of rank {rank} to hand over")]
    NothingToTransfer { player: PlayerId, rank: Rank },
    #[error("{0} cannot trade with themselves")]
    SamePlayer(PlayerId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Contradiction(#[from] ContradictionError),
    #[error(transparent)]
    InvalidAction(#[from] InvalidActionError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("at least one rank is required")]
    NoRanks,
    #[error("suit size must be at least one")]
    EmptySuit,
    #[error("dealing {dealt} cards exceeds the {deck}-card deck")]
    DealExceedsDeck { dealt: usize, deck: usize },
    #[error("deck holds {found} cards but the rules call for {expected}")]
    DeckMismatch { found: usize, expected: usize },
    #[error("deck holds {found} cards of rank {rank}, expected {expected}")]
    DeckComposition { rank: Rank, found: u8, expected: u8 },
}
