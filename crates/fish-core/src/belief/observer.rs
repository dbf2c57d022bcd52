//! Event sink notified by the belief engine.

use super::AskOutcome;
use crate::model::player::PlayerId;
use crate::model::rank::Rank;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeliefEvent {
    Drew {
        drawer: PlayerId,
        rank: Rank,
        deck_remaining: usize,
    },
    Conditioned {
        observer: PlayerId,
        before: usize,
        after: usize,
    },
    Branched {
        observer: PlayerId,
        before: usize,
        after: usize,
    },
    Asked {
        asker: PlayerId,
        rank: Rank,
        outcome: AskOutcome,
    },
    Transferred {
        giver: PlayerId,
        receiver: PlayerId,
        rank: Rank,
        count: u8,
    },
}

/// Receives belief engine events. Implementations must not assume any I/O is available.
pub trait BeliefObserver {
    fn notify(&mut self, event: &BeliefEvent);
}

impl<T: BeliefObserver + ?Sized> BeliefObserver for &mut T {
    fn notify(&mut self, event: &BeliefEvent) {
        (**self).notify(event);
    }
}

impl<T: BeliefObserver + ?Sized> BeliefObserver for Box<T> {
    fn notify(&mut self, event: &BeliefEvent) {
        (**self).notify(event);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl BeliefObserver for NullObserver {
    fn notify(&mut self, _event: &BeliefEvent) {}
}

/// Keeps every event in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Vec<BeliefEvent>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[BeliefEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl BeliefObserver for RecordingObserver {
    fn notify(&mut self, event: &BeliefEvent) {
        self.events.push(event.clone());
    }
}
