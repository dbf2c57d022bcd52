//! Belief engine events forwarded to `tracing`.

use fish_core::belief::{BeliefEvent, BeliefObserver};
use tracing::{Level, event};

/// Emits every belief event under the `fish_bot::belief` target and keeps running counters.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver {
    enabled: bool,
    events: usize,
    contractions: usize,
    peak_worlds: usize,
}

impl TracingObserver {
    pub fn new() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    /// Counts events without logging them.
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn events(&self) -> usize {
        self.events
    }

    /// Number of conditionings that removed at least one world.
    pub fn contractions(&self) -> usize {
        self.contractions
    }

    pub fn peak_worlds(&self) -> usize {
        self.peak_worlds
    }

    pub fn reset(&mut self) {
        *self = Self {
            enabled: self.enabled,
            ..Self::default()
        };
    }
}

impl BeliefObserver for TracingObserver {
    fn notify(&mut self, belief_event: &BeliefEvent) {
        self.events += 1;
        match *belief_event {
            BeliefEvent::Conditioned { after, before, .. } => {
                if after < before {
                    self.contractions += 1;
                }
                self.peak_worlds = self.peak_worlds.max(after);
            }
            BeliefEvent::Branched { after, .. } => {
                self.peak_worlds = self.peak_worlds.max(after);
            }
            _ => {}
        }
        if !self.enabled {
            return;
        }

        match belief_event {
            BeliefEvent::Drew {
                drawer,
                rank,
                deck_remaining,
            } => event!(
                target: "fish_bot::belief",
                Level::TRACE,
                kind = "drew",
                drawer = %drawer,
                rank = %rank,
                deck_remaining,
            ),
            BeliefEvent::Conditioned {
                observer,
                before,
                after,
            } => event!(
                target: "fish_bot::belief",
                Level::DEBUG,
                kind = "conditioned",
                observer = %observer,
                before,
                after,
            ),
            BeliefEvent::Branched {
                observer,
                before,
                after,
            } => event!(
                target: "fish_bot::belief",
                Level::DEBUG,
                kind = "branched",
                observer = %observer,
                before,
                after,
            ),
            BeliefEvent::Asked {
                asker,
                rank,
                outcome,
            } => event!(
                target: "fish_bot::belief",
                Level::TRACE,
                kind = "asked",
                asker = %asker,
                rank = %rank,
                outcome = outcome.as_str(),
            ),
            BeliefEvent::Transferred {
                giver,
                receiver,
                rank,
                count,
            } => event!(
                target: "fish_bot::belief",
                Level::TRACE,
                kind = "transferred",
                giver = %giver,
                receiver = %receiver,
                rank = %rank,
                count,
            ),
        }
    }
}
