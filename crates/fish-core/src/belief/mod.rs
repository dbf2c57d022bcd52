//! Exact first-order belief tracking over the opponent's hand.
//!
//! This module is composed of:
//! - `state`: the weighted, deduplicated world set (`BeliefState`) and its conditioning/branching primitives.
//! - `engine`: draw/ask/transfer updates applied in lockstep with the ledger.
//! - `query`: read-only marginals consumed by strategies.
//! - `combinatorics`: sub-multiset counting used to bound belief size.
//! - `observer`: event sink notified of every belief change.

pub mod combinatorics;
mod engine;
pub mod observer;
pub mod query;
mod state;

pub use engine::{AskOutcome, BeliefEngine};
pub use observer::{BeliefEvent, BeliefObserver, NullObserver, RecordingObserver};
pub use state::{BeliefState, PROBABILITY_EPSILON, World};
