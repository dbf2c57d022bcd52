pub mod belief;
pub mod error;
pub mod game;
pub mod model;

pub use belief::{AskOutcome, BeliefEngine, BeliefState, World};
pub use error::{ContradictionError, EngineError, InvalidActionError, RulesError};
pub use game::{GoFish, PlayerView, SetupError};
pub use model::{Deck, GameLedger, HandVector, PlayerId, Rank, Rules};
