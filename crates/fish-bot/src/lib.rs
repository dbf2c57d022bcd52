pub mod policy;
pub mod runner;
pub mod telemetry;

pub use policy::{Heuristic, HeuristicStrategy, RandomStrategy, Strategy};
pub use runner::{GameOutcome, RunnerError, TurnAction, play_game, play_turn};
pub use telemetry::TracingObserver;
