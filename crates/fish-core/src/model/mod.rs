//! Ground-truth game model: ranks, hand vectors, the deck and the ledger.

pub mod deck;
pub mod hand;
pub mod ledger;
pub mod player;
pub mod rank;
pub mod rules;

pub use deck::Deck;
pub use hand::HandVector;
pub use ledger::GameLedger;
pub use player::PlayerId;
pub use rank::Rank;
pub use rules::Rules;
