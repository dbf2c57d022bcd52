use crate::error::RulesError;
use serde::{Deserialize, Serialize};

/// Table parameters: how many ranks, copies per rank, and cards dealt per player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    pub ranks: u8,
    pub suit_size: u8,
    pub hand_size: u8,
}

impl Rules {
    pub const fn new(ranks: u8, suit_size: u8, hand_size: u8) -> Self {
        Self {
            ranks,
            suit_size,
            hand_size,
        }
    }

    /// Thirteen ranks of four suits, seven cards each.
    pub const fn standard() -> Self {
        Self::new(13, 4, 7)
    }

    pub fn total_cards(&self) -> usize {
        self.ranks as usize * self.suit_size as usize
    }

    pub fn validate(&self) -> Result<(), RulesError> {
        if self.ranks == 0 {
            return Err(RulesError::NoRanks);
        }
        if self.suit_size == 0 {
            return Err(RulesError::EmptySuit);
        }
        let dealt = 2 * self.hand_size as usize;
        if dealt > self.total_cards() {
            return Err(RulesError::DealExceedsDeck {
                dealt,
                deck: self.total_cards(),
            });
        }
        Ok(())
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::standard()
    }
}
