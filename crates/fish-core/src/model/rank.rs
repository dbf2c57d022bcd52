use core::fmt;
use serde::{Deserialize, Serialize};

/// Card rank, an index in `[0, ranks)` for the rules in play.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Rank(u8);

impl Rank {
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterates every rank below `ranks` in ascending order.
    pub fn all(ranks: u8) -> impl Iterator<Item = Rank> {
        (0..ranks).map(Rank)
    }
}

impl From<u8> for Rank {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Rank;

    #[test]
    fn all_enumerates_in_order() {
        let ranks: Vec<_> = Rank::all(3).map(Rank::value).collect();
        assert_eq!(ranks, vec![0, 1, 2]);
    }

    #[test]
    fn display_is_numeric() {
        assert_eq!(Rank::new(11).to_string(), "11");
    }
}
