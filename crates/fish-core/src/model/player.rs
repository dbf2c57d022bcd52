use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PlayerId {
    First = 0,
    Second = 1,
}

impl PlayerId {
    pub const LOOP: [PlayerId; 2] = [PlayerId::First, PlayerId::Second];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PlayerId::First),
            1 => Some(PlayerId::Second),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn opponent(self) -> PlayerId {
        match self {
            PlayerId::First => PlayerId::Second,
            PlayerId::Second => PlayerId::First,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlayerId::First => "First",
            PlayerId::Second => "Second",
        };
        f.write_str(label)
    }
}
