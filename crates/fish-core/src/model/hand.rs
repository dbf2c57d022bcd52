use crate::model::rank::Rank;
use core::fmt;
use std::ops::Index;

/// Per-rank card counts. Used both for real hands and for hypothesised ("think") hands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct HandVector {
    counts: Vec<u8>,
}

impl HandVector {
    pub fn zeroed(ranks: u8) -> Self {
        Self {
            counts: vec![0; ranks as usize],
        }
    }

    pub fn from_counts(counts: Vec<u8>) -> Self {
        Self { counts }
    }

    /// Number of ranks tracked.
    pub fn ranks(&self) -> usize {
        self.counts.len()
    }

    /// True when no card of any rank is counted.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&count| count == 0)
    }

    pub fn get(&self, rank: Rank) -> u8 {
        self.counts[rank.index()]
    }

    pub fn set(&mut self, rank: Rank, count: u8) {
        self.counts[rank.index()] = count;
    }

    pub fn increment(&mut self, rank: Rank) {
        self.add(rank, 1);
    }

    pub fn add(&mut self, rank: Rank, amount: u8) {
        self.counts[rank.index()] += amount;
    }

    /// Zeroes `rank`, returning how many cards were removed.
    pub fn clear(&mut self, rank: Rank) -> u8 {
        std::mem::take(&mut self.counts[rank.index()])
    }

    /// Copy of this vector with `rank` bumped by one.
    pub fn with_increment(&self, rank: Rank) -> Self {
        let mut next = self.clone();
        next.increment(rank);
        next
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|&count| count as usize).sum()
    }

    pub fn counts(&self) -> &[u8] {
        &self.counts
    }

    pub fn iter(&self) -> impl Iterator<Item = (Rank, u8)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(index, &count)| (Rank::new(index as u8), count))
    }
}

impl Index<Rank> for HandVector {
    type Output = u8;

    fn index(&self, rank: Rank) -> &Self::Output {
        &self.counts[rank.index()]
    }
}

impl fmt::Display for HandVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (rank, count) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{rank}: {count}")?;
        }
        Ok(())
    }
}
