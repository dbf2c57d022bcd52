//! Weighted hypothesis sets and the primitives that update them.

use crate::error::{ContradictionError, InvalidActionError};
use crate::model::hand::HandVector;
use crate::model::rank::Rank;
use std::collections::BTreeMap;

/// Tolerance used whenever probability mass is compared.
pub const PROBABILITY_EPSILON: f64 = 1e-9;

/// One hypothesis about the target's hand, as accepted by [`BeliefState::insert`].
#[derive(Debug, Clone)]
pub struct World {
    pub p: f64,
    pub think: HandVector,
}

impl World {
    pub fn new(p: f64, think: HandVector) -> Self {
        Self { p, think }
    }
}

/// Distribution one player holds over the other's hand.
///
/// Worlds are keyed by think-vector, so inserting a world whose think-vector is
/// already present adds to the existing probability instead of duplicating it.
#[derive(Debug, Clone, PartialEq)]
pub struct BeliefState {
    ranks: u8,
    worlds: BTreeMap<HandVector, f64>,
}

impl BeliefState {
    /// Certainty that the target holds nothing.
    pub fn new(ranks: u8) -> Self {
        let mut worlds = BTreeMap::new();
        worlds.insert(HandVector::zeroed(ranks), 1.0);
        Self { ranks, worlds }
    }

    /// Builds a state from arbitrary worlds, merging duplicates. No renormalisation is applied.
    pub fn from_worlds(ranks: u8, worlds: impl IntoIterator<Item = World>) -> Self {
        let mut state = Self {
            ranks,
            worlds: BTreeMap::new(),
        };
        for world in worlds {
            state.insert(world);
        }
        state
    }

    pub fn ranks(&self) -> u8 {
        self.ranks
    }

    pub fn len(&self) -> usize {
        self.worlds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.worlds.is_empty()
    }

    /// Merge-on-insert: probabilities of equal think-vectors are summed.
    pub fn insert(&mut self, world: World) {
        *self.worlds.entry(world.think).or_insert(0.0) += world.p;
    }

    pub fn probability(&self, think: &HandVector) -> Option<f64> {
        self.worlds.get(think).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HandVector, f64)> + '_ {
        self.worlds.iter().map(|(think, &p)| (think, p))
    }

    pub fn total_probability(&self) -> f64 {
        self.worlds.values().sum()
    }

    pub fn is_normalized(&self) -> bool {
        (self.total_probability() - 1.0).abs() <= PROBABILITY_EPSILON
    }

    /// Bayesian filter: keeps the worlds satisfying `keep` and rescales them to sum to one.
    ///
    /// Returns a new state; `self` is untouched. Fails when no probability mass survives.
    pub fn conditioned<F>(&self, keep: F) -> Result<Self, ContradictionError>
    where
        F: Fn(&HandVector) -> bool,
    {
        let survivors: Vec<(&HandVector, f64)> =
            self.iter().filter(|(think, _)| keep(think)).collect();
        let total: f64 = survivors.iter().map(|(_, p)| p).sum();
        if !total.is_finite() || total <= 0.0 {
            return Err(ContradictionError::new(self.len()));
        }

        let worlds = survivors
            .into_iter()
            .map(|(think, p)| (think.clone(), p / total))
            .collect();
        Ok(Self {
            ranks: self.ranks,
            worlds,
        })
    }

    /// In-place form of [`BeliefState::conditioned`]. On error the state is unchanged.
    pub fn condition<F>(&mut self, keep: F) -> Result<(), ContradictionError>
    where
        F: Fn(&HandVector) -> bool,
    {
        *self = self.conditioned(keep)?;
        Ok(())
    }

    /// Expands every world over the rank the target may just have drawn.
    ///
    /// `observer_hand` is the observer's real hand and `deck_before` the deck size
    /// before the draw. Under world `w` the deck holds
    /// `suit_size - w[c] - observer_hand[c]` cards of rank `c`; each positive count
    /// spawns a successor with `c` incremented and proportional probability.
    pub fn branched_on_draw(
        &self,
        suit_size: u8,
        observer_hand: &HandVector,
        deck_before: usize,
    ) -> Result<Self, InvalidActionError> {
        if deck_before == 0 {
            return Err(InvalidActionError::EmptyDeck);
        }

        let mut next = Self {
            ranks: self.ranks,
            worlds: BTreeMap::new(),
        };
        let deck_size = deck_before as f64;
        for (think, p) in self.iter() {
            for rank in Rank::all(self.ranks) {
                let in_deck =
                    i32::from(suit_size) - i32::from(think[rank]) - i32::from(observer_hand[rank]);
                if in_deck <= 0 {
                    continue;
                }
                next.insert(World::new(
                    p * f64::from(in_deck) / deck_size,
                    think.with_increment(rank),
                ));
            }
        }
        Ok(next)
    }

    /// Rewrites every think-vector, re-merging worlds that become identical.
    pub fn mapped<F>(&self, mut rewrite: F) -> Self
    where
        F: FnMut(&mut HandVector),
    {
        let mut next = Self {
            ranks: self.ranks,
            worlds: BTreeMap::new(),
        };
        for (think, p) in self.iter() {
            let mut think = think.clone();
            rewrite(&mut think);
            next.insert(World::new(p, think));
        }
        next
    }
}
