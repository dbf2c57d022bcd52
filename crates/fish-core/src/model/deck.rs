use crate::model::hand::HandVector;
use crate::model::rank::Rank;
use crate::model::rules::Rules;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Remaining draw pile. Cards are drawn from the end of the vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Rank>,
}

impl Deck {
    /// Every rank `suit_size` times, in rank order.
    pub fn standard(rules: &Rules) -> Self {
        let mut cards = Vec::with_capacity(rules.total_cards());
        for rank in Rank::all(rules.ranks) {
            for _ in 0..rules.suit_size {
                cards.push(rank);
            }
        }
        Self { cards }
    }

    /// A deck in exactly the given order; the last element is drawn first.
    pub fn from_cards(cards: Vec<Rank>) -> Self {
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rules: &Rules, rng: &mut R) -> Self {
        let mut deck = Self::standard(rules);
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(rules: &Rules, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(rules, &mut rng)
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn peek(&self) -> Option<Rank> {
        self.cards.last().copied()
    }

    pub fn draw(&mut self) -> Option<Rank> {
        self.cards.pop()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Rank] {
        &self.cards
    }

    /// Per-rank counts of the cards still in the pile.
    pub fn composition(&self, ranks: u8) -> HandVector {
        let mut counts = HandVector::zeroed(ranks);
        for &rank in &self.cards {
            counts.increment(rank);
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::Deck;
    use crate::model::rank::Rank;
    use crate::model::rules::Rules;

    #[test]
    fn standard_deck_holds_every_copy() {
        let rules = Rules::standard();
        let deck = Deck::standard(&rules);
        assert_eq!(deck.len(), 52);
        let composition = deck.composition(rules.ranks);
        assert!(composition.counts().iter().all(|&count| count == 4));
    }

    #[test]
    fn shuffle_with_seed_is_deterministic() {
        let rules = Rules::standard();
        let deck_a = Deck::shuffled_with_seed(&rules, 42);
        let deck_b = Deck::shuffled_with_seed(&rules, 42);
        assert_eq!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn shuffle_with_different_seeds_differs() {
        let rules = Rules::standard();
        let deck_a = Deck::shuffled_with_seed(&rules, 1);
        let deck_b = Deck::shuffled_with_seed(&rules, 2);
        assert_ne!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn draw_takes_from_the_top() {
        let mut deck = Deck::from_cards(vec![Rank::new(0), Rank::new(1)]);
        assert_eq!(deck.peek(), Some(Rank::new(1)));
        assert_eq!(deck.draw(), Some(Rank::new(1)));
        assert_eq!(deck.draw(), Some(Rank::new(0)));
        assert_eq!(deck.draw(), None);
        assert!(deck.is_empty());
    }
}
