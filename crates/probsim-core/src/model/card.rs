use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const COUNT: usize = 52;

    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Every card of a standard deck, suit-major in `Suit::ALL` order.
    pub fn all() -> impl Iterator<Item = Card> {
        Suit::ALL
            .into_iter()
            .flat_map(|suit| Rank::ORDERED.into_iter().map(move |rank| Card::new(rank, suit)))
    }

    /// Dense position in `0..52` matching the order of [`Card::all`].
    pub const fn ordinal(self) -> usize {
        self.suit.index() * Rank::ORDERED.len() + (self.rank.value() as usize - 1)
    }

    /// File stem of the card's image, e.g. `queen_of_spades`.
    pub fn asset_stem(self) -> String {
        format!("{}_of_{}", self.rank.asset_key(), self.suit.asset_key())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::{Card, Rank, Suit};
    use std::collections::HashSet;

    #[test]
    fn display_reads_rank_of_suit() {
        let card = Card::new(Rank::Queen, Suit::Spades);
        assert_eq!(card.to_string(), "Queen of Spades");
        assert_eq!(Card::new(Rank::Ten, Suit::Hearts).to_string(), "10 of Hearts");
    }

    #[test]
    fn full_deck_has_52_unique_cards() {
        let cards: HashSet<Card> = Card::all().collect();
        assert_eq!(cards.len(), Card::COUNT);
    }

    #[test]
    fn ordinal_matches_enumeration_order() {
        for (position, card) in Card::all().enumerate() {
            assert_eq!(card.ordinal(), position);
        }
    }

    #[test]
    fn asset_stem_is_lower_snake_case() {
        assert_eq!(Card::new(Rank::Ace, Suit::Hearts).asset_stem(), "ace_of_hearts");
        assert_eq!(Card::new(Rank::Ten, Suit::Clubs).asset_stem(), "10_of_clubs");
    }
}
