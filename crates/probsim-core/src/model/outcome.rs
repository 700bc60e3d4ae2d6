use crate::model::card::Card;
use crate::model::coin::Coin;
use crate::model::die::{DieFace, Parity};
use crate::model::experiment::Experiment;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Realized value of one experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "experiment", content = "value", rename_all = "snake_case")]
pub enum Outcome {
    Coin(Coin),
    Die(DieFace),
    Card(Card),
}

impl Outcome {
    pub const fn experiment(self) -> Experiment {
        match self {
            Outcome::Coin(_) => Experiment::Coin,
            Outcome::Die(_) => Experiment::Die,
            Outcome::Card(_) => Experiment::Card,
        }
    }

    pub const fn event_space(self) -> EventSpace {
        match self {
            Outcome::Coin(face) => EventSpace::Face(face),
            Outcome::Die(face) => EventSpace::Parity(face.parity()),
            Outcome::Card(card) => EventSpace::Suit(card.suit),
        }
    }

    /// Position of this outcome within its experiment's sample space.
    pub const fn ordinal(self) -> usize {
        match self {
            Outcome::Coin(face) => face.index(),
            Outcome::Die(face) => face.index(),
            Outcome::Card(card) => card.ordinal(),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Coin(face) => face.fmt(f),
            Outcome::Die(face) => face.fmt(f),
            Outcome::Card(card) => card.fmt(f),
        }
    }
}

impl From<Coin> for Outcome {
    fn from(value: Coin) -> Self {
        Outcome::Coin(value)
    }
}

impl From<DieFace> for Outcome {
    fn from(value: DieFace) -> Self {
        Outcome::Die(value)
    }
}

impl From<Card> for Outcome {
    fn from(value: Card) -> Self {
        Outcome::Card(value)
    }
}

/// Named class of the sample space an outcome falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventSpace {
    Face(Coin),
    Parity(Parity),
    Suit(Suit),
}

impl fmt::Display for EventSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventSpace::Face(face) => face.fmt(f),
            EventSpace::Parity(parity) => parity.fmt(f),
            EventSpace::Suit(suit) => suit.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EventSpace, Outcome};
    use crate::model::card::Card;
    use crate::model::coin::Coin;
    use crate::model::die::DieFace;
    use crate::model::experiment::Experiment;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    fn die(value: u8) -> Outcome {
        Outcome::Die(DieFace::new(value).expect("valid face"))
    }

    #[test]
    fn event_space_classifies_each_experiment() {
        assert_eq!(Outcome::Coin(Coin::Heads).event_space().to_string(), "Heads");
        assert_eq!(die(4).event_space().to_string(), "Even");
        assert_eq!(die(3).event_space().to_string(), "Odd");
        let card = Outcome::Card(Card::new(Rank::Queen, Suit::Spades));
        assert_eq!(card.event_space(), EventSpace::Suit(Suit::Spades));
        assert_eq!(card.to_string(), "Queen of Spades");
    }

    #[test]
    fn experiment_tag_matches_variant() {
        assert_eq!(Outcome::Coin(Coin::Tails).experiment(), Experiment::Coin);
        assert_eq!(die(1).experiment(), Experiment::Die);
    }

    #[test]
    fn serializes_with_experiment_tag() {
        let json = serde_json::to_string(&die(5)).expect("serialize");
        assert_eq!(json, r#"{"experiment":"die","value":5}"#);
    }
}
