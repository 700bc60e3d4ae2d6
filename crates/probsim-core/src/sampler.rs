//! Uniform outcome generation.
//!
//! [`OutcomeSource`] is the seam between the animation logic and the
//! randomness behind it. Production code uses [`RandomOutcomes`]; tests swap in
//! [`FixedOutcomes`] or wrap either in a [`CountingSource`].

use crate::model::card::Card;
use crate::model::coin::Coin;
use crate::model::die::DieFace;
use crate::model::experiment::Experiment;
use crate::model::outcome::Outcome;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait OutcomeSource {
    /// Draws one outcome of `experiment`, uniformly over its sample space.
    fn sample(&mut self, experiment: Experiment) -> Outcome;
}

impl<S: OutcomeSource + ?Sized> OutcomeSource for &mut S {
    fn sample(&mut self, experiment: Experiment) -> Outcome {
        (**self).sample(experiment)
    }
}

impl<S: OutcomeSource + ?Sized> OutcomeSource for Box<S> {
    fn sample(&mut self, experiment: Experiment) -> Outcome {
        (**self).sample(experiment)
    }
}

/// Samples with replacement: every card draw sees the full 52-card deck.
#[derive(Debug, Clone)]
pub struct RandomOutcomes<R = StdRng> {
    rng: R,
}

impl RandomOutcomes<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Seeded when `seed` is set, otherwise seeded from the OS.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> RandomOutcomes<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn coin(&mut self) -> Coin {
        Coin::ALL[self.rng.gen_range(0..Coin::ALL.len())]
    }

    pub fn die(&mut self) -> DieFace {
        DieFace::ALL[self.rng.gen_range(0..DieFace::ALL.len())]
    }

    /// Rank and suit are drawn independently, which is uniform over the deck.
    pub fn card(&mut self) -> Card {
        let suit = Suit::ALL[self.rng.gen_range(0..Suit::ALL.len())];
        let rank = Rank::ORDERED[self.rng.gen_range(0..Rank::ORDERED.len())];
        Card::new(rank, suit)
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> OutcomeSource for RandomOutcomes<R> {
    fn sample(&mut self, experiment: Experiment) -> Outcome {
        match experiment {
            Experiment::Coin => Outcome::Coin(self.coin()),
            Experiment::Die => Outcome::Die(self.die()),
            Experiment::Card => Outcome::Card(self.card()),
        }
    }
}

/// Deterministic source returning one configured outcome per experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedOutcomes {
    pub coin: Coin,
    pub die: DieFace,
    pub card: Card,
}

impl FixedOutcomes {
    pub fn with_coin(mut self, coin: Coin) -> Self {
        self.coin = coin;
        self
    }

    pub fn with_die(mut self, die: DieFace) -> Self {
        self.die = die;
        self
    }

    pub fn with_card(mut self, card: Card) -> Self {
        self.card = card;
        self
    }
}

impl Default for FixedOutcomes {
    fn default() -> Self {
        Self {
            coin: Coin::Heads,
            die: DieFace::ALL[0],
            card: Card::new(Rank::Ace, Suit::Hearts),
        }
    }
}

impl OutcomeSource for FixedOutcomes {
    fn sample(&mut self, experiment: Experiment) -> Outcome {
        match experiment {
            Experiment::Coin => Outcome::Coin(self.coin),
            Experiment::Die => Outcome::Die(self.die),
            Experiment::Card => Outcome::Card(self.card),
        }
    }
}

/// Wraps a source and tallies `sample` calls per experiment.
#[derive(Debug, Clone, Default)]
pub struct CountingSource<S> {
    inner: S,
    calls: [u64; 3],
}

impl<S> CountingSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            calls: [0; 3],
        }
    }

    pub fn calls(&self, experiment: Experiment) -> u64 {
        self.calls[experiment.index()]
    }

    pub fn total_calls(&self) -> u64 {
        self.calls.iter().sum()
    }

    pub fn reset_counts(&mut self) {
        self.calls = [0; 3];
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: OutcomeSource> OutcomeSource for CountingSource<S> {
    fn sample(&mut self, experiment: Experiment) -> Outcome {
        self.calls[experiment.index()] += 1;
        self.inner.sample(experiment)
    }
}
