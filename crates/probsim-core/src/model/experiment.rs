use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Frames shown before a coin flip or die roll settles.
pub const DEFAULT_ANIMATION_FRAMES: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Experiment {
    Coin,
    Die,
    Card,
}

impl Experiment {
    pub const ALL: [Experiment; 3] = [Experiment::Coin, Experiment::Die, Experiment::Card];

    pub const fn index(self) -> usize {
        match self {
            Experiment::Coin => 0,
            Experiment::Die => 1,
            Experiment::Card => 2,
        }
    }

    pub const fn sample_space_size(self) -> usize {
        match self {
            Experiment::Coin => 2,
            Experiment::Die => 6,
            Experiment::Card => 52,
        }
    }

    /// Card draws are shown immediately; the other two animate.
    pub const fn default_frames(self) -> u32 {
        match self {
            Experiment::Coin | Experiment::Die => DEFAULT_ANIMATION_FRAMES,
            Experiment::Card => 0,
        }
    }

    pub const fn is_animated(self) -> bool {
        self.default_frames() > 0
    }

    pub const fn key(self) -> &'static str {
        match self {
            Experiment::Coin => "coin",
            Experiment::Die => "die",
            Experiment::Card => "card",
        }
    }
}

impl fmt::Display for Experiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Experiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "coin" | "flip" => Ok(Experiment::Coin),
            "die" | "dice" | "roll" => Ok(Experiment::Die),
            "card" | "draw" => Ok(Experiment::Card),
            other => Err(format!("unknown experiment: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Experiment;

    #[test]
    fn sample_space_sizes() {
        assert_eq!(Experiment::Coin.sample_space_size(), 2);
        assert_eq!(Experiment::Die.sample_space_size(), 6);
        assert_eq!(Experiment::Card.sample_space_size(), 52);
    }

    #[test]
    fn only_card_skips_animation() {
        assert!(Experiment::Coin.is_animated());
        assert!(Experiment::Die.is_animated());
        assert!(!Experiment::Card.is_animated());
        assert_eq!(Experiment::Die.default_frames(), 10);
    }

    #[test]
    fn parses_aliases() {
        assert_eq!("Flip".parse::<Experiment>(), Ok(Experiment::Coin));
        assert_eq!("dice".parse::<Experiment>(), Ok(Experiment::Die));
        assert!("spinner".parse::<Experiment>().is_err());
    }
}
