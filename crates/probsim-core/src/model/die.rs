use core::fmt;
use serde::{Deserialize, Serialize};

/// Face of a six-sided die; always in `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DieFace(u8);

impl DieFace {
    pub const SIDES: u8 = 6;

    pub const ALL: [DieFace; 6] = [
        DieFace(1),
        DieFace(2),
        DieFace(3),
        DieFace(4),
        DieFace(5),
        DieFace(6),
    ];

    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= Self::SIDES {
            Some(DieFace(value))
        } else {
            None
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    pub const fn is_even(self) -> bool {
        self.0 % 2 == 0
    }

    pub const fn parity(self) -> Parity {
        if self.is_even() {
            Parity::Even
        } else {
            Parity::Odd
        }
    }
}

impl TryFrom<u8> for DieFace {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        DieFace::new(value).ok_or_else(|| format!("die face out of range: {value}"))
    }
}

impl From<DieFace> for u8 {
    fn from(face: DieFace) -> Self {
        face.0
    }
}

impl fmt::Display for DieFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parity {
    Even,
    Odd,
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Parity::Even => "Even",
            Parity::Odd => "Odd",
        })
    }
}
