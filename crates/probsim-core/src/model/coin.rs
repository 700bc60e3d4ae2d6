use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Coin {
    Heads,
    Tails,
}

impl Coin {
    pub const ALL: [Coin; 2] = [Coin::Heads, Coin::Tails];

    pub const fn index(self) -> usize {
        match self {
            Coin::Heads => 0,
            Coin::Tails => 1,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Coin::Heads => "Heads",
            Coin::Tails => "Tails",
        }
    }

    pub const fn asset_key(self) -> &'static str {
        match self {
            Coin::Heads => "heads",
            Coin::Tails => "tails",
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::Coin;

    #[test]
    fn names_and_keys() {
        assert_eq!(Coin::Heads.to_string(), "Heads");
        assert_eq!(Coin::Tails.asset_key(), "tails");
        assert_eq!(Coin::ALL[Coin::Tails.index()], Coin::Tails);
    }
}
