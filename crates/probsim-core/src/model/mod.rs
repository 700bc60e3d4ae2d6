pub mod card;
pub mod coin;
pub mod die;
pub mod experiment;
pub mod outcome;
pub mod rank;
pub mod suit;
