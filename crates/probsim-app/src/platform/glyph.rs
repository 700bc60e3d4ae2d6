//! Text stand-ins for the outcome images.

use probsim_core::model::card::Card;
use probsim_core::model::coin::Coin;
use probsim_core::model::die::DieFace;
use probsim_core::model::outcome::Outcome;

pub fn glyph_lines(outcome: Outcome) -> Vec<String> {
    match outcome {
        Outcome::Coin(face) => coin(face),
        Outcome::Die(face) => die(face),
        Outcome::Card(card) => card_face(card),
    }
}

fn coin(face: Coin) -> Vec<String> {
    let letter = match face {
        Coin::Heads => 'H',
        Coin::Tails => 'T',
    };
    vec![
        " .---. ".to_string(),
        format!("(  {letter}  )"),
        " '---' ".to_string(),
    ]
}

fn die(face: DieFace) -> Vec<String> {
    // Pip rows, left/centre/right columns.
    let rows: [&str; 3] = match face.value() {
        1 => ["     ", "  o  ", "     "],
        2 => ["o    ", "     ", "    o"],
        3 => ["o    ", "  o  ", "    o"],
        4 => ["o   o", "     ", "o   o"],
        5 => ["o   o", "  o  ", "o   o"],
        _ => ["o   o", "o   o", "o   o"],
    };
    let mut lines = Vec::with_capacity(5);
    lines.push("+-------+".to_string());
    lines.extend(rows.iter().map(|row| format!("| {row} |")));
    lines.push("+-------+".to_string());
    lines
}

fn card_face(card: Card) -> Vec<String> {
    let index = card.rank.index();
    let suit = card.suit.symbol();
    vec![
        "┌───────┐".to_string(),
        format!("│{index:<2}     │"),
        format!("│   {suit}   │"),
        format!("│     {index:>2}│"),
        "└───────┘".to_string(),
    ]
}
