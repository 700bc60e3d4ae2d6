pub mod glyph;
pub mod terminal;

pub use terminal::run;
