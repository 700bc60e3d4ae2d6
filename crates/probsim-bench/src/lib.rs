pub mod frequency;
