//! Domain entities for the grade service: `Grade` and `LetterGrade`.

pub mod entities;

pub use entities::{Grade, InvalidLetterGrade, LetterGrade};
