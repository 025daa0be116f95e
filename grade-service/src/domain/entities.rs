//! # Grade Domain Entities
//!
//! `Grade` maps to the `grades` table, keyed by `enrollment_id`.
//! `LetterGrade` is the closed set `{A,B,C,D,F,I,W}` with the GPA-points
//! mapping and the passing/countable-toward-GPA predicates grade
//! calculation depends on.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::errors::ApiError;
use sqlx::FromRow;
use uuid::Uuid;

/// Letter grade: `grade ∈ {A,B,C,D,F,I,W}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    F,
    I,
    W,
}

/// Returned when a raw string doesn't case-normalize to a known letter.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid letter grade: {0}")]
pub struct InvalidLetterGrade(pub String);

impl LetterGrade {
    /// Parses a letter grade, case-normalized upper.
    pub fn parse(raw: &str) -> Result<Self, InvalidLetterGrade> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            "F" => Ok(Self::F),
            "I" => Ok(Self::I),
            "W" => Ok(Self::W),
            other => Err(InvalidLetterGrade(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
            Self::I => "I",
            Self::W => "W",
        }
    }

    /// Passing for prerequisite satisfaction: letter in `{A,B,C,D}`.
    pub fn is_passing(&self) -> bool {
        matches!(self, Self::A | Self::B | Self::C | Self::D)
    }

    /// Counts toward GPA numerator/denominator: letter in `{A,B,C,D,F}`,
    /// excluding `I` and `W`.
    pub fn counts_toward_gpa(&self) -> bool {
        matches!(self, Self::A | Self::B | Self::C | Self::D | Self::F)
    }

    /// Grade points for GPA arithmetic. `I`/`W` never reach this — callers
    /// filter with [`Self::counts_toward_gpa`] first.
    pub fn gpa_points(&self) -> Decimal {
        match self {
            Self::A => Decimal::new(40, 1),
            Self::B => Decimal::new(30, 1),
            Self::C => Decimal::new(20, 1),
            Self::D => Decimal::new(10, 1),
            Self::F => Decimal::ZERO,
            Self::I | Self::W => Decimal::ZERO,
        }
    }
}

impl std::fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A grade row, keyed by `enrollment_id`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Grade {
    pub enrollment_id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub course_code: String,
    pub course_title: String,
    pub units: i32,
    pub semester: String,
    pub grade: String,
    pub uploaded_by: Uuid,
    pub uploaded_at: DateTime<Utc>,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub last_modified_by: Uuid,
    pub last_modified_at: DateTime<Utc>,
}

impl Grade {
    /// Parses the stored letter column. The column is constrained by a
    /// `CHECK` at the database level, so this should only fail if that
    /// constraint has drifted from `LetterGrade`'s variants.
    pub fn letter(&self) -> Result<LetterGrade, ApiError> {
        LetterGrade::parse(&self.grade).map_err(|e| ApiError::InternalError {
            message: format!("grades.grade violates its CHECK constraint: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(LetterGrade::parse("a").unwrap(), LetterGrade::A);
        assert_eq!(LetterGrade::parse("w").unwrap(), LetterGrade::W);
    }

    #[test]
    fn test_parse_rejects_unknown_letters() {
        assert!(LetterGrade::parse("E").is_err());
        assert!(LetterGrade::parse("A+").is_err());
    }

    #[test]
    fn test_incomplete_and_withdraw_excluded_from_gpa() {
        assert!(!LetterGrade::I.counts_toward_gpa());
        assert!(!LetterGrade::W.counts_toward_gpa());
        assert!(LetterGrade::F.counts_toward_gpa());
    }

    #[test]
    fn test_passing_excludes_f_incomplete_withdraw() {
        assert!(LetterGrade::D.is_passing());
        assert!(!LetterGrade::F.is_passing());
        assert!(!LetterGrade::I.is_passing());
        assert!(!LetterGrade::W.is_passing());
    }

    #[test]
    fn test_gpa_points_scale() {
        assert_eq!(LetterGrade::A.gpa_points(), Decimal::new(40, 1));
        assert_eq!(LetterGrade::F.gpa_points(), Decimal::ZERO);
    }
}
