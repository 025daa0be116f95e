//! # Enrollment Domain Entities
//!
//! `Enrollment` maps to the `enrollments` table: at most one row
//! with `status=enrolled` per `(student_id, course_id)`, enforced by a
//! partial unique index rather than application logic. `Cart` is a single
//! row per student holding an ordered array of course ids; every derived
//! field (total units, conflicts, missing prerequisites) is recomputed on
//! read, never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Enrollment lifecycle state: `enrolled -> dropped` or
/// `enrolled -> completed`, both terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Enrolled,
    Dropped,
    Completed,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enrolled => "enrolled",
            Self::Dropped => "dropped",
            Self::Completed => "completed",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "enrolled" => Some(Self::Enrolled),
            "dropped" => Some(Self::Dropped),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// A row of the `enrollments` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub status: String,
    pub enrolled_at: DateTime<Utc>,
    pub dropped_at: Option<DateTime<Utc>>,
    pub schedule_info: String,
}

impl Enrollment {
    pub fn status(&self) -> EnrollmentStatus {
        EnrollmentStatus::parse(&self.status)
            .expect("enrollments.status violates its CHECK constraint")
    }
}

/// A row of the `carts` table: `course_ids` preserves insertion order.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Cart {
    pub student_id: Uuid,
    pub course_ids: Vec<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    pub fn empty(student_id: Uuid) -> Self {
        Self {
            student_id,
            course_ids: Vec::new(),
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips() {
        for status in [
            EnrollmentStatus::Enrolled,
            EnrollmentStatus::Dropped,
            EnrollmentStatus::Completed,
        ] {
            assert_eq!(EnrollmentStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_empty_cart_has_no_items() {
        let cart = Cart::empty(Uuid::new_v4());
        assert!(cart.course_ids.is_empty());
    }
}
