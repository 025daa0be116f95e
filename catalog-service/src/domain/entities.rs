//! # Catalog Domain Entities
//!
//! Core domain entities for the catalog service. These map to the
//! PostgreSQL schema defined in `db/migrations`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::schedule::Schedule;
use sqlx::FromRow;
use uuid::Uuid;

/// A course offering.
///
/// `enrolled` is the single hottest contended field in the whole system;
/// the catalog service only ever reads it. Writes happen
/// exclusively inside the enrollment service's transactions via `$inc`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: Uuid,
    pub code: String,
    pub title: String,
    pub units: i32,
    pub capacity: i32,
    pub enrolled: i32,
    pub schedule: String,
    pub faculty_id: Option<Uuid>,
    pub is_open: bool,
    pub semester: String,
    pub room: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    /// Parses the free-text `schedule` column into structured days/times.
    ///
    /// Returns `None` for a malformed schedule string rather than erroring
    /// the whole request — a course with a bad schedule should still show
    /// up in listings, just without conflict-detection support.
    pub fn parsed_schedule(&self) -> Option<Schedule> {
        Schedule::parse(&self.schedule).ok()
    }

    pub fn seats_remaining(&self) -> i32 {
        (self.capacity - self.enrolled).max(0)
    }

    pub fn is_available(&self) -> bool {
        self.is_open && self.seats_remaining() > 0
    }
}

/// A directed prerequisite edge `course_id -> prereq_course_id`.
///
/// The graph is not validated for acyclicity; `CheckPrerequisites` only
/// ever walks direct edges, so a cycle cannot cause recursion.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Prerequisite {
    pub id: Uuid,
    pub course_id: Uuid,
    pub prereq_course_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(capacity: i32, enrolled: i32, is_open: bool) -> Course {
        Course {
            id: Uuid::new_v4(),
            code: "CS-101".into(),
            title: "Intro to CS".into(),
            units: 3,
            capacity,
            enrolled,
            schedule: "MWF 09:00-10:00".into(),
            faculty_id: None,
            is_open,
            semester: "2026-fall".into(),
            room: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_seats_remaining_never_negative() {
        let c = course(10, 12, true);
        assert_eq!(c.seats_remaining(), 0);
    }

    #[test]
    fn test_available_requires_open_and_seats() {
        assert!(course(10, 5, true).is_available());
        assert!(!course(10, 10, true).is_available());
        assert!(!course(10, 5, false).is_available());
    }

    #[test]
    fn test_parsed_schedule_roundtrips() {
        let c = course(10, 0, true);
        let parsed = c.parsed_schedule().unwrap();
        assert_eq!(parsed.start_minutes, 540);
    }
}
