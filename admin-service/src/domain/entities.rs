//! # Admin Domain Entities
//!
//! `User` is stored as a common record plus role-scoped nullable columns;
//! `RoleProfile` reconstructs the role-scoped variant on read rather than
//! modeling a class hierarchy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Faculty,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Faculty => "faculty",
            Self::Admin => "admin",
        }
    }
}

/// Raw row shape, mirroring `users` exactly; `RoleProfile` is derived from
/// it on read via [`User::role_profile`].
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub student_id: Option<String>,
    pub major: Option<String>,
    pub year_level: Option<i32>,
    pub faculty_id: Option<String>,
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum RoleProfile {
    Student {
        student_id: String,
        major: Option<String>,
        year_level: Option<i32>,
    },
    Faculty {
        faculty_id: String,
        department: Option<String>,
    },
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub is_active: bool,
    pub profile: RoleProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        let profile = match row.role.as_str() {
            "student" => RoleProfile::Student {
                student_id: row.student_id.unwrap_or_default(),
                major: row.major,
                year_level: row.year_level,
            },
            "faculty" => RoleProfile::Faculty {
                faculty_id: row.faculty_id.unwrap_or_default(),
                department: row.department,
            },
            _ => RoleProfile::Admin,
        };

        Self {
            id: row.id,
            email: row.email,
            full_name: row.full_name,
            is_active: row.is_active,
            profile,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// The write-side course shape `admin-service` manages for
/// `UpdateCourse`/`DeleteCourse`; read access for everyone else goes
/// through `catalog-service`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
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
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(role: &str) -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            email: "a@example.edu".into(),
            full_name: "A Student".into(),
            password_hash: "hash".into(),
            role: role.to_string(),
            is_active: true,
            student_id: Some("S123".into()),
            major: Some("CS".into()),
            year_level: Some(2),
            faculty_id: None,
            department: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_student_row_maps_to_student_profile() {
        let user = User::from(row("student"));
        assert!(matches!(user.profile, RoleProfile::Student { .. }));
    }

    #[test]
    fn test_admin_row_maps_to_admin_profile_regardless_of_leftover_fields() {
        let user = User::from(row("admin"));
        assert!(matches!(user.profile, RoleProfile::Admin));
    }
}
