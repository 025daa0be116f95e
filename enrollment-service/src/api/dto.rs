//! HTTP request/response shapes for the enrollment API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::Enrollment;
use crate::service::cart_service::{ConflictPair, HydratedCart, MissingPrerequisite};
use crate::service::enrollment_service::EnrollAllOutcome;
use crate::service::override_service::OverrideAction;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentDto {
    pub id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub status: String,
    pub enrolled_at: DateTime<Utc>,
    pub dropped_at: Option<DateTime<Utc>>,
    pub schedule_info: String,
}

impl From<Enrollment> for EnrollmentDto {
    fn from(e: Enrollment) -> Self {
        Self {
            id: e.id,
            student_id: e.student_id,
            course_id: e.course_id,
            status: e.status,
            enrolled_at: e.enrolled_at,
            dropped_at: e.dropped_at,
            schedule_info: e.schedule_info,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddToCartRequest {
    pub course_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictPairDto {
    pub course_a: Uuid,
    pub course_b: Uuid,
}

impl From<ConflictPair> for ConflictPairDto {
    fn from(c: ConflictPair) -> Self {
        Self {
            course_a: c.course_a,
            course_b: c.course_b,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingPrerequisiteDto {
    pub course_id: Uuid,
    pub missing_prereq_course_id: Uuid,
    pub missing_prereq_code: String,
}

impl From<MissingPrerequisite> for MissingPrerequisiteDto {
    fn from(m: MissingPrerequisite) -> Self {
        Self {
            course_id: m.course_id,
            missing_prereq_course_id: m.missing_prereq_course_id,
            missing_prereq_code: m.missing_prereq_code,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemDto {
    pub course_id: Uuid,
    pub code: String,
    pub title: String,
    pub units: i32,
    pub is_open: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItemDto>,
    pub total_units: i32,
    pub conflicts: Vec<ConflictPairDto>,
    pub missing_prerequisites: Vec<MissingPrerequisiteDto>,
}

impl From<HydratedCart> for CartResponse {
    fn from(cart: HydratedCart) -> Self {
        Self {
            items: cart
                .items
                .into_iter()
                .map(|i| CartItemDto {
                    course_id: i.course_id,
                    code: i.code,
                    title: i.title,
                    units: i.units,
                    is_open: i.is_open,
                })
                .collect(),
            total_units: cart.total_units,
            conflicts: cart.conflicts.into_iter().map(ConflictPairDto::from).collect(),
            missing_prerequisites: cart
                .missing_prerequisites
                .into_iter()
                .map(MissingPrerequisiteDto::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckConflictsRequest {
    pub course_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckConflictsResponse {
    pub conflicts: Vec<ConflictPairDto>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollAllResponse {
    pub success: bool,
    pub enrollments: Vec<EnrollmentDto>,
    pub total_units: i32,
}

impl From<EnrollAllOutcome> for EnrollAllResponse {
    fn from(outcome: EnrollAllOutcome) -> Self {
        Self {
            success: true,
            enrollments: outcome.enrollments.into_iter().map(EnrollmentDto::from).collect(),
            total_units: outcome.total_units,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DropRequest {
    pub course_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OverrideRequest {
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub action: OverrideAction,
    pub reason: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LookupQuery {
    pub student_id: Uuid,
    pub course_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
pub struct LookupResponse {
    pub enrollment_id: Uuid,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RosterQuery {
    pub course_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
pub struct RosterEntryDto {
    pub enrollment_id: Uuid,
    pub student_id: Uuid,
    pub enrolled_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RosterListResponse {
    pub roster: Vec<RosterEntryDto>,
}
