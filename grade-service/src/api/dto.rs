//! HTTP request/response shapes for the grade API.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::Grade;
use crate::service::grade_service::{CourseGradesView, GpaReport, RosterRow, UploadOutcome};

/// One frame of the `UploadGrades` NDJSON stream: a tagged
/// union serialized externally-tagged as `{"Metadata": {...}}` /
/// `{"Entry": {...}}`, each carrying a trailing `is_last`.
#[derive(Debug, Clone, Deserialize)]
pub enum UploadFrame {
    Metadata {
        course_id: Uuid,
        faculty_id: Uuid,
        #[serde(default)]
        is_last: bool,
    },
    Entry {
        student_id: Uuid,
        grade: String,
        #[serde(default)]
        is_last: bool,
    },
}

impl UploadFrame {
    pub fn is_last(&self) -> bool {
        match self {
            UploadFrame::Metadata { is_last, .. } => *is_last,
            UploadFrame::Entry { is_last, .. } => *is_last,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadGradesResponse {
    pub total_processed: u32,
    pub successful: u32,
    pub failed: u32,
    pub errors: Vec<String>,
}

impl From<UploadOutcome> for UploadGradesResponse {
    fn from(o: UploadOutcome) -> Self {
        Self {
            total_processed: o.total_processed,
            successful: o.successful,
            failed: o.failed,
            errors: o.errors,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeDto {
    pub enrollment_id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub course_code: String,
    pub course_title: String,
    pub units: i32,
    pub semester: String,
    pub grade: String,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub uploaded_at: DateTime<Utc>,
}

impl From<Grade> for GradeDto {
    fn from(g: Grade) -> Self {
        Self {
            enrollment_id: g.enrollment_id,
            student_id: g.student_id,
            course_id: g.course_id,
            course_code: g.course_code,
            course_title: g.course_title,
            units: g.units,
            semester: g.semester,
            grade: g.grade,
            published: g.published,
            published_at: g.published_at,
            uploaded_at: g.uploaded_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GradesQuery {
    pub semester: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentGradesResponse {
    pub grades: Vec<GradeDto>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseGradesResponse {
    pub grades: Vec<GradeDto>,
    pub all_published: bool,
}

impl From<CourseGradesView> for CourseGradesResponse {
    fn from(v: CourseGradesView) -> Self {
        Self {
            grades: v.grades.into_iter().map(GradeDto::from).collect(),
            all_published: v.all_published,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublishGradesRequest {
    pub faculty_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishGradesResponse {
    pub grades_published: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterGpaDto {
    pub semester: String,
    pub gpa: Decimal,
    pub units_attempted: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GpaResponse {
    pub term_gpa: Decimal,
    pub cgpa: Decimal,
    pub total_units_attempted: i32,
    pub total_units_earned: i32,
    pub semester_breakdown: Vec<SemesterGpaDto>,
}

impl From<GpaReport> for GpaResponse {
    fn from(r: GpaReport) -> Self {
        Self {
            term_gpa: r.term_gpa,
            cgpa: r.cgpa,
            total_units_attempted: r.total_units_attempted,
            total_units_earned: r.total_units_earned,
            semester_breakdown: r
                .semester_breakdown
                .into_iter()
                .map(|s| SemesterGpaDto {
                    semester: s.semester,
                    gpa: s.gpa,
                    units_attempted: s.units_attempted,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterRowDto {
    pub enrollment_id: Uuid,
    pub student_id: Uuid,
    pub student_name: String,
    pub student_email: String,
    pub grade: Option<GradeDto>,
}

impl From<RosterRow> for RosterRowDto {
    fn from(r: RosterRow) -> Self {
        Self {
            enrollment_id: r.enrollment_id,
            student_id: r.student_id,
            student_name: r.student_name,
            student_email: r.student_email,
            grade: r.grade.map(GradeDto::from),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterResponse {
    pub roster: Vec<RosterRowDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PassingQuery {
    pub student_id: Uuid,
    /// Comma-separated course ids.
    pub course_ids: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassingResponse {
    pub passing_course_ids: Vec<Uuid>,
}
