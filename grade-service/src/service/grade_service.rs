//! # Grade Service
//!
//! Implements the grade pipeline: streaming bulk upload with
//! faculty-course authorization, the publish gate, GPA aggregation, roster
//! assembly, and the passing-grade oracle `catalog-service` calls for
//! prerequisite satisfaction.

use rust_decimal::Decimal;
use shared::errors::ApiError;
use std::collections::BTreeMap;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::clients::{CatalogClient, EnrollmentClient};
use crate::domain::entities::{Grade, LetterGrade};
use crate::repository::grade_repository::CourseSnapshot;
use crate::repository::{GradeRepository, UserRepository, UserRole};

pub struct GradeService {
    grades: GradeRepository,
    users: UserRepository,
    catalog: CatalogClient,
    enrollments: EnrollmentClient,
}

/// Accumulated result of an `UploadGrades` stream.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct UploadOutcome {
    pub total_processed: u32,
    pub successful: u32,
    pub failed: u32,
    pub errors: Vec<String>,
}

impl UploadOutcome {
    fn record_success(&mut self) {
        self.total_processed += 1;
        self.successful += 1;
    }

    fn record_failure(&mut self, message: impl Into<String>) {
        self.total_processed += 1;
        self.failed += 1;
        self.errors.push(message.into());
    }
}

/// `CalculateGPA` response.
#[derive(Debug, Clone)]
pub struct GpaReport {
    pub term_gpa: Decimal,
    pub cgpa: Decimal,
    pub total_units_attempted: i32,
    pub total_units_earned: i32,
    pub semester_breakdown: Vec<SemesterGpa>,
}

#[derive(Debug, Clone)]
pub struct SemesterGpa {
    pub semester: String,
    pub gpa: Decimal,
    pub units_attempted: i32,
}

/// `GetCourseGrades` response: all grades plus whether every one is published.
#[derive(Debug, Clone)]
pub struct CourseGradesView {
    pub grades: Vec<Grade>,
    pub all_published: bool,
}

#[derive(Debug, Clone)]
pub struct RosterRow {
    pub enrollment_id: Uuid,
    pub student_id: Uuid,
    pub student_name: String,
    pub student_email: String,
    pub grade: Option<Grade>,
}

impl GradeService {
    pub fn new(
        grades: GradeRepository,
        users: UserRepository,
        catalog: CatalogClient,
        enrollments: EnrollmentClient,
    ) -> Self {
        Self {
            grades,
            users,
            catalog,
            enrollments,
        }
    }

    /// The faculty-course authorization gate: resolves
    /// `course.faculty_id == faculty_id ∧ user(faculty_id).role=faculty ∧
    /// user.is_active`. Shared by `UploadGrades`'s Metadata frame,
    /// `PublishGrades`, and `GetCourseGrades`.
    #[instrument(skip(self), fields(course_id = %course_id, faculty_id = %faculty_id))]
    pub async fn authorize_faculty_for_course(
        &self,
        course_id: Uuid,
        faculty_id: Uuid,
    ) -> Result<(), ApiError> {
        let course = self.catalog.get_course(course_id).await?;

        if course.faculty_id != Some(faculty_id) {
            return Err(ApiError::PermissionDenied {
                reason: format!("faculty {faculty_id} is not assigned to course {course_id}"),
            });
        }

        let user = self
            .users
            .find_by_id(faculty_id)
            .await?
            .ok_or_else(|| ApiError::PermissionDenied {
                reason: "faculty account not found".to_string(),
            })?;

        if user.role != UserRole::Faculty || !user.is_active {
            return Err(ApiError::PermissionDenied {
                reason: "caller is not an active faculty member".to_string(),
            });
        }

        Ok(())
    }

    /// Processes one `Entry` frame of an `UploadGrades` stream. Never
    /// returns `Err` for a per-entry problem — those accumulate into
    /// `outcome` instead and are never surfaced as RPC errors.
    #[instrument(skip(self, outcome), fields(course_id = %course_id, student_id = %student_id))]
    pub async fn process_entry(
        &self,
        course_id: Uuid,
        student_id: Uuid,
        raw_letter: &str,
        uploaded_by: Uuid,
        outcome: &mut UploadOutcome,
    ) {
        let letter = match LetterGrade::parse(raw_letter) {
            Ok(letter) => letter,
            Err(e) => {
                outcome.record_failure(format!("student {student_id}: {e}"));
                return;
            }
        };

        let lookup = match self
            .enrollments
            .find_active_or_completed(student_id, course_id)
            .await
        {
            Ok(lookup) => lookup,
            Err(e) => {
                warn!(error = %e, "enrollment lookup failed during grade upload");
                outcome.record_failure(format!(
                    "student {student_id}: enrollment lookup unavailable"
                ));
                return;
            }
        };

        let Some(enrollment) = lookup else {
            outcome.record_failure(format!(
                "student {student_id}: no enrollment found for this course"
            ));
            return;
        };

        let course = match self.catalog.get_course(course_id).await {
            Ok(course) => course,
            Err(e) => {
                warn!(error = %e, "course lookup failed during grade upload");
                outcome.record_failure(format!("student {student_id}: course lookup unavailable"));
                return;
            }
        };

        let snapshot = CourseSnapshot {
            code: course.code,
            title: course.title,
            units: course.units,
            semester: course.semester,
        };

        match self
            .grades
            .upsert(
                enrollment.enrollment_id,
                student_id,
                course_id,
                &snapshot,
                letter.as_str(),
                uploaded_by,
            )
            .await
        {
            Ok(_) => outcome.record_success(),
            Err(e) => {
                warn!(error = %e, "grade upsert failed");
                outcome.record_failure(format!("student {student_id}: failed to record grade"));
            }
        }
    }

    /// `PublishGrades`: idempotent, returns the count modified.
    #[instrument(skip(self), fields(course_id = %course_id, faculty_id = %faculty_id))]
    pub async fn publish_grades(&self, course_id: Uuid, faculty_id: Uuid) -> Result<u64, ApiError> {
        self.authorize_faculty_for_course(course_id, faculty_id).await?;
        self.grades.publish_course(course_id).await
    }

    /// `GetStudentGrades`: published-only.
    #[instrument(skip(self))]
    pub async fn get_student_grades(
        &self,
        student_id: Uuid,
        semester: Option<&str>,
    ) -> Result<Vec<Grade>, ApiError> {
        self.grades.list_published_for_student(student_id, semester).await
    }

    /// `GetCourseGrades` (faculty-only): all grades plus `all_published`.
    #[instrument(skip(self), fields(course_id = %course_id, faculty_id = %faculty_id))]
    pub async fn get_course_grades(
        &self,
        course_id: Uuid,
        faculty_id: Uuid,
    ) -> Result<CourseGradesView, ApiError> {
        self.authorize_faculty_for_course(course_id, faculty_id).await?;

        let grades = self.grades.list_for_course(course_id).await?;
        let all_published = !grades.is_empty() && grades.iter().all(|g| g.published);

        Ok(CourseGradesView {
            grades,
            all_published,
        })
    }

    /// `CalculateGPA`: quality_points = Σ(grade_points × units),
    /// attempted_units = Σ units, gpa = quality_points / attempted_units (0
    /// when no attempted units). `term_gpa == cgpa` when no semester filter
    /// is supplied.
    #[instrument(skip(self))]
    pub async fn calculate_gpa(
        &self,
        student_id: Uuid,
        semester: Option<&str>,
    ) -> Result<GpaReport, ApiError> {
        let all_grades = self.grades.list_published_for_gpa(student_id).await?;
        let mut countable: Vec<&Grade> = Vec::with_capacity(all_grades.len());
        for g in &all_grades {
            if g.letter()?.counts_toward_gpa() {
                countable.push(g);
            }
        }

        let (cgpa, total_attempted, total_earned) = aggregate(countable.iter().copied())?;

        let mut by_semester: BTreeMap<&str, Vec<&Grade>> = BTreeMap::new();
        for g in &countable {
            by_semester.entry(g.semester.as_str()).or_default().push(g);
        }

        let mut semester_breakdown = Vec::with_capacity(by_semester.len());
        for (semester, grades) in by_semester {
            let (gpa, attempted, _earned) = aggregate(grades.into_iter())?;
            semester_breakdown.push(SemesterGpa {
                semester: semester.to_string(),
                gpa,
                units_attempted: attempted,
            });
        }

        let term_gpa = match semester {
            Some(target) => {
                let filtered: Vec<&Grade> = countable
                    .iter()
                    .copied()
                    .filter(|g| g.semester == target)
                    .collect();
                aggregate(filtered.into_iter())?.0
            }
            None => cgpa,
        };

        let total_units_attempted = match semester {
            Some(target) => countable
                .iter()
                .filter(|g| g.semester == target)
                .map(|g| g.units)
                .sum(),
            None => total_attempted,
        };

        Ok(GpaReport {
            term_gpa,
            cgpa,
            total_units_attempted,
            total_units_earned: total_earned,
            semester_breakdown,
        })
    }

    /// `GetClassRoster`: joins active enrollments for the
    /// course with `users` and, if present, the student's grade.
    #[instrument(skip(self), fields(course_id = %course_id))]
    pub async fn get_class_roster(&self, course_id: Uuid) -> Result<Vec<RosterRow>, ApiError> {
        let roster = self.enrollments.roster(course_id).await?;
        let student_ids: Vec<Uuid> = roster.iter().map(|r| r.student_id).collect();
        let users = self.users.find_by_ids(&student_ids).await?;
        let grades = self.grades.list_for_course(course_id).await?;

        let user_by_id: std::collections::HashMap<_, _> =
            users.into_iter().map(|u| (u.id, u)).collect();
        let grade_by_enrollment: std::collections::HashMap<_, _> =
            grades.into_iter().map(|g| (g.enrollment_id, g)).collect();

        Ok(roster
            .into_iter()
            .filter_map(|entry| {
                let user = user_by_id.get(&entry.student_id)?;
                Some(RosterRow {
                    enrollment_id: entry.enrollment_id,
                    student_id: entry.student_id,
                    student_name: user.full_name.clone(),
                    student_email: user.email.clone(),
                    grade: grade_by_enrollment.get(&entry.enrollment_id).cloned(),
                })
            })
            .collect())
    }

    /// `/internal/grades/passing`, consumed by `catalog-service`'s
    /// `CheckPrerequisites`.
    #[instrument(skip(self, course_ids), fields(student_id = %student_id))]
    pub async fn passing_course_ids(
        &self,
        student_id: Uuid,
        course_ids: &[Uuid],
    ) -> Result<Vec<Uuid>, ApiError> {
        self.grades.passing_course_ids(student_id, course_ids).await
    }
}

/// `(gpa, attempted_units, earned_units)` over an iterator of grades, all
/// already filtered to `counts_toward_gpa()`. Earned units exclude `F`.
fn aggregate<'a>(grades: impl Iterator<Item = &'a Grade>) -> Result<(Decimal, i32, i32), ApiError> {
    let mut quality_points = Decimal::ZERO;
    let mut attempted_units = 0i32;
    let mut earned_units = 0i32;

    for g in grades {
        let letter = g.letter()?;
        quality_points += letter.gpa_points() * Decimal::from(g.units);
        attempted_units += g.units;
        if !matches!(letter, LetterGrade::F) {
            earned_units += g.units;
        }
    }

    let gpa = if attempted_units > 0 {
        quality_points / Decimal::from(attempted_units)
    } else {
        Decimal::ZERO
    };

    Ok((gpa, attempted_units, earned_units))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn grade(letter: &str, units: i32, semester: &str) -> Grade {
        Grade {
            enrollment_id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            course_id: Uuid::new_v4(),
            course_code: "CS-101".into(),
            course_title: "Intro".into(),
            units,
            semester: semester.into(),
            grade: letter.into(),
            uploaded_by: Uuid::new_v4(),
            uploaded_at: Utc::now(),
            published: true,
            published_at: Some(Utc::now()),
            last_modified_by: Uuid::new_v4(),
            last_modified_at: Utc::now(),
        }
    }

    #[test]
    fn test_gpa_matches_weighted_average() {
        // A (4 units) + B (3 units) + F (2 units): (16+9+0)/9
        let grades = vec![
            grade("A", 4, "2026-fall"),
            grade("B", 3, "2026-fall"),
            grade("F", 2, "2026-fall"),
        ];
        let (gpa, attempted, earned) = aggregate(grades.iter()).unwrap();
        assert_eq!(attempted, 9);
        assert_eq!(earned, 7);
        let expected = Decimal::new(16, 0) + Decimal::new(9, 0);
        assert_eq!(gpa, expected / Decimal::from(9));
    }

    #[test]
    fn test_incomplete_and_withdraw_never_reach_aggregate() {
        let all = vec![grade("A", 4, "2026-fall"), grade("I", 3, "2026-fall")];
        let countable: Vec<&Grade> = all.iter().filter(|g| g.letter().unwrap().counts_toward_gpa()).collect();
        assert_eq!(countable.len(), 1);
    }

    #[test]
    fn test_gpa_is_zero_with_no_attempted_units() {
        let (gpa, attempted, _) = aggregate(std::iter::empty()).unwrap();
        assert_eq!(gpa, Decimal::ZERO);
        assert_eq!(attempted, 0);
    }

    #[test]
    fn test_all_published_requires_nonempty_and_every_row_published() {
        let grades = vec![grade("A", 3, "2026-fall")];
        assert!(grades.iter().all(|g| g.published));
        assert!(!grades.is_empty());
    }

    #[tokio::test]
    async fn test_upload_outcome_accumulates_failures_without_aborting() {
        let mut outcome = UploadOutcome::default();
        outcome.record_success();
        outcome.record_failure("student x: unknown");
        outcome.record_success();

        assert_eq!(outcome.total_processed, 3);
        assert_eq!(outcome.successful, 2);
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.errors.len(), 1);
    }
}
