//! # Enrollment Service Client
//!
//! `UploadGrades` must locate the enrollment `(student_id, course_id)` in
//! status `{enrolled, completed}` to know which `enrollment_id` a grade
//! keys to, and `GetClassRoster` needs the set of actively-enrolled
//! students for a course. Both are owned by `enrollment-service`, so both
//! go through its internal surface.

use reqwest::Client;
use serde::Deserialize;
use shared::deadlines::RPC_DEFAULT;
use shared::errors::ApiError;
use tracing::{error, instrument};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct EnrollmentLookup {
    pub enrollment_id: Uuid,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RosterEntry {
    pub enrollment_id: Uuid,
    pub student_id: Uuid,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Clone)]
pub struct EnrollmentClient {
    http: Client,
    base_url: String,
}

impl EnrollmentClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(RPC_DEFAULT)
            .build()
            .expect("failed to build enrollment service HTTP client");

        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Looks up the enrollment for `(student_id, course_id)` in status
    /// `{enrolled, completed}`. Returns `None` rather
    /// than an error when no such enrollment exists — the caller treats a
    /// missing enrollment as a per-entry failure, not an RPC error.
    #[instrument(skip(self), fields(student_id = %student_id, course_id = %course_id))]
    pub async fn find_active_or_completed(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<EnrollmentLookup>, ApiError> {
        let url = format!(
            "{}/internal/enrollments/lookup?student_id={student_id}&course_id={course_id}",
            self.base_url
        );

        let response = self.http.get(&url).send().await.map_err(|e| {
            error!(error = %e, "enrollment service call failed");
            ApiError::Unavailable {
                service: "enrollment-service".to_string(),
            }
        })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if response.status() == reqwest::StatusCode::REQUEST_TIMEOUT {
            return Err(ApiError::DeadlineExceeded {
                service: "enrollment-service".to_string(),
            });
        }

        if !response.status().is_success() {
            return Err(ApiError::Unavailable {
                service: "enrollment-service".to_string(),
            });
        }

        let lookup = response.json::<EnrollmentLookup>().await.map_err(|e| {
            error!(error = %e, "malformed enrollment service response");
            ApiError::Unavailable {
                service: "enrollment-service".to_string(),
            }
        })?;

        Ok(Some(lookup))
    }

    #[instrument(skip(self), fields(course_id = %course_id))]
    pub async fn roster(&self, course_id: Uuid) -> Result<Vec<RosterEntry>, ApiError> {
        let url = format!("{}/internal/enrollments/roster?course_id={course_id}", self.base_url);

        let response = self.http.get(&url).send().await.map_err(|e| {
            error!(error = %e, "enrollment service call failed");
            ApiError::Unavailable {
                service: "enrollment-service".to_string(),
            }
        })?;

        if !response.status().is_success() {
            return Err(ApiError::Unavailable {
                service: "enrollment-service".to_string(),
            });
        }

        response.json::<Vec<RosterEntry>>().await.map_err(|e| {
            error!(error = %e, "malformed enrollment service response");
            ApiError::Unavailable {
                service: "enrollment-service".to_string(),
            }
        })
    }
}
