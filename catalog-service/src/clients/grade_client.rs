//! # Grade Service Client
//!
//! `CheckPrerequisites` needs to know whether a student holds
//! a published, passing grade for each prerequisite course. That data is
//! owned by the grade service, so the catalog service reaches it over
//! HTTP rather than reading the `grades` table directly — every
//! cross-service read goes through the owning service's RPC surface,
//! even though all services share one physical database.
//!
//! Calls the grade service's internal surface (no `GatewayPrincipal`
//! required; this is a service-to-service call, not one the gateway
//! forwards).

use reqwest::Client;
use serde::Deserialize;
use shared::deadlines::RPC_DEFAULT;
use shared::errors::ApiError;
use std::collections::HashSet;
use tracing::{error, instrument};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
struct PassingResponse {
    passing_course_ids: HashSet<Uuid>,
}

#[derive(Clone)]
pub struct GradeClient {
    http: Client,
    base_url: String,
}

impl GradeClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(RPC_DEFAULT)
            .build()
            .expect("failed to build grade service HTTP client");

        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Returns the subset of `course_ids` for which `student_id` holds a
    /// published, passing grade. Used to answer `CheckPrerequisites`.
    #[instrument(skip(self, course_ids), fields(student_id = %student_id, n = course_ids.len()))]
    pub async fn passing_course_ids(
        &self,
        student_id: Uuid,
        course_ids: &[Uuid],
    ) -> Result<HashSet<Uuid>, ApiError> {
        if course_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let ids = course_ids
            .iter()
            .map(Uuid::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let url = format!(
            "{}/internal/grades/passing?student_id={}&course_ids={}",
            self.base_url, student_id, ids
        );

        let response = self.http.get(&url).send().await.map_err(|e| {
            error!(error = %e, "grade service call failed");
            ApiError::Unavailable {
                service: "grade-service".to_string(),
            }
        })?;

        if response.status() == reqwest::StatusCode::REQUEST_TIMEOUT {
            return Err(ApiError::DeadlineExceeded {
                service: "grade-service".to_string(),
            });
        }

        if !response.status().is_success() {
            return Err(ApiError::Unavailable {
                service: "grade-service".to_string(),
            });
        }

        let body: PassingResponse = response.json().await.map_err(|e| {
            error!(error = %e, "malformed grade service response");
            ApiError::Unavailable {
                service: "grade-service".to_string(),
            }
        })?;

        Ok(body.passing_course_ids)
    }
}
