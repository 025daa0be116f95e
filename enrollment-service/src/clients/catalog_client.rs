//! # Catalog Service Client
//!
//! `GetCart`'s hydration and `EnrollAll`'s pre-transaction gates
//! need course facts, the availability hint, and prerequisite
//! satisfaction — all owned by `catalog-service`. The availability
//! returned here is only a hint: the transaction body still
//! re-reads `courses` itself via `CourseRepository::lock_for_update`.

use reqwest::Client;
use serde::Deserialize;
use shared::deadlines::RPC_DEFAULT;
use shared::errors::ApiError;
use tracing::{error, instrument};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct CourseFacts {
    pub id: Uuid,
    pub code: String,
    pub title: String,
    pub units: i32,
    pub schedule: String,
    pub is_open: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrerequisiteEdge {
    pub course_id: Uuid,
    pub course_code: String,
    pub met: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrerequisiteCheck {
    pub all_met: bool,
    pub prerequisites: Vec<PrerequisiteEdge>,
}

#[derive(Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(RPC_DEFAULT)
            .build()
            .expect("failed to build catalog service HTTP client");

        Self {
            http,
            base_url: base_url.into(),
        }
    }

    #[instrument(skip(self), fields(course_id = %course_id))]
    pub async fn get_course(&self, course_id: Uuid) -> Result<CourseFacts, ApiError> {
        let url = format!("{}/internal/courses/{}", self.base_url, course_id);

        let response = self.http.get(&url).send().await.map_err(|e| {
            error!(error = %e, "catalog service call failed");
            ApiError::Unavailable {
                service: "catalog-service".to_string(),
            }
        })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                resource: format!("course:{course_id}"),
            });
        }

        if response.status() == reqwest::StatusCode::REQUEST_TIMEOUT {
            return Err(ApiError::DeadlineExceeded {
                service: "catalog-service".to_string(),
            });
        }

        if !response.status().is_success() {
            return Err(ApiError::Unavailable {
                service: "catalog-service".to_string(),
            });
        }

        response.json::<CourseFacts>().await.map_err(|e| {
            error!(error = %e, "malformed catalog service response");
            ApiError::Unavailable {
                service: "catalog-service".to_string(),
            }
        })
    }

    #[instrument(skip(self), fields(student_id = %student_id, course_id = %course_id))]
    pub async fn check_prerequisites(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<PrerequisiteCheck, ApiError> {
        let url = format!(
            "{}/internal/courses/{}/prerequisites?student_id={}",
            self.base_url, course_id, student_id
        );

        let response = self.http.get(&url).send().await.map_err(|e| {
            error!(error = %e, "catalog service call failed");
            ApiError::Unavailable {
                service: "catalog-service".to_string(),
            }
        })?;

        if !response.status().is_success() {
            return Err(ApiError::Unavailable {
                service: "catalog-service".to_string(),
            });
        }

        response.json::<PrerequisiteCheck>().await.map_err(|e| {
            error!(error = %e, "malformed catalog service response");
            ApiError::Unavailable {
                service: "catalog-service".to_string(),
            }
        })
    }
}
