//! # Catalog Service Client
//!
//! The faculty-course authorization gate and the course-fact
//! denormalization on grade upload both need the owning course's
//! `faculty_id`/`code`/`title`/`units`/`semester` — data owned by
//! `catalog-service`. Calls hit catalog's internal surface (no
//! `GatewayPrincipal` required; these are service-to-service, not
//! gateway-forwarded requests).

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
    pub semester: String,
    pub faculty_id: Option<Uuid>,
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
}
