//! HTTP handlers for the grade service.

use actix_web::{web, HttpResponse};
use futures_util::StreamExt;
use shared::auth::GatewayPrincipal;
use shared::deadlines::RPC_UPLOAD_STREAM;
use shared::errors::ApiError;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::api::dto::{
    CourseGradesResponse, GpaResponse, GradeDto, GradesQuery, PassingQuery, PassingResponse,
    PublishGradesRequest, PublishGradesResponse, RosterResponse, RosterRowDto,
    StudentGradesResponse, UploadFrame, UploadGradesResponse,
};
use crate::service::grade_service::UploadOutcome;
use crate::AppState;

pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "grade-service",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// `UploadGrades`: a single logical transaction of NDJSON
/// frames. The first frame must be `Metadata`; anything else fails the
/// whole stream `INVALID_ARGUMENT` with no grade created. Per-entry
/// failures accumulate into the response rather than aborting the stream.
#[instrument(skip(state, payload, principal))]
pub async fn upload_grades(
    state: web::Data<AppState>,
    mut payload: web::Payload,
    principal: GatewayPrincipal,
) -> Result<HttpResponse, ApiError> {
    principal.require_faculty()?;

    let result = tokio::time::timeout(RPC_UPLOAD_STREAM, async {
        let mut buffer = String::new();
        let mut outcome = UploadOutcome::default();
        let mut course_id: Option<Uuid> = None;
        let mut faculty_id: Option<Uuid> = None;
        let mut metadata_seen = false;
        let mut done = false;

        while let Some(chunk) = payload.next().await {
            let chunk = chunk.map_err(|e| ApiError::InvalidArgument {
                message: format!("malformed upload stream: {e}"),
            })?;
            buffer.push_str(&String::from_utf8_lossy(&chunk));

            while let Some(newline_at) = buffer.find('\n') {
                let line = buffer[..newline_at].trim().to_string();
                buffer.drain(..=newline_at);
                if line.is_empty() {
                    continue;
                }

                let frame: UploadFrame = serde_json::from_str(&line).map_err(|e| {
                    ApiError::InvalidArgument {
                        message: format!("malformed upload frame: {e}"),
                    }
                })?;

                if !metadata_seen {
                    let UploadFrame::Metadata {
                        course_id: cid,
                        faculty_id: fid,
                        is_last,
                    } = frame
                    else {
                        return Err(ApiError::InvalidArgument {
                            message: "first message of an upload stream must be Metadata"
                                .to_string(),
                        });
                    };

                    state
                        .grade_service
                        .authorize_faculty_for_course(cid, fid)
                        .await?;

                    course_id = Some(cid);
                    faculty_id = Some(fid);
                    metadata_seen = true;
                    if is_last {
                        done = true;
                        break;
                    }
                    continue;
                }

                match frame {
                    UploadFrame::Metadata { .. } => {
                        return Err(ApiError::InvalidArgument {
                            message: "Metadata may only appear once, as the first message"
                                .to_string(),
                        });
                    }
                    UploadFrame::Entry {
                        student_id,
                        grade,
                        is_last,
                    } => {
                        state
                            .grade_service
                            .process_entry(
                                course_id.expect("metadata_seen implies course_id is set"),
                                student_id,
                                &grade,
                                faculty_id.expect("metadata_seen implies faculty_id is set"),
                                &mut outcome,
                            )
                            .await;
                        if is_last {
                            done = true;
                        }
                    }
                }
            }

            if done {
                break;
            }
        }

        if !metadata_seen {
            return Err(ApiError::InvalidArgument {
                message: "upload stream closed before Metadata was received".to_string(),
            });
        }

        Ok(outcome)
    })
    .await;

    let outcome = match result {
        Ok(inner) => inner?,
        Err(_) => {
            warn!("grade upload stream exceeded its deadline");
            return Err(ApiError::DeadlineExceeded {
                service: "grade-service".to_string(),
            });
        }
    };

    info!(
        total_processed = outcome.total_processed,
        successful = outcome.successful,
        failed = outcome.failed,
        "grade upload stream completed"
    );

    Ok(HttpResponse::Ok().json(UploadGradesResponse::from(outcome)))
}

#[instrument(skip(state, body, _principal), fields(course_id = %course_id))]
pub async fn publish_grades(
    state: web::Data<AppState>,
    course_id: web::Path<Uuid>,
    body: web::Json<PublishGradesRequest>,
    _principal: GatewayPrincipal,
) -> Result<HttpResponse, ApiError> {
    let course_id = course_id.into_inner();
    let grades_published = state
        .grade_service
        .publish_grades(course_id, body.faculty_id)
        .await?;

    Ok(HttpResponse::Ok().json(PublishGradesResponse { grades_published }))
}

#[instrument(skip(state, query, principal))]
pub async fn get_student_grades(
    state: web::Data<AppState>,
    student_id: web::Path<Uuid>,
    query: web::Query<GradesQuery>,
    principal: GatewayPrincipal,
) -> Result<HttpResponse, ApiError> {
    let student_id = student_id.into_inner();

    if principal.role == shared::auth::principal::PrincipalRole::Student && principal.id != student_id {
        return Err(ApiError::PermissionDenied {
            reason: "students may only view their own grades".to_string(),
        });
    }

    let grades = state
        .grade_service
        .get_student_grades(student_id, query.semester.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(StudentGradesResponse {
        grades: grades.into_iter().map(GradeDto::from).collect(),
    }))
}

#[instrument(skip(state, query, _principal), fields(course_id = %course_id))]
pub async fn get_course_grades(
    state: web::Data<AppState>,
    course_id: web::Path<Uuid>,
    query: web::Query<FacultyQuery>,
    _principal: GatewayPrincipal,
) -> Result<HttpResponse, ApiError> {
    let view = state
        .grade_service
        .get_course_grades(course_id.into_inner(), query.faculty_id)
        .await?;

    Ok(HttpResponse::Ok().json(CourseGradesResponse::from(view)))
}

#[derive(serde::Deserialize)]
pub struct FacultyQuery {
    pub faculty_id: Uuid,
}

#[instrument(skip(state, query, principal))]
pub async fn calculate_gpa(
    state: web::Data<AppState>,
    student_id: web::Path<Uuid>,
    query: web::Query<GradesQuery>,
    principal: GatewayPrincipal,
) -> Result<HttpResponse, ApiError> {
    let student_id = student_id.into_inner();

    if principal.role == shared::auth::principal::PrincipalRole::Student && principal.id != student_id {
        return Err(ApiError::PermissionDenied {
            reason: "students may only view their own GPA".to_string(),
        });
    }

    let report = state
        .grade_service
        .calculate_gpa(student_id, query.semester.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(GpaResponse::from(report)))
}

#[instrument(skip(state, _principal), fields(course_id = %course_id))]
pub async fn get_class_roster(
    state: web::Data<AppState>,
    course_id: web::Path<Uuid>,
    _principal: GatewayPrincipal,
) -> Result<HttpResponse, ApiError> {
    let roster = state.grade_service.get_class_roster(course_id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(RosterResponse {
        roster: roster.into_iter().map(RosterRowDto::from).collect(),
    }))
}

/// Internal surface consumed by `catalog-service`'s `CheckPrerequisites`.
/// Not gated by `GatewayPrincipal`: this is a service-to-service call,
/// not one the gateway forwards.
#[instrument(skip(state, query), fields(student_id = %query.student_id))]
pub async fn internal_passing(
    state: web::Data<AppState>,
    query: web::Query<PassingQuery>,
) -> Result<HttpResponse, ApiError> {
    let course_ids: Vec<Uuid> = query
        .course_ids
        .split(',')
        .filter(|s| !s.is_empty())
        .filter_map(|s| Uuid::parse_str(s.trim()).ok())
        .collect();

    let passing = state
        .grade_service
        .passing_course_ids(query.student_id, &course_ids)
        .await?;

    Ok(HttpResponse::Ok().json(PassingResponse {
        passing_course_ids: passing,
    }))
}
