//! HTTP handlers for the catalog service.

use actix_web::{web, HttpResponse};
use shared::auth::principal::PrincipalRole;
use shared::auth::GatewayPrincipal;
use shared::errors::ApiError;
use shared::validation::validate_request;
use tracing::instrument;
use uuid::Uuid;

use crate::api::dto::{
    CheckPrerequisitesQuery, CheckPrerequisitesResponse, CourseAvailabilityDto, CourseDto,
    InternalAvailabilityDto, InternalCheckPrerequisitesResponse, InternalCourseDto,
    ListCoursesQuery, ListCoursesResponse,
};
use crate::AppState;

pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "catalog-service",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[instrument(skip(state, query, _principal))]
pub async fn list_courses(
    state: web::Data<AppState>,
    query: web::Query<ListCoursesQuery>,
    _principal: GatewayPrincipal,
) -> Result<HttpResponse, ApiError> {
    let query = query.into_inner();
    validate_request(&query)?;

    let (courses, total) = state.catalog_service.list_courses(query.into()).await?;

    Ok(HttpResponse::Ok().json(ListCoursesResponse {
        courses: courses.into_iter().map(CourseDto::from).collect(),
        total,
    }))
}

#[instrument(skip(state, _principal), fields(course_id))]
pub async fn get_course(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    _principal: GatewayPrincipal,
) -> Result<HttpResponse, ApiError> {
    let course_id = path.into_inner();
    tracing::Span::current().record("course_id", tracing::field::display(&course_id));

    let course = state.catalog_service.get_course(course_id).await?;
    Ok(HttpResponse::Ok().json(CourseDto::from(course)))
}

#[instrument(skip(state, _principal), fields(course_id))]
pub async fn get_course_availability(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    _principal: GatewayPrincipal,
) -> Result<HttpResponse, ApiError> {
    let course_id = path.into_inner();
    tracing::Span::current().record("course_id", tracing::field::display(&course_id));

    let availability = state
        .catalog_service
        .get_course_availability(course_id)
        .await?;

    Ok(HttpResponse::Ok().json(CourseAvailabilityDto::from(availability)))
}

/// `CheckPrerequisites`. Students may only check themselves;
/// faculty/admin may pass `?student_id=` to check on a student's behalf
/// (explicit target ids are only honored for privileged callers).
#[instrument(skip(state, query, principal), fields(course_id))]
pub async fn check_prerequisites(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<CheckPrerequisitesQuery>,
    principal: GatewayPrincipal,
) -> Result<HttpResponse, ApiError> {
    let course_id = path.into_inner();
    tracing::Span::current().record("course_id", tracing::field::display(&course_id));

    let student_id = match query.student_id {
        Some(requested) if requested != principal.id => {
            if principal.role == PrincipalRole::Student {
                return Err(ApiError::PermissionDenied {
                    reason: "students may only check their own prerequisites".to_string(),
                });
            }
            requested
        }
        Some(requested) => requested,
        None => principal.id,
    };

    let result = state
        .catalog_service
        .check_prerequisites(student_id, course_id)
        .await?;

    Ok(HttpResponse::Ok().json(CheckPrerequisitesResponse::from(result)))
}

// ---------------------------------------------------------------------------
// Internal surface: service-to-service calls, not forwarded by the gateway.
// No `GatewayPrincipal` extraction — the caller is another service inside
// the trust boundary, not an end user.
// ---------------------------------------------------------------------------

#[instrument(skip(state), fields(course_id = %course_id))]
pub async fn internal_get_course(
    state: web::Data<AppState>,
    course_id: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let course = state.catalog_service.get_course(course_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(InternalCourseDto::from(course)))
}

#[instrument(skip(state), fields(course_id = %course_id))]
pub async fn internal_get_availability(
    state: web::Data<AppState>,
    course_id: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let availability = state
        .catalog_service
        .get_course_availability(course_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(InternalAvailabilityDto::from(availability)))
}

#[instrument(skip(state, query), fields(course_id = %course_id))]
pub async fn internal_check_prerequisites(
    state: web::Data<AppState>,
    course_id: web::Path<Uuid>,
    query: web::Query<CheckPrerequisitesQuery>,
) -> Result<HttpResponse, ApiError> {
    let student_id = query.student_id.ok_or_else(|| ApiError::InvalidArgument {
        message: "student_id is required".to_string(),
    })?;

    let result = state
        .catalog_service
        .check_prerequisites(student_id, course_id.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(InternalCheckPrerequisitesResponse::from(result)))
}
