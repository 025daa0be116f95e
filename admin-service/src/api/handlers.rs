//! HTTP handlers for the admin service. Every route requires the admin
//! role; the gateway's `(principal_id, principal_role)` forwarding is the
//! only authentication in front of these endpoints.

use actix_web::{web, HttpResponse};
use shared::auth::GatewayPrincipal;
use shared::errors::ApiError;
use shared::validation::validate_request;
use tracing::instrument;
use uuid::Uuid;

use crate::api::dto::{
    CourseDto, CreateUserRequest, CreateUserResponse, ResetPasswordResponse, SetConfigRequest,
    SetEnrollmentPeriodRequest, ToggleEnrollmentRequest, ToggleUserStatusRequest, UpdateCourseRequest,
    UserDto,
};
use crate::AppState;

pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "admin-service",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[instrument(skip(state, body, principal))]
pub async fn create_user(
    state: web::Data<AppState>,
    body: web::Json<CreateUserRequest>,
    principal: GatewayPrincipal,
) -> Result<HttpResponse, ApiError> {
    principal.require_admin()?;
    let body = body.into_inner();
    validate_request(&body)?;

    let created = state.user_service.create_user(body.into()).await?;
    Ok(HttpResponse::Created().json(CreateUserResponse::from(created)))
}

#[instrument(skip(state, body, principal), fields(user_id = %user_id))]
pub async fn toggle_user_status(
    state: web::Data<AppState>,
    user_id: web::Path<Uuid>,
    body: web::Json<ToggleUserStatusRequest>,
    principal: GatewayPrincipal,
) -> Result<HttpResponse, ApiError> {
    principal.require_admin()?;
    let user = state
        .user_service
        .toggle_status(user_id.into_inner(), body.is_active)
        .await?;
    Ok(HttpResponse::Ok().json(UserDto::from(user)))
}

#[instrument(skip(state, principal), fields(user_id = %user_id))]
pub async fn reset_password(
    state: web::Data<AppState>,
    user_id: web::Path<Uuid>,
    principal: GatewayPrincipal,
) -> Result<HttpResponse, ApiError> {
    principal.require_admin()?;
    let temporary_password = state.user_service.reset_password(user_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ResetPasswordResponse { temporary_password }))
}

#[instrument(skip(state, body, principal), fields(course_id = %course_id))]
pub async fn update_course(
    state: web::Data<AppState>,
    course_id: web::Path<Uuid>,
    body: web::Json<UpdateCourseRequest>,
    principal: GatewayPrincipal,
) -> Result<HttpResponse, ApiError> {
    principal.require_admin()?;
    let body = body.into_inner();
    validate_request(&body)?;

    let course = state
        .course_service
        .update_course(course_id.into_inner(), body.into())
        .await?;
    Ok(HttpResponse::Ok().json(CourseDto::from(course)))
}

#[instrument(skip(state, principal), fields(course_id = %course_id))]
pub async fn delete_course(
    state: web::Data<AppState>,
    course_id: web::Path<Uuid>,
    principal: GatewayPrincipal,
) -> Result<HttpResponse, ApiError> {
    principal.require_admin()?;
    state.course_service.delete_course(course_id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[instrument(skip(state, body, principal))]
pub async fn set_config(
    state: web::Data<AppState>,
    body: web::Json<SetConfigRequest>,
    principal: GatewayPrincipal,
) -> Result<HttpResponse, ApiError> {
    principal.require_admin()?;
    state
        .config_service
        .set(principal.id, &body.key, &body.value)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[instrument(skip(state, body, principal))]
pub async fn toggle_enrollment(
    state: web::Data<AppState>,
    body: web::Json<ToggleEnrollmentRequest>,
    principal: GatewayPrincipal,
) -> Result<HttpResponse, ApiError> {
    principal.require_admin()?;
    state
        .config_service
        .toggle_enrollment(principal.id, body.enabled)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[instrument(skip(state, body, principal))]
pub async fn set_enrollment_period(
    state: web::Data<AppState>,
    body: web::Json<SetEnrollmentPeriodRequest>,
    principal: GatewayPrincipal,
) -> Result<HttpResponse, ApiError> {
    principal.require_admin()?;
    state
        .config_service
        .set_enrollment_period(principal.id, &body.opens_at, &body.closes_at)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
