//! HTTP handlers for the enrollment service.

use actix_web::{web, HttpResponse};
use shared::auth::GatewayPrincipal;
use shared::errors::ApiError;
use tracing::instrument;
use uuid::Uuid;

use crate::api::dto::{
    AddToCartRequest, CartResponse, CheckConflictsRequest, CheckConflictsResponse, DropRequest,
    EnrollAllResponse, EnrollmentDto, LookupQuery, LookupResponse, OverrideRequest,
    RosterEntryDto, RosterListResponse, RosterQuery,
};
use crate::AppState;

pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "enrollment-service",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[instrument(skip(state, principal))]
pub async fn get_cart(
    state: web::Data<AppState>,
    principal: GatewayPrincipal,
) -> Result<HttpResponse, ApiError> {
    principal.require_student()?;
    let cart = state.cart_service.get_cart(principal.id).await?;
    Ok(HttpResponse::Ok().json(CartResponse::from(cart)))
}

#[instrument(skip(state, body, principal))]
pub async fn add_to_cart(
    state: web::Data<AppState>,
    body: web::Json<AddToCartRequest>,
    principal: GatewayPrincipal,
) -> Result<HttpResponse, ApiError> {
    principal.require_student()?;
    let cart = state
        .cart_service
        .add_to_cart(principal.id, body.course_id)
        .await?;
    Ok(HttpResponse::Ok().json(CartResponse::from(cart)))
}

#[instrument(skip(state, principal), fields(course_id = %course_id))]
pub async fn remove_from_cart(
    state: web::Data<AppState>,
    course_id: web::Path<Uuid>,
    principal: GatewayPrincipal,
) -> Result<HttpResponse, ApiError> {
    principal.require_student()?;
    let cart = state
        .cart_service
        .remove_from_cart(principal.id, course_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(CartResponse::from(cart)))
}

#[instrument(skip(state, principal))]
pub async fn clear_cart(
    state: web::Data<AppState>,
    principal: GatewayPrincipal,
) -> Result<HttpResponse, ApiError> {
    principal.require_student()?;
    let cart = state.cart_service.clear_cart(principal.id).await?;
    Ok(HttpResponse::Ok().json(CartResponse::from(cart)))
}

/// `CheckConflicts`: side-effect-free, independent of the
/// caller's stored cart.
#[instrument(skip(state, body, principal))]
pub async fn check_conflicts(
    state: web::Data<AppState>,
    body: web::Json<CheckConflictsRequest>,
    principal: GatewayPrincipal,
) -> Result<HttpResponse, ApiError> {
    principal.require_student()?;
    let conflicts = state
        .cart_service
        .check_conflicts(principal.id, &body.course_ids)
        .await?;
    Ok(HttpResponse::Ok().json(CheckConflictsResponse {
        conflicts: conflicts.into_iter().map(Into::into).collect(),
    }))
}

/// `EnrollAll`.
#[instrument(skip(state, principal))]
pub async fn enroll_all(
    state: web::Data<AppState>,
    principal: GatewayPrincipal,
) -> Result<HttpResponse, ApiError> {
    principal.require_student()?;
    let outcome = state
        .enrollment_service
        .enroll_all(&state.cart_service, principal.id)
        .await?;
    Ok(HttpResponse::Ok().json(EnrollAllResponse::from(outcome)))
}

/// `Drop`.
#[instrument(skip(state, body, principal))]
pub async fn drop_course(
    state: web::Data<AppState>,
    body: web::Json<DropRequest>,
    principal: GatewayPrincipal,
) -> Result<HttpResponse, ApiError> {
    principal.require_student()?;
    let enrollment = state
        .enrollment_service
        .drop_course(principal.id, body.course_id)
        .await?;
    Ok(HttpResponse::Ok().json(EnrollmentDto::from(enrollment)))
}

#[instrument(skip(state, principal))]
pub async fn list_my_enrollments(
    state: web::Data<AppState>,
    principal: GatewayPrincipal,
) -> Result<HttpResponse, ApiError> {
    principal.require_student()?;
    let enrollments = state.enrollment_repository.list_by_student(principal.id).await?;
    Ok(HttpResponse::Ok().json(
        enrollments
            .into_iter()
            .map(EnrollmentDto::from)
            .collect::<Vec<_>>(),
    ))
}

/// `OverrideEnrollment`: admin-only.
#[instrument(skip(state, body, principal))]
pub async fn override_enrollment(
    state: web::Data<AppState>,
    body: web::Json<OverrideRequest>,
    principal: GatewayPrincipal,
) -> Result<HttpResponse, ApiError> {
    principal.require_admin()?;
    let body = body.into_inner();
    let enrollment = state
        .override_service
        .override_enrollment(
            principal.id,
            body.student_id,
            body.course_id,
            body.action,
            &body.reason,
        )
        .await?;
    Ok(HttpResponse::Ok().json(EnrollmentDto::from(enrollment)))
}

// ---------------------------------------------------------------------------
// Internal surface: consumed by `grade-service`.
// Not gated by `GatewayPrincipal` — service-to-service, not gateway-forwarded.
// ---------------------------------------------------------------------------

#[instrument(skip(state, query))]
pub async fn internal_lookup(
    state: web::Data<AppState>,
    query: web::Query<LookupQuery>,
) -> Result<HttpResponse, ApiError> {
    let enrollment = state
        .enrollment_repository
        .find_enrolled_or_completed(query.student_id, query.course_id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: format!("enrollment for student:{} course:{}", query.student_id, query.course_id),
        })?;

    Ok(HttpResponse::Ok().json(LookupResponse {
        enrollment_id: enrollment.id,
        status: enrollment.status,
    }))
}

#[instrument(skip(state, query))]
pub async fn internal_roster(
    state: web::Data<AppState>,
    query: web::Query<RosterQuery>,
) -> Result<HttpResponse, ApiError> {
    let enrollments = state
        .enrollment_repository
        .list_active_for_course(query.course_id)
        .await?;

    Ok(HttpResponse::Ok().json(RosterListResponse {
        roster: enrollments
            .into_iter()
            .map(|e| RosterEntryDto {
                enrollment_id: e.id,
                student_id: e.student_id,
                enrolled_at: e.enrolled_at,
            })
            .collect(),
    }))
}
