//! Route table for the catalog service.
//!
//! ```text
//! GET /health
//! GET /api/v1/courses                      - ListCourses
//! GET /api/v1/courses/{id}                  - GetCourse
//! GET /api/v1/courses/{id}/availability     - GetCourseAvailability
//! GET /api/v1/courses/{id}/prerequisites    - CheckPrerequisites
//! GET /internal/courses/{id}                - course facts (service-to-service)
//! GET /internal/courses/{id}/availability   - availability hint (service-to-service)
//! GET /internal/courses/{id}/prerequisites  - prerequisite check (service-to-service)
//! ```

use actix_web::web;

use super::handlers;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health_check))
        .service(
            web::scope("/api/v1/courses")
                .route("", web::get().to(handlers::list_courses))
                .route("/{id}", web::get().to(handlers::get_course))
                .route(
                    "/{id}/availability",
                    web::get().to(handlers::get_course_availability),
                )
                .route(
                    "/{id}/prerequisites",
                    web::get().to(handlers::check_prerequisites),
                ),
        )
        .service(
            web::scope("/internal/courses").service(
                web::scope("/{id}")
                    .route("", web::get().to(handlers::internal_get_course))
                    .route(
                        "/availability",
                        web::get().to(handlers::internal_get_availability),
                    )
                    .route(
                        "/prerequisites",
                        web::get().to(handlers::internal_check_prerequisites),
                    ),
            ),
        );
}
