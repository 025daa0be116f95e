//! Route table for the admin service.
//!
//! ```text
//! GET    /health
//! POST   /api/v1/admin/users                            - CreateUser
//! PATCH  /api/v1/admin/users/{user_id}/status            - ToggleUserStatus
//! POST   /api/v1/admin/users/{user_id}/reset-password    - ResetPassword
//! PATCH  /api/v1/admin/courses/{course_id}               - UpdateCourse
//! DELETE /api/v1/admin/courses/{course_id}               - DeleteCourse
//! PUT    /api/v1/admin/config                            - generic upsert
//! POST   /api/v1/admin/config/enrollment-toggle          - ToggleEnrollment
//! POST   /api/v1/admin/config/enrollment-period          - SetEnrollmentPeriod
//! ```

use actix_web::web;

use super::handlers;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health_check)).service(
        web::scope("/api/v1/admin")
            .service(
                web::scope("/users")
                    .route("", web::post().to(handlers::create_user))
                    .route("/{user_id}/status", web::patch().to(handlers::toggle_user_status))
                    .route(
                        "/{user_id}/reset-password",
                        web::post().to(handlers::reset_password),
                    ),
            )
            .service(
                web::scope("/courses").route(
                    "/{course_id}",
                    web::patch().to(handlers::update_course),
                ).route(
                    "/{course_id}",
                    web::delete().to(handlers::delete_course),
                ),
            )
            .service(
                web::scope("/config")
                    .route("", web::put().to(handlers::set_config))
                    .route("/enrollment-toggle", web::post().to(handlers::toggle_enrollment))
                    .route(
                        "/enrollment-period",
                        web::post().to(handlers::set_enrollment_period),
                    ),
            ),
    );
}
