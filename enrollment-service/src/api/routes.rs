//! Route table for the enrollment service.
//!
//! ```text
//! GET    /health
//! GET    /api/v1/enrollments/cart                  - GetCart
//! POST   /api/v1/enrollments/cart                  - AddToCart
//! DELETE /api/v1/enrollments/cart                   - ClearCart
//! DELETE /api/v1/enrollments/cart/{course_id}       - RemoveFromCart
//! POST   /api/v1/enrollments/cart/check-conflicts   - CheckConflicts
//! POST   /api/v1/enrollments/enroll-all             - EnrollAll
//! POST   /api/v1/enrollments/drop                   - Drop
//! GET    /api/v1/enrollments                        - list the caller's own enrollments
//! POST   /api/v1/enrollments/override               - OverrideEnrollment (admin)
//! GET    /internal/enrollments/lookup               - enrollment lookup oracle
//! GET    /internal/enrollments/roster               - active roster for a course
//! ```

use actix_web::web;

use super::handlers;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health_check))
        .service(
            web::scope("/api/v1/enrollments")
                .service(
                    web::scope("/cart")
                        .route("", web::get().to(handlers::get_cart))
                        .route("", web::post().to(handlers::add_to_cart))
                        .route("", web::delete().to(handlers::clear_cart))
                        .route("/check-conflicts", web::post().to(handlers::check_conflicts))
                        .route("/{course_id}", web::delete().to(handlers::remove_from_cart)),
                )
                .route("/enroll-all", web::post().to(handlers::enroll_all))
                .route("/drop", web::post().to(handlers::drop_course))
                .route("/override", web::post().to(handlers::override_enrollment))
                .route("", web::get().to(handlers::list_my_enrollments)),
        )
        .service(
            web::scope("/internal/enrollments")
                .route("/lookup", web::get().to(handlers::internal_lookup))
                .route("/roster", web::get().to(handlers::internal_roster)),
        );
}
