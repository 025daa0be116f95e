//! Route table for the grade service.
//!
//! ```text
//! GET  /health
//! POST /api/v1/grades/courses/{course_id}/upload    - UploadGrades (NDJSON stream)
//! POST /api/v1/grades/courses/{course_id}/publish   - PublishGrades
//! GET  /api/v1/grades/courses/{course_id}           - GetCourseGrades (faculty)
//! GET  /api/v1/grades/courses/{course_id}/roster     - GetClassRoster
//! GET  /api/v1/grades/students/{student_id}         - GetStudentGrades
//! GET  /api/v1/grades/students/{student_id}/gpa      - CalculateGPA
//! GET  /internal/grades/passing                      - passing-grade oracle
//! ```

use actix_web::web;

use super::handlers;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health_check))
        .service(
            web::scope("/api/v1/grades")
                .service(
                    web::scope("/courses/{course_id}")
                        .route("/upload", web::post().to(handlers::upload_grades))
                        .route("/publish", web::post().to(handlers::publish_grades))
                        .route("/roster", web::get().to(handlers::get_class_roster))
                        .route("", web::get().to(handlers::get_course_grades)),
                )
                .service(
                    web::scope("/students/{student_id}")
                        .route("/gpa", web::get().to(handlers::calculate_gpa))
                        .route("", web::get().to(handlers::get_student_grades)),
                ),
        )
        .service(
            web::scope("/internal/grades")
                .route("/passing", web::get().to(handlers::internal_passing)),
        );
}
