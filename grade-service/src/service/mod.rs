//! Business logic for the grade service.

pub mod grade_service;

pub use grade_service::GradeService;
