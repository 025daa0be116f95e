//! PostgreSQL repositories for the grade service.

pub mod grade_repository;
pub mod user_repository;

pub use grade_repository::{CourseSnapshot, GradeRepository};
pub use user_repository::{UserRepository, UserRole, UserSummary};
