//! PostgreSQL repositories for the catalog service.

pub mod course_repository;
pub mod prerequisite_repository;

pub use course_repository::CourseRepository;
pub use prerequisite_repository::PrerequisiteRepository;
