pub mod config_repository;
pub mod course_repository;
pub mod user_repository;

pub use config_repository::ConfigRepository;
pub use course_repository::CourseRepository;
pub use user_repository::UserRepository;
