pub mod cart_repository;
pub mod config_repository;
pub mod course_repository;
pub mod enrollment_repository;

pub use cart_repository::CartRepository;
pub use config_repository::ConfigRepository;
pub use course_repository::CourseRepository;
pub use enrollment_repository::EnrollmentRepository;
