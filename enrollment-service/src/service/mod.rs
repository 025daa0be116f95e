pub mod cart_service;
pub mod enrollment_service;
pub mod override_service;

pub use cart_service::CartService;
pub use enrollment_service::EnrollmentService;
pub use override_service::OverrideService;
