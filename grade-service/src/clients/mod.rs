//! Outbound HTTP clients to sibling services.

pub mod catalog_client;
pub mod enrollment_client;

pub use catalog_client::CatalogClient;
pub use enrollment_client::EnrollmentClient;
