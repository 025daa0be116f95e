//! Outbound HTTP clients to sibling services.

pub mod grade_client;

pub use grade_client::GradeClient;
