//! Domain entities for the catalog service: `Course` and `Prerequisite`.
//!
//! These map directly to the `courses` and `prerequisites` tables. The
//! catalog service owns both tables; it is the only writer of `courses`
//! outside of the admin service's management operations.

pub mod entities;

pub use entities::{Course, Prerequisite};
