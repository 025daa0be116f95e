//! Business logic for the catalog service.

pub mod catalog_service;

pub use catalog_service::CatalogService;
