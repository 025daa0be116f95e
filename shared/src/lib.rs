//! # Enrollment Platform - Shared Library
//!
//! Core shared functionality for the catalog, grade, enrollment, and admin
//! services. Provides common configuration, error handling, the database
//! pool, structured logging, and request validation that every service
//! builds on.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Microservices                           │
//! │  ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌────────┐           │
//! │  │ Catalog │ │  Grade  │ │Enrollment│ │ Admin  │           │
//! │  └────┬────┘ └────┬────┘ └────┬─────┘ └───┬────┘           │
//! │       │           │           │           │                 │
//! │       └───────────┴───────────┴───────────┘                 │
//! │                       │                                     │
//! │              ┌────────▼────────┐                            │
//! │              │  shared crate   │ ◄── You are here           │
//! │              └─────────────────┘                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose | Key Types |
//! |--------|---------|-----------|
//! | [`config`] | Environment-based configuration | [`AppConfig`] |
//! | [`errors`] | Standardized error handling | [`ApiError`], [`ApiResult`] |
//! | [`auth`] | Password hashing, gateway identity extraction | [`PasswordHasher`](auth::password::PasswordHasher), [`GatewayPrincipal`](auth::principal::GatewayPrincipal) |
//! | [`database`] | PostgreSQL connection pool + transaction helpers | [`create_pool`](database::create_pool) |
//! | [`tracing_config`] | Structured logging setup | [`init_tracing`](tracing_config::init_tracing) |
//! | [`validation`] | Request validation helpers | Custom validators |
//! | [`schedule`] | Course schedule parsing and overlap detection | [`Schedule`](schedule::Schedule) |
//! | [`deadlines`] | Named per-call deadlines | [`RPC_DEFAULT`](deadlines::RPC_DEFAULT) |
//! | [`audit`] | Append-only audit log, written inside the caller's transaction | [`audit::AuditLogEntry`] |
//!
//! ## Design Decisions
//!
//! 1. **Single source of truth**: shared types live here to prevent drift
//!    across services that all talk to the same Postgres schema.
//! 2. **No application-level locks**: mutual exclusion is always delegated to
//!    a `sqlx::Transaction`; see [`database::with_transaction`].
//! 3. **Security first**: password hashing follows OWASP guidance; identity
//!    is never trusted from the request body, only from gateway headers.
//! 4. **Observable by default**: structured logging built in everywhere.

pub mod audit;
pub mod auth;
pub mod config;
pub mod database;
pub mod deadlines;
pub mod errors;
pub mod schedule;
pub mod tracing_config;
pub mod validation;

pub use config::AppConfig;
pub use errors::{ApiError, ApiResult};
