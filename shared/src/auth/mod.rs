//! # Identity and Password Hashing
//!
//! This module covers the two authentication concerns that remain inside
//! the platform itself:
//!
//! ```text
//! auth/
//! ├── password.rs  - bcrypt password hashing (admin-service user creation)
//! └── principal.rs - Gateway-supplied identity extractor
//! ```
//!
//! Token minting and validation are **not** implemented here. The platform
//! sits behind a gateway that authenticates the caller and forwards the
//! result as a trusted `(principal_id, role)` tuple over request headers;
//! see [`principal::GatewayPrincipal`]. This module never parses, verifies,
//! or mints a JWT.
//!
//! | Component | Purpose |
//! |-----------|---------|
//! | [`PasswordHasher`] | bcrypt hashing for admin-created user accounts |
//! | [`GatewayPrincipal`] | Actix extractor reading `X-Principal-Id` / `X-Principal-Role` |

pub mod password;
pub mod principal;

pub use password::PasswordHasher;
pub use principal::GatewayPrincipal;
