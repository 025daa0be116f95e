//! # Gateway-Supplied Identity
//!
//! The platform trusts an upstream gateway to authenticate the caller and
//! forward the result as two headers on every inbound request:
//!
//! ```text
//! X-Principal-Id:   <uuid of the authenticated user>
//! X-Principal-Role: student | faculty | admin
//! ```
//!
//! No service in this workspace parses, verifies, or mints a token. Nothing
//! here should be mistaken for authentication — this extractor reads
//! identity that something else already authenticated. A deployment that
//! exposes these services directly to untrusted clients without a gateway
//! in front of them has no authentication at all.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shared::auth::GatewayPrincipal;
//!
//! async fn add_to_cart(principal: GatewayPrincipal, body: Json<AddCourseDto>) -> ApiResult<...> {
//!     // principal.id, principal.role already validated to be present and well-formed
//! }
//! ```
//!
//! ## Errors
//!
//! - `ApiError::MissingAuth` if either header is absent.
//! - `ApiError::PermissionDenied` if `X-Principal-Role` doesn't match a known role
//!   or `X-Principal-Id` isn't a valid UUID.

use crate::errors::ApiError;
use actix_web::{dev::Payload, Error, FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};
use std::future::Ready;
use uuid::Uuid;

const HEADER_PRINCIPAL_ID: &str = "X-Principal-Id";
const HEADER_PRINCIPAL_ROLE: &str = "X-Principal-Role";

/// The caller's identity and role, as asserted by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatewayPrincipal {
    pub id: Uuid,
    pub role: PrincipalRole,
}

/// Mirrors the `role` discriminant of `RoleProfile`, but carries no
/// profile data — only enough to authorize a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalRole {
    Student,
    Faculty,
    Admin,
}

impl PrincipalRole {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "student" => Some(Self::Student),
            "faculty" => Some(Self::Faculty),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl GatewayPrincipal {
    /// Returns `Ok(())` if this principal is a faculty member or admin,
    /// `Err(PermissionDenied)` otherwise. Used by handlers that accept
    /// either role (e.g. grade upload is faculty-only, but admin override
    /// routes accept only admin).
    pub fn require_faculty(&self) -> Result<(), ApiError> {
        match self.role {
            PrincipalRole::Faculty => Ok(()),
            _ => Err(ApiError::PermissionDenied {
                reason: "faculty role required".to_string(),
            }),
        }
    }

    pub fn require_admin(&self) -> Result<(), ApiError> {
        match self.role {
            PrincipalRole::Admin => Ok(()),
            _ => Err(ApiError::PermissionDenied {
                reason: "admin role required".to_string(),
            }),
        }
    }

    pub fn require_student(&self) -> Result<(), ApiError> {
        match self.role {
            PrincipalRole::Student => Ok(()),
            _ => Err(ApiError::PermissionDenied {
                reason: "student role required".to_string(),
            }),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == PrincipalRole::Admin
    }
}

impl FromRequest for GatewayPrincipal {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        std::future::ready(extract(req).map_err(Into::into))
    }
}

fn extract(req: &HttpRequest) -> Result<GatewayPrincipal, ApiError> {
    let id_header = req
        .headers()
        .get(HEADER_PRINCIPAL_ID)
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::MissingAuth)?;

    let role_header = req
        .headers()
        .get(HEADER_PRINCIPAL_ROLE)
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::MissingAuth)?;

    let id = Uuid::parse_str(id_header).map_err(|_| ApiError::PermissionDenied {
        reason: "malformed principal id".to_string(),
    })?;

    let role = PrincipalRole::parse(role_header).ok_or_else(|| ApiError::PermissionDenied {
        reason: format!("unrecognized principal role: {role_header}"),
    })?;

    Ok(GatewayPrincipal { id, role })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_parse_role_case_insensitive() {
        assert_eq!(PrincipalRole::parse("Student"), Some(PrincipalRole::Student));
        assert_eq!(PrincipalRole::parse("ADMIN"), Some(PrincipalRole::Admin));
        assert_eq!(PrincipalRole::parse("bogus"), None);
    }

    #[test]
    fn test_extract_missing_headers_rejected() {
        let req = TestRequest::default().to_http_request();
        assert!(matches!(extract(&req), Err(ApiError::MissingAuth)));
    }

    #[test]
    fn test_extract_valid_headers() {
        let id = Uuid::new_v4();
        let req = TestRequest::default()
            .insert_header((HEADER_PRINCIPAL_ID, id.to_string()))
            .insert_header((HEADER_PRINCIPAL_ROLE, "faculty"))
            .to_http_request();

        let principal = extract(&req).unwrap();
        assert_eq!(principal.id, id);
        assert_eq!(principal.role, PrincipalRole::Faculty);
    }

    #[test]
    fn test_extract_malformed_role_is_permission_denied() {
        let req = TestRequest::default()
            .insert_header((HEADER_PRINCIPAL_ID, Uuid::new_v4().to_string()))
            .insert_header((HEADER_PRINCIPAL_ROLE, "superuser"))
            .to_http_request();

        assert!(matches!(extract(&req), Err(ApiError::PermissionDenied { .. })));
    }

    #[test]
    fn test_require_admin_rejects_student() {
        let principal = GatewayPrincipal {
            id: Uuid::new_v4(),
            role: PrincipalRole::Student,
        };
        assert!(principal.require_admin().is_err());
    }
}
