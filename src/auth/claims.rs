//! Caller claims carried in request headers.
//!
//! There is no token verification: an upstream gateway is expected to set
//! these headers after authenticating the caller.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::error::AppError;

pub const USER_ROLE_HEADER: &str = "x-user-role";
pub const USER_BUSINESS_HEADER: &str = "x-user-business";
pub const USER_ID_HEADER: &str = "x-user-id";

/// Raw header value, `None` when absent or not visible ASCII.
pub fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn header_uuid(headers: &HeaderMap, name: &str, display: &str) -> Result<Uuid, AppError> {
    header_str(headers, name)
        .and_then(|v| Uuid::parse_str(v.trim()).ok())
        .ok_or_else(|| AppError::BadRequest(format!("invalid {display} header")))
}

/// Tenant the caller claims to act for (`X-User-Business`).
#[derive(Debug, Clone, Copy)]
pub struct BusinessClaim(pub Uuid);

impl<S: Send + Sync> FromRequestParts<S> for BusinessClaim {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        header_uuid(&parts.headers, USER_BUSINESS_HEADER, "X-User-Business").map(BusinessClaim)
    }
}

/// Identity the caller claims (`X-User-Id`).
#[derive(Debug, Clone, Copy)]
pub struct IdentityClaim(pub Uuid);

impl<S: Send + Sync> FromRequestParts<S> for IdentityClaim {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        header_uuid(&parts.headers, USER_ID_HEADER, "X-User-Id").map(IdentityClaim)
    }
}
