use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::auth::claims::{USER_ROLE_HEADER, header_str};
use crate::error::AppError;
use crate::models::Role;

/// Short-circuits with `403` unless `X-User-Role` is exactly the required role token.
///
/// Mount with `axum::middleware::from_fn_with_state(Role::Admin, require_role)`.
pub async fn require_role(State(required): State<Role>, req: Request, next: Next) -> Response {
    if header_str(req.headers(), USER_ROLE_HEADER) != Some(required.as_str()) {
        return AppError::Forbidden(format!("{required} role required")).into_response();
    }
    next.run(req).await
}
