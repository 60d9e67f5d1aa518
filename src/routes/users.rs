use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use uuid::Uuid;

use crate::auth::claims::{USER_BUSINESS_HEADER, header_str};
use crate::auth::{BusinessClaim, IdentityClaim};
use crate::error::AppError;
use crate::extract::{AppJson, AppPath};
use crate::models::User;
use crate::state::SharedState;

pub async fn create(
    BusinessClaim(business_id): BusinessClaim,
    State(state): State<SharedState>,
    AppJson(user): AppJson<User>,
) -> Result<(StatusCode, Json<User>), AppError> {
    if user.business_id != business_id {
        return Err(AppError::Forbidden(
            "users must belong to the same business".to_string(),
        ));
    }

    let user = state.users.create(&user).await?;
    tracing::info!("Created user {} in business {}", user.id, user.business_id);

    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn delete(
    AppPath(user_id): AppPath<Uuid>,
    BusinessClaim(business_id): BusinessClaim,
    State(state): State<SharedState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let user = state.users.get_by_id(user_id).await?;

    if user.business_id != business_id {
        return Err(AppError::Forbidden(
            "cannot delete user from a different business".to_string(),
        ));
    }

    state.users.delete(user_id).await?;
    tracing::info!("Deleted user {user_id} from business {business_id}");

    Ok(Json(serde_json::json!({ "message": "user was deleted" })))
}

/// Replaces the caller's own record. `business_id` in the payload is ignored.
///
/// Besides the `X-User-Id` claim, the `{user_id}` path segment must parse and
/// name the same user as the claim and the payload; otherwise `400` / `403`.
pub async fn update(
    AppPath(user_id): AppPath<Uuid>,
    IdentityClaim(caller_id): IdentityClaim,
    State(state): State<SharedState>,
    AppJson(user): AppJson<User>,
) -> Result<Json<User>, AppError> {
    if user.id != caller_id || user_id != caller_id {
        return Err(AppError::Forbidden("id mismatch".to_string()));
    }

    let user = state.users.update(&user).await?;
    tracing::info!("Updated user {}", user.id);

    Ok(Json(user))
}

pub async fn get(
    AppPath(user_id): AppPath<Uuid>,
    State(state): State<SharedState>,
) -> Result<Json<User>, AppError> {
    let user = state.users.get_by_id(user_id).await?;

    if user.is_admin() {
        return Err(AppError::Forbidden(
            "access to admin details is restricted".to_string(),
        ));
    }

    Ok(Json(user))
}

pub async fn list(
    AppPath(raw_business_id): AppPath<String>,
    headers: HeaderMap,
    State(state): State<SharedState>,
) -> Result<Json<Vec<User>>, AppError> {
    // Compared as text before parsing: a missing header is a mismatch, not a bad request.
    if header_str(&headers, USER_BUSINESS_HEADER) != Some(raw_business_id.as_str()) {
        return Err(AppError::Forbidden("business ID mismatch".to_string()));
    }

    let business_id = Uuid::parse_str(&raw_business_id)
        .map_err(|_| AppError::BadRequest("invalid business id".to_string()))?;

    let users = state.users.list_for_business(business_id).await?;
    Ok(Json(users))
}
