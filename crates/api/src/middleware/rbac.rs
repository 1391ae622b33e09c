//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose claims do
//! not meet the requirement, enforcing authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use movies_core::error::CoreError;
use movies_core::roles::{API_KEY_HEADER, SERVICE_USER_ID};

use super::auth::AuthUser;
use crate::auth::api_key::verify_api_key;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` claim, or an `x-api-key` header matching the
/// configured admin key. Rejects with 401/403 otherwise.
///
/// Requests authenticated by API key run as the fixed service user.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(key) = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
        {
            if verify_api_key(key, &state.config.api_key_hash) {
                return Ok(RequireAdmin(AuthUser {
                    user_id: SERVICE_USER_ID,
                    is_admin: true,
                    is_trusted_member: false,
                }));
            }
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid API key".into(),
            )));
        }

        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires the `trusted_member` or `admin` claim. Rejects with 403 otherwise.
pub struct RequireTrustedMember(pub AuthUser);

impl FromRequestParts<AppState> for RequireTrustedMember {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin && !user.is_trusted_member {
            return Err(AppError::Core(CoreError::Forbidden(
                "Trusted member or Admin role required".into(),
            )));
        }
        Ok(RequireTrustedMember(user))
    }
}

/// Requires any authenticated user.
///
/// Functionally equivalent to [`AuthUser`] but named explicitly for route
/// definitions where "this route requires authentication" should read as such.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}
