use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::api::errors::ApiError;
use crate::domain::user::UserSummary;
use crate::services::authorization::require_admin;
use crate::state::AppState;

/// Bearer-token authentication extractor for protected routes
///
/// Verifies the token and re-reads the user on every request, so the
/// identity a handler sees is always current. It lives only for the request.
///
/// Usage:
/// ```rust,ignore
/// async fn protected_handler(
///     CurrentUser(user): CurrentUser,
/// ) -> Result<String, ApiError> {
///     Ok(format!("Hello user {}", user.id))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserSummary);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Not authorized, no token"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                ApiError::unauthorized("Invalid authorization format. Use: Bearer <token>")
            })?;

        let user = state.identity().verify_credential(token).await?;

        Ok(CurrentUser(user))
    }
}

/// Extractor for administrator-only routes
///
/// Rejects with 401 when unauthenticated and 403 for any other role.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub UserSummary);

#[async_trait]
impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        require_admin(&user)?;

        Ok(RequireAdmin(user))
    }
}
