use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::extract::ApiJson;
use crate::api::middleware::{CurrentUser, RequireAdmin};
use crate::domain::user::{Role, UserSummary};
use crate::services::{NewAccount, ServiceError};
use crate::state::AppState;

/// Request body for creating a user as an administrator
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub address: String,
    pub role: Option<Role>,
    pub store_id: Option<i64>,
}

/// Request body for changing one's own password
///
/// A `userId` in the body is ignored; the token decides whose password
/// changes.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// List all users
///
/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    let users = state.administration().list_users().await?;

    Ok(Json(users))
}

/// Create a user with any role
///
/// POST /api/users
pub async fn add_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiJson(req): ApiJson<AddUserRequest>,
) -> Result<(StatusCode, Json<UserSummary>), ApiError> {
    let role = req
        .role
        .ok_or_else(|| ApiError::bad_request("role is required"))?;

    let user = state
        .administration()
        .add_user(NewAccount {
            name: req.name,
            email: req.email,
            password: req.password,
            address: req.address,
            role,
            store_id: req.store_id,
        })
        .await?;

    tracing::debug!(admin_id = admin.id, user_id = user.id, "admin created user");

    Ok((StatusCode::CREATED, Json(user)))
}

/// Change the caller's password
///
/// PUT /api/users/password
pub async fn change_password(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiJson(req): ApiJson<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .administration()
        .change_password(user.id, &req.current_password, &req.new_password)
        .await
        .map_err(|e| match e {
            // A wrong current password is a form error, not a lost session
            ServiceError::InvalidCredentials => ApiError::bad_request("Invalid current password"),
            other => ApiError::from(other),
        })?;

    Ok(Json(MessageResponse {
        message: "Password updated successfully".to_string(),
    }))
}
