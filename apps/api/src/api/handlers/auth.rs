use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::extract::ApiJson;
use crate::api::middleware::CurrentUser;
use crate::domain::user::UserSummary;
use crate::services::{IssuedCredential, Registration};
use crate::state::AppState;

/// Request body for user registration
///
/// Any `role` sent by the client is ignored.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub address: String,
}

/// Request body for user login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Response from successful registration or login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserSummary,
    /// Where the frontend should send this user
    pub dashboard: &'static str,
}

impl From<IssuedCredential> for AuthResponse {
    fn from(issued: IssuedCredential) -> Self {
        Self {
            dashboard: issued.user.role.dashboard_path(),
            token: issued.token,
            user: issued.user,
        }
    }
}

/// Register a new Normal user
///
/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let issued = state
        .identity()
        .register(Registration {
            name: req.name,
            email: req.email,
            password: req.password,
            address: req.address,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(AuthResponse::from(issued))))
}

/// Login with email and password
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let issued = state
        .identity()
        .authenticate(&req.email, &req.password)
        .await?;

    tracing::info!(user_id = issued.user.id, "user logged in");

    Ok(Json(AuthResponse::from(issued)))
}

/// The authenticated user's own profile
///
/// GET /api/auth/profile
pub async fn profile(CurrentUser(user): CurrentUser) -> Json<UserSummary> {
    Json(user)
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
