use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::api::extract::ApiJson;
use crate::api::middleware::{CurrentUser, RequireAdmin};
use crate::domain::store::{Store, StoreWithRating};
use crate::services::NewStoreRequest;
use crate::state::AppState;

/// Request body for creating a store
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddStoreRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    pub owner_id: Option<i64>,
}

/// List every store with its current average rating
///
/// GET /api/stores
pub async fn list_stores(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
) -> Result<Json<Vec<StoreWithRating>>, ApiError> {
    let stores = state.rating_service().list_stores().await?;

    Ok(Json(stores))
}

/// Create a store
///
/// POST /api/stores
pub async fn add_store(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ApiJson(req): ApiJson<AddStoreRequest>,
) -> Result<(StatusCode, Json<Store>), ApiError> {
    let store = state
        .administration()
        .add_store(NewStoreRequest {
            name: req.name,
            email: req.email,
            address: req.address,
            owner_id: req.owner_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(store)))
}
