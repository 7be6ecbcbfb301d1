use axum::{extract::State, http::StatusCode, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::extract::{ApiJson, ApiPath};
use crate::api::middleware::{CurrentUser, RequireAdmin};
use crate::domain::rating::{Rating, StoreRatingEntry, UpsertOutcome};
use crate::services::StoreRatings;
use crate::state::AppState;

/// Request body for submitting a rating
///
/// Both fields are optional here so that a missing one is reported as a
/// validation error by the rating service.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRatingRequest {
    pub store_id: Option<i64>,
    pub value: Option<i64>,
}

/// Ratings on one store plus their mean
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreRatingsResponse {
    pub ratings: Vec<StoreRatingEntry>,
    /// `null` when the store has no ratings
    pub average_rating: Option<Decimal>,
}

impl From<StoreRatings> for StoreRatingsResponse {
    fn from(view: StoreRatings) -> Self {
        Self {
            ratings: view.ratings,
            average_rating: view.average_rating,
        }
    }
}

/// List every rating
///
/// GET /api/ratings
pub async fn all_ratings(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<Rating>>, ApiError> {
    let ratings = state.rating_service().all_ratings().await?;

    Ok(Json(ratings))
}

/// List the caller's own ratings
///
/// GET /api/ratings/user
pub async fn user_ratings(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Rating>>, ApiError> {
    let ratings = state.rating_service().user_ratings(user.id).await?;

    Ok(Json(ratings))
}

/// Ratings on a store with rater names and the average
///
/// GET /api/ratings/store/:id
pub async fn store_ratings(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    ApiPath(store_id): ApiPath<i64>,
) -> Result<Json<StoreRatingsResponse>, ApiError> {
    let view = state.rating_service().store_ratings(store_id).await?;

    Ok(Json(StoreRatingsResponse::from(view)))
}

/// Create or update the caller's rating of a store
///
/// POST /api/ratings
///
/// Responds 201 when the rating is new and 200 when an existing one was
/// overwritten.
pub async fn submit_rating(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiJson(req): ApiJson<SubmitRatingRequest>,
) -> Result<(StatusCode, Json<Rating>), ApiError> {
    let (rating, outcome) = state
        .rating_service()
        .submit(user.id, req.store_id, req.value)
        .await?;

    let status = match outcome {
        UpsertOutcome::Created => StatusCode::CREATED,
        UpsertOutcome::Updated => StatusCode::OK,
    };

    Ok((status, Json(rating)))
}
