use axum::extract::{FromRequest, FromRequestParts};

use super::errors::ApiError;

/// `axum::Json` whose rejections (bad content type, malformed or mistyped
/// body) come back as 400 `{"message": ...}` like every other client error
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Path` with the same `{"message": ...}` rejections
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
