use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{auth, ratings, stores, users};
use crate::state::AppState;

/// Build the full HTTP router over the given state
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(auth::health_check))
        // Auth routes
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/profile", get(auth::profile))
        // User administration
        .route("/api/users", get(users::list_users).post(users::add_user))
        .route("/api/users/password", put(users::change_password))
        // Stores
        .route("/api/stores", get(stores::list_stores).post(stores::add_store))
        // Ratings
        .route(
            "/api/ratings",
            get(ratings::all_ratings).post(ratings::submit_rating),
        )
        .route("/api/ratings/user", get(ratings::user_ratings))
        .route("/api/ratings/store/:id", get(ratings::store_ratings))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Shared state
        .with_state(state)
}
