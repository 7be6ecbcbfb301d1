// Request extractors guarding protected routes

pub mod auth;

pub use auth::{CurrentUser, RequireAdmin};
