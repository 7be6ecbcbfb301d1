// HTTP handlers, one module per resource

pub mod auth;
pub mod ratings;
pub mod stores;
pub mod users;
