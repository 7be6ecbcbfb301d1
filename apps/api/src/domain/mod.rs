// Domain layer module exports
// Domain is independent of infrastructure concerns

pub mod rating;
pub mod repositories;
pub mod store;
pub mod user;
