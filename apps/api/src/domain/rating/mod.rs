// Rating domain module
// Contains the rating entity, its value object, and the store average

#![allow(clippy::module_inception)]

pub mod average;
pub mod rating;

pub use average::average;
pub use rating::{Rating, RatingValue, StoreRatingEntry, UpsertOutcome};
