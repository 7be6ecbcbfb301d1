// User domain module
// Contains the user account entity and its value objects

#![allow(clippy::module_inception)]

pub mod user;
pub mod value_objects;

pub use user::{NewUser, User, UserSummary};
pub use value_objects::{Email, Role};
