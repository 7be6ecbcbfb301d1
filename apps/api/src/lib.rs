//! Store Ratings API Library
//!
//! Accounts with three roles, stores, and one 1-5 rating per user per
//! store, served over a JSON HTTP API backed by PostgreSQL.

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod shutdown;
pub mod state;
