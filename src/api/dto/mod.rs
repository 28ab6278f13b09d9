//! API data transfer objects.

pub mod auth;

pub use auth::{LoginRequest, LoginResponse, UserProfile};
