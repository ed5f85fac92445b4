//! HTTP adapter: axum router, handlers, and wire-level DTOs.

pub mod controller;
pub mod request;
pub mod response;

pub use controller::{ApiError, AppState, create_router};
