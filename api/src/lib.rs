//! HTTP facade for the verification service
//!
//! Exposes code generation, code validation and attachment email over
//! actix-web. Request bodies are validated before any domain call and domain
//! errors are mapped to HTTP statuses in [`handlers::error`].

pub mod app;
pub mod dto;
pub mod handlers;
pub mod routes;
pub mod telemetry;

pub use app::{create_app, AppState};
pub use handlers::error::ApiError;
