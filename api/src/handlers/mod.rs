//! Error handling for the HTTP layer

pub mod error;

pub use error::ApiError;
