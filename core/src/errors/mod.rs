//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

// Re-export all error types
pub use types::{ChannelError, StoreError, TemplateError};

use msg_shared::errors::error_codes;
use thiserror::Error;

/// Core domain errors
///
/// Business outcomes such as an expired or wrong code are *statuses*, not
/// errors; only operational failures travel through this type.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Channel(#[from] ChannelError),

    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl DomainError {
    /// Stable machine-readable code used in error responses
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => error_codes::VALIDATION_ERROR,
            DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
            DomainError::Store(_) => error_codes::STORE_UNAVAILABLE,
            DomainError::Channel(err) => err.error_code(),
            DomainError::Template(_) => error_codes::TEMPLATE_ERROR,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
