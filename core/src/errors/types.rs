//! Error types for the collaborators of the verification lifecycle

use msg_shared::errors::error_codes;
use thiserror::Error;

/// Code store failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Code store unavailable: {message}")]
    Unavailable { message: String },
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        StoreError::Unavailable {
            message: message.into(),
        }
    }
}

/// Channel resolution and delivery failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    #[error("Missing channel configuration: {field}")]
    MissingConfig { field: String },

    #[error("Unsupported provider: {provider}")]
    UnsupportedProvider { provider: String },

    #[error("Delivery through {provider} failed: {message}")]
    Delivery { provider: String, message: String },

    #[error("{provider} does not support {operation}")]
    UnsupportedOperation { provider: String, operation: String },
}

impl ChannelError {
    pub fn missing_config(field: impl Into<String>) -> Self {
        ChannelError::MissingConfig {
            field: field.into(),
        }
    }

    pub fn delivery(provider: impl Into<String>, message: impl Into<String>) -> Self {
        ChannelError::Delivery {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Configuration problems are caller errors; delivery problems are upstream errors
    pub fn error_code(&self) -> &'static str {
        match self {
            ChannelError::MissingConfig { .. }
            | ChannelError::UnsupportedProvider { .. }
            | ChannelError::UnsupportedOperation { .. } => error_codes::CONFIG_ERROR,
            ChannelError::Delivery { .. } => error_codes::DELIVERY_FAILED,
        }
    }
}

/// Template parse and render failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Template syntax error at offset {position}: {message}")]
    Syntax { position: usize, message: String },

    #[error("Template execution error: {message}")]
    Execution { message: String },
}
