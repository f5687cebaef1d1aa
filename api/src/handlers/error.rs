//! Mapping from domain errors to HTTP responses
//!
//! Policy outcomes (expired, wrong code, cooldown) never reach this module;
//! they are answered with 200 and a status body. Only operational failures
//! are turned into error statuses here.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;
use validator::ValidationErrors;

use msg_core::errors::{ChannelError, DomainError};
use msg_shared::{error_codes, ErrorResponse};

#[derive(Debug, Error)]
pub enum ApiError {
    /// Body could not be parsed
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Body parsed but failed its validation rules
    #[error("Invalid request data")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => error_codes::BAD_REQUEST,
            ApiError::Validation(_) => error_codes::VALIDATION_ERROR,
            ApiError::Domain(err) => err.error_code(),
        }
    }

    /// Message shown to the caller; server-side failures stay generic
    fn public_message(&self) -> String {
        match self {
            ApiError::Domain(DomainError::Store(_)) => {
                "Verification code store is temporarily unavailable".to_string()
            }
            ApiError::Domain(DomainError::Internal { .. }) => {
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(err) => match err {
                DomainError::Validation { .. } | DomainError::Template(_) => {
                    StatusCode::BAD_REQUEST
                }
                DomainError::Channel(ChannelError::Delivery { .. }) => StatusCode::BAD_GATEWAY,
                DomainError::Channel(_) => StatusCode::BAD_REQUEST,
                DomainError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
                DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "Request failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let mut body = ErrorResponse::new(self.error_code(), self.public_message());
        if let ApiError::Validation(errors) = self {
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                body = body.add_detail(field, messages);
            }
        }

        HttpResponse::build(status).json(body)
    }
}
