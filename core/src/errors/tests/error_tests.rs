//! Unit tests for domain error types

use msg_shared::errors::error_codes;

use crate::errors::{ChannelError, DomainError, StoreError, TemplateError};

#[test]
fn test_store_error_bridges_into_domain_error() {
    let error: DomainError = StoreError::unavailable("connection refused").into();
    assert!(matches!(error, DomainError::Store(_)));
    assert_eq!(error.error_code(), error_codes::STORE_UNAVAILABLE);
    assert!(error.to_string().contains("connection refused"));
}

#[test]
fn test_channel_error_codes() {
    let missing: DomainError = ChannelError::missing_config("email_provider").into();
    assert_eq!(missing.error_code(), error_codes::CONFIG_ERROR);

    let unsupported: DomainError = ChannelError::UnsupportedProvider {
        provider: "SENDGRID".to_string(),
    }
    .into();
    assert_eq!(unsupported.error_code(), error_codes::CONFIG_ERROR);
    assert!(unsupported.to_string().contains("SENDGRID"));

    let delivery: DomainError = ChannelError::delivery("postmark", "HTTP 500").into();
    assert_eq!(delivery.error_code(), error_codes::DELIVERY_FAILED);
}

#[test]
fn test_template_error_message() {
    let error: DomainError = TemplateError::Syntax {
        position: 4,
        message: "unclosed action".to_string(),
    }
    .into();
    assert_eq!(error.error_code(), error_codes::TEMPLATE_ERROR);
    assert!(error.to_string().contains("unclosed action"));
}
