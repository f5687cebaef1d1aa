//! Request and outcome types for the verification service

use serde::Serialize;

use crate::domain::value_objects::{Attachment, EmailProviderConfig, Identifier, Purpose};

/// Outcome of a generate call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GenerateStatus {
    /// Code stored and sent
    Done,
    /// Previous code issued within the cooldown window
    TooFrequent,
}

impl GenerateStatus {
    pub fn code(&self) -> i32 {
        match self {
            GenerateStatus::Done => 0,
            GenerateStatus::TooFrequent => 1102,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            GenerateStatus::Done => "Done",
            GenerateStatus::TooFrequent => "too frequently sending code",
        }
    }
}

/// Outcome of a validate call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValidateStatus {
    Valid,
    /// No live record for the identifier
    Expired,
    /// Wrong code, attempt counted
    Invalid,
    /// Attempts exhausted, record dropped
    MaximumAttempts,
}

impl ValidateStatus {
    pub fn code(&self) -> i32 {
        match self {
            ValidateStatus::Valid => 0,
            ValidateStatus::Expired => 1100,
            ValidateStatus::Invalid => 1101,
            ValidateStatus::MaximumAttempts => 1104,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ValidateStatus::Valid => "Verified",
            ValidateStatus::Expired => "expired verification code",
            ValidateStatus::Invalid => "wrong verification code",
            ValidateStatus::MaximumAttempts => "maximum attempts on verification code",
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidateStatus::Valid)
    }
}

/// Where the message body comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageSource {
    /// Caller-supplied template; `{{.Code}}` is replaced by the code
    Template(String),
    /// Built-in message for the purpose
    Purpose(Purpose),
}

impl MessageSource {
    /// A non-empty template takes precedence over the purpose
    pub fn from_parts(template: Option<String>, purpose: Purpose) -> Self {
        match template.filter(|t| !t.is_empty()) {
            Some(template) => MessageSource::Template(template),
            None => MessageSource::Purpose(purpose),
        }
    }
}

/// Input of a generate call
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub identifier: Identifier,
    pub message: MessageSource,
    pub subject: Option<String>,
    pub email_provider: Option<EmailProviderConfig>,
}

impl GenerateRequest {
    pub fn new(identifier: Identifier, message: MessageSource) -> Self {
        Self {
            identifier,
            message,
            subject: None,
            email_provider: None,
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_email_provider(mut self, email_provider: EmailProviderConfig) -> Self {
        self.email_provider = Some(email_provider);
        self
    }
}

/// Input of an attachment email
#[derive(Debug, Clone)]
pub struct AttachmentRequest {
    pub to: Identifier,
    pub bcc: Option<String>,
    pub subject: String,
    pub message: String,
    pub attachments: Vec<Attachment>,
    pub email_provider: EmailProviderConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(GenerateStatus::Done.code(), 0);
        assert_eq!(GenerateStatus::TooFrequent.code(), 1102);
        assert_eq!(ValidateStatus::Valid.code(), 0);
        assert_eq!(ValidateStatus::Valid.message(), "Verified");
        assert_eq!(ValidateStatus::Expired.code(), 1100);
        assert_eq!(ValidateStatus::Invalid.code(), 1101);
        assert_eq!(ValidateStatus::MaximumAttempts.code(), 1104);
    }

    #[test]
    fn test_template_precedence() {
        assert_eq!(
            MessageSource::from_parts(Some("{{.Code}}".to_string()), Purpose::Login),
            MessageSource::Template("{{.Code}}".to_string())
        );
        assert_eq!(
            MessageSource::from_parts(Some(String::new()), Purpose::Login),
            MessageSource::Purpose(Purpose::Login)
        );
        assert_eq!(
            MessageSource::from_parts(None, Purpose::ResettingPassword),
            MessageSource::Purpose(Purpose::ResettingPassword)
        );
    }
}
