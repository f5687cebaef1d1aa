//! File attachment carried by an email.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};

/// Attachment with base64-encoded content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,

    /// Base64 (standard alphabet) file content
    pub content: String,

    pub content_type: String,

    /// Set for inline attachments referenced from the HTML body
    pub content_id: Option<String>,
}

impl Attachment {
    pub fn new(
        name: impl Into<String>,
        content: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            content_type: content_type.into(),
            content_id: None,
        }
    }

    pub fn with_content_id(mut self, content_id: impl Into<String>) -> Self {
        self.content_id = Some(content_id.into());
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "attachment name must not be empty".to_string(),
            });
        }
        if self.content_type.trim().is_empty() {
            return Err(DomainError::Validation {
                message: format!("attachment {} has no content type", self.name),
            });
        }
        STANDARD.decode(self.content.as_bytes()).map_err(|e| DomainError::Validation {
            message: format!("attachment {} is not valid base64: {}", self.name, e),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_attachment() {
        let attachment = Attachment::new("report.txt", "aGVsbG8gd29ybGQ=", "text/plain");
        assert!(attachment.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_base64() {
        let attachment = Attachment::new("report.txt", "not base64!", "text/plain");
        assert!(matches!(attachment.validate(), Err(DomainError::Validation { .. })));
    }

    #[test]
    fn test_rejects_missing_name() {
        let attachment = Attachment::new("", "aGVsbG8=", "text/plain");
        assert!(attachment.validate().is_err());
    }

    #[test]
    fn test_content_id() {
        let attachment = Attachment::new("logo.png", "aGVsbG8=", "image/png").with_content_id("cid:logo");
        assert_eq!(attachment.content_id.as_deref(), Some("cid:logo"));
    }
}
