use serde::{Deserialize, Serialize};
use validator::Validate;

use msg_core::domain::value_objects::{Attachment, EmailProviderConfig, Identifier};
use msg_core::errors::{ChannelError, DomainResult};
use msg_core::services::verification::AttachmentRequest;

/// Per-request email vendor credentials
#[derive(Clone, Serialize, Deserialize)]
pub struct EmailProviderDto {
    /// `postmark` or `mailchimp`
    pub provider: String,
    pub api_key: String,
    pub sender: String,
}

impl EmailProviderDto {
    pub fn into_config(self) -> Result<EmailProviderConfig, ChannelError> {
        EmailProviderConfig::new(&self.provider, &self.api_key, &self.sender)
    }
}

impl std::fmt::Debug for EmailProviderDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailProviderDto")
            .field("provider", &self.provider)
            .field("api_key", &"***")
            .field("sender", &self.sender)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AttachmentDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    /// Base64 encoded file content
    pub content: String,

    #[validate(length(min = 1, max = 255))]
    pub content_type: String,

    #[serde(default)]
    pub content_id: Option<String>,
}

impl From<AttachmentDto> for Attachment {
    fn from(dto: AttachmentDto) -> Self {
        let attachment = Attachment::new(dto.name, dto.content, dto.content_type);
        match dto.content_id {
            Some(content_id) if !content_id.is_empty() => attachment.with_content_id(content_id),
            _ => attachment,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AttachmentEmailRequest {
    #[validate(length(min = 1, max = 254))]
    pub to: String,

    #[validate(length(max = 254))]
    #[serde(default)]
    pub bcc: Option<String>,

    #[validate(length(max = 998))]
    pub subject: String,

    /// HTML body
    pub message: String,

    #[validate]
    pub attachments: Vec<AttachmentDto>,

    pub email_provider: EmailProviderDto,
}

impl AttachmentEmailRequest {
    /// Convert into the service request; attachment contents are checked by the service
    pub fn into_domain(self) -> DomainResult<AttachmentRequest> {
        Ok(AttachmentRequest {
            to: Identifier::new(&self.to),
            bcc: self.bcc,
            subject: self.subject,
            message: self.message,
            attachments: self.attachments.into_iter().map(Attachment::from).collect(),
            email_provider: self.email_provider.into_config()?,
        })
    }
}

/// Body of a successful send
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendResponse {
    pub success: bool,
}
