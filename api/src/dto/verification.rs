use serde::{Deserialize, Serialize};
use validator::Validate;

use msg_core::domain::value_objects::{Identifier, Purpose};
use msg_core::errors::DomainResult;
use msg_core::services::verification::{
    GenerateRequest, GenerateStatus, MessageSource, ValidateStatus,
};

use super::email::EmailProviderDto;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateCodeRequest {
    /// Phone number or email address
    #[validate(length(min = 1, max = 254))]
    pub identifier: String,

    /// 0 registration, 1 login, 2 password reset, 3 account binding
    #[serde(default)]
    pub purpose: Option<i32>,

    /// Message template; `{{.Code}}` is replaced by the code
    #[validate(length(max = 4096))]
    #[serde(default)]
    pub template: Option<String>,

    /// Email subject, ignored for SMS
    #[validate(length(max = 998))]
    #[serde(default)]
    pub subject: Option<String>,

    /// Required when the identifier is an email address
    #[serde(default)]
    pub email_provider: Option<EmailProviderDto>,
}

impl GenerateCodeRequest {
    /// Convert into the service request, checking purpose and provider
    pub fn into_domain(self) -> DomainResult<GenerateRequest> {
        let purpose = match self.purpose {
            Some(value) => Purpose::try_from(value)?,
            None => Purpose::default(),
        };

        let mut request = GenerateRequest::new(
            Identifier::new(&self.identifier),
            MessageSource::from_parts(self.template, purpose),
        );
        if let Some(subject) = self.subject {
            request = request.with_subject(subject);
        }
        if let Some(provider) = self.email_provider {
            request = request.with_email_provider(provider.into_config()?);
        }
        Ok(request)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ValidateCodeRequest {
    #[validate(length(min = 1, max = 254))]
    pub identifier: String,

    #[validate(length(min = 1, max = 16))]
    pub code: String,
}

/// Policy outcome body shared by generate and validate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub code: i32,
    pub message: String,
}

impl From<GenerateStatus> for StatusResponse {
    fn from(status: GenerateStatus) -> Self {
        Self {
            status: format!("{:?}", status),
            code: status.code(),
            message: status.message().to_string(),
        }
    }
}

impl From<ValidateStatus> for StatusResponse {
    fn from(status: ValidateStatus) -> Self {
        Self {
            status: format!("{:?}", status),
            code: status.code(),
            message: status.message().to_string(),
        }
    }
}
