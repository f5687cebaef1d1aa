//! Per-request email provider selection.

use std::fmt;
use std::str::FromStr;

use crate::errors::ChannelError;

/// Supported email vendors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailProvider {
    Postmark,
    /// Mailchimp Transactional (Mandrill)
    Mailchimp,
}

impl EmailProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailProvider::Postmark => "POSTMARK",
            EmailProvider::Mailchimp => "MAILCHIMP",
        }
    }
}

impl fmt::Display for EmailProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmailProvider {
    type Err = ChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "POSTMARK" => Ok(EmailProvider::Postmark),
            "MAILCHIMP" => Ok(EmailProvider::Mailchimp),
            _ => Err(ChannelError::UnsupportedProvider {
                provider: s.to_string(),
            }),
        }
    }
}

/// Email vendor credentials supplied with a request
#[derive(Clone, PartialEq, Eq)]
pub struct EmailProviderConfig {
    provider: EmailProvider,
    api_key: String,
    sender: String,
}

impl EmailProviderConfig {
    /// Validates the raw request fields
    ///
    /// An empty provider name or key or sender is `MissingConfig`; an unknown
    /// provider name is `UnsupportedProvider`.
    pub fn new(provider: &str, api_key: &str, sender: &str) -> Result<Self, ChannelError> {
        if provider.trim().is_empty() {
            return Err(ChannelError::missing_config("email_provider.provider"));
        }
        let provider = provider.parse::<EmailProvider>()?;

        if api_key.trim().is_empty() {
            return Err(ChannelError::missing_config("email_provider.api_key"));
        }
        if sender.trim().is_empty() {
            return Err(ChannelError::missing_config("email_provider.sender"));
        }

        Ok(Self {
            provider,
            api_key: api_key.trim().to_string(),
            sender: sender.trim().to_string(),
        })
    }

    pub fn provider(&self) -> EmailProvider {
        self.provider
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }
}

impl fmt::Debug for EmailProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailProviderConfig")
            .field("provider", &self.provider)
            .field("api_key", &"***")
            .field("sender", &self.sender)
            .finish()
    }
}
