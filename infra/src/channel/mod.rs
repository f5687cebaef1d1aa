//! Delivery channels
//!
//! The `VendorRegistry` turns an identifier (plus, for email, the provider
//! settings carried by the request) into a `Channel`. Email channels are built
//! per request; the SMS channel is built once at startup from the deployment
//! configuration and shared.

pub mod mailchimp;
pub mod postmark;
pub mod signer;
pub mod volc;

use std::time::Duration;

use async_trait::async_trait;
use msg_core::domain::{Attachment, EmailProvider, EmailProviderConfig, Identifier};
use msg_core::errors::ChannelError;
use msg_core::services::verification::{select_route, ChannelResolver, DeliveryChannel, Route};
use msg_shared::config::{SmsConfig, SmsProviderKind};
use tracing::info;

use crate::InfrastructureError;

pub use mailchimp::MailchimpChannel;
pub use postmark::PostmarkChannel;
pub use volc::{SmsVendor, VolcSmsChannel};

/// A resolved vendor, dispatched statically
#[derive(Clone)]
pub enum Channel {
    Postmark(PostmarkChannel),
    Mailchimp(MailchimpChannel),
    VolcSms(VolcSmsChannel),
    BytePlusSms(VolcSmsChannel),
}

#[async_trait]
impl DeliveryChannel for Channel {
    async fn send_code(
        &self,
        destination: &str,
        subject: &str,
        message: &str,
    ) -> Result<(), ChannelError> {
        match self {
            Channel::Postmark(channel) => {
                let email = channel.build_email(
                    destination,
                    None,
                    subject,
                    message,
                    postmark::CODE_TAG,
                    &[],
                );
                channel.send(&email).await
            }
            Channel::Mailchimp(channel) => {
                let request = channel.build_request(destination, None, subject, message, &[]);
                channel.send(&request).await
            }
            Channel::VolcSms(channel) | Channel::BytePlusSms(channel) => {
                channel.send(destination, message).await
            }
        }
    }

    async fn send_with_attachment(
        &self,
        destination: &str,
        bcc: Option<&str>,
        subject: &str,
        message: &str,
        attachments: &[Attachment],
    ) -> Result<(), ChannelError> {
        match self {
            Channel::Postmark(channel) => {
                let email = channel.build_email(
                    destination,
                    bcc,
                    subject,
                    message,
                    postmark::ATTACHMENT_TAG,
                    attachments,
                );
                channel.send(&email).await
            }
            Channel::Mailchimp(channel) => {
                let request =
                    channel.build_request(destination, bcc, subject, message, attachments);
                channel.send(&request).await
            }
            Channel::VolcSms(_) | Channel::BytePlusSms(_) => {
                Err(ChannelError::UnsupportedOperation {
                    provider: self.provider_name().to_string(),
                    operation: "attachments".to_string(),
                })
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        match self {
            Channel::Postmark(_) => "postmark",
            Channel::Mailchimp(_) => "mailchimp",
            Channel::VolcSms(channel) | Channel::BytePlusSms(channel) => channel.vendor().name(),
        }
    }
}

/// Builds channels for identifiers
#[derive(Clone)]
pub struct VendorRegistry {
    http: reqwest::Client,
    sms: Channel,
}

impl VendorRegistry {
    /// Build the registry and the deployment-wide SMS channel
    ///
    /// Fails on an unknown SMS provider or missing SMS credentials.
    pub fn from_config(config: &SmsConfig) -> Result<Self, InfrastructureError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        let kind = config
            .provider_kind()
            .map_err(|provider| ChannelError::UnsupportedProvider { provider })?;

        let sms = match kind {
            SmsProviderKind::Volc => Channel::VolcSms(VolcSmsChannel::volc(http.clone(), &config.volc)?),
            SmsProviderKind::BytePlus => {
                Channel::BytePlusSms(VolcSmsChannel::byteplus(http.clone(), &config.byteplus)?)
            }
        };

        info!(sms_provider = sms.provider_name(), "Vendor registry initialized");

        Ok(Self { http, sms })
    }

    pub fn sms_provider(&self) -> &'static str {
        self.sms.provider_name()
    }

    fn email_channel(&self, config: &EmailProviderConfig) -> Channel {
        match config.provider() {
            EmailProvider::Postmark => Channel::Postmark(PostmarkChannel::new(
                self.http.clone(),
                config.api_key(),
                config.sender(),
            )),
            EmailProvider::Mailchimp => Channel::Mailchimp(MailchimpChannel::new(
                self.http.clone(),
                config.api_key(),
                config.sender(),
            )),
        }
    }
}

impl ChannelResolver for VendorRegistry {
    type Channel = Channel;

    fn resolve(
        &self,
        identifier: &Identifier,
        email_provider: Option<&EmailProviderConfig>,
    ) -> Result<Channel, ChannelError> {
        match select_route(identifier, email_provider)? {
            Route::Email(config) => Ok(self.email_channel(config)),
            Route::Sms => Ok(self.sms.clone()),
        }
    }
}
