//! Mailchimp Transactional (Mandrill) email transport

use msg_core::domain::Attachment;
use msg_core::errors::ChannelError;
use msg_shared::identifier::mask_email;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

const MANDRILL_SEND_URL: &str = "https://mandrillapp.com/api/1.0/messages/send";
const PROVIDER: &str = "mailchimp";
const RECIPIENT_NAME: &str = "Recipient";

#[derive(Debug, Serialize)]
pub struct MandrillRequest<'a> {
    pub key: &'a str,
    pub message: MandrillMessage<'a>,
}

#[derive(Debug, Serialize)]
pub struct MandrillMessage<'a> {
    pub from_email: &'a str,
    pub subject: &'a str,
    pub text: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub html: &'a str,
    pub to: Vec<MandrillRecipient<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc_address: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<MandrillAttachment<'a>>,
}

#[derive(Debug, Serialize)]
pub struct MandrillRecipient<'a> {
    pub email: &'a str,
    pub name: &'a str,
    #[serde(rename = "type")]
    pub kind: &'a str,
}

#[derive(Debug, Serialize)]
pub struct MandrillAttachment<'a> {
    #[serde(rename = "type")]
    pub content_type: &'a str,
    pub name: &'a str,
    pub content: &'a str,
}

/// Per-recipient result returned by `messages/send`
#[derive(Debug, Deserialize)]
struct MandrillResult {
    #[serde(default)]
    status: String,
    #[serde(default)]
    reject_reason: Option<String>,
}

/// Mailchimp Transactional channel bound to one API key and sender
#[derive(Clone)]
pub struct MailchimpChannel {
    http: reqwest::Client,
    api_key: String,
    sender: String,
}

impl MailchimpChannel {
    pub fn new(http: reqwest::Client, api_key: &str, sender: &str) -> Self {
        Self {
            http,
            api_key: api_key.to_string(),
            sender: sender.to_string(),
        }
    }

    /// The message goes out both as text and as HTML
    pub fn build_request<'a>(
        &'a self,
        to: &'a str,
        bcc: Option<&'a str>,
        subject: &'a str,
        message: &'a str,
        attachments: &'a [Attachment],
    ) -> MandrillRequest<'a> {
        MandrillRequest {
            key: &self.api_key,
            message: MandrillMessage {
                from_email: &self.sender,
                subject,
                text: message,
                html: message,
                to: vec![MandrillRecipient {
                    email: to,
                    name: RECIPIENT_NAME,
                    kind: "to",
                }],
                bcc_address: bcc,
                attachments: attachments
                    .iter()
                    .map(|a| MandrillAttachment {
                        content_type: &a.content_type,
                        name: &a.name,
                        content: &a.content,
                    })
                    .collect(),
            },
        }
    }

    pub async fn send(&self, request: &MandrillRequest<'_>) -> Result<(), ChannelError> {
        let to = request
            .message
            .to
            .first()
            .map(|r| mask_email(r.email))
            .unwrap_or_default();

        let response = self
            .http
            .post(MANDRILL_SEND_URL)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(to = %to, error = %e, "Mailchimp request failed");
                ChannelError::delivery(PROVIDER, e.to_string())
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ChannelError::delivery(PROVIDER, e.to_string()))?;

        if !status.is_success() {
            error!(to = %to, status = %status, "Mailchimp rejected email");
            return Err(ChannelError::delivery(PROVIDER, format!("HTTP {}: {}", status, text)));
        }

        check_results(&text)?;

        info!(to = %to, "Mailchimp email sent");
        Ok(())
    }
}

/// `rejected` and `invalid` recipients fail the delivery
pub(crate) fn check_results(body: &str) -> Result<(), ChannelError> {
    let results: Vec<MandrillResult> = match serde_json::from_str(body) {
        Ok(results) => results,
        Err(_) => return Ok(()),
    };

    match results
        .iter()
        .find(|r| r.status == "rejected" || r.status == "invalid")
    {
        Some(failed) => Err(ChannelError::delivery(
            PROVIDER,
            format!(
                "recipient {}: {}",
                failed.status,
                failed.reject_reason.as_deref().unwrap_or("no reason given")
            ),
        )),
        None => Ok(()),
    }
}
