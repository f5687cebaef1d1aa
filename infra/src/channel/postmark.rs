//! Postmark email transport

use msg_core::domain::Attachment;
use msg_core::errors::ChannelError;
use msg_shared::identifier::mask_email;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

const POSTMARK_API_URL: &str = "https://api.postmarkapp.com/email";
const PROVIDER: &str = "postmark";

/// Tag for verification-code mails
pub const CODE_TAG: &str = "verification-code";
/// Tag for mails carrying attachments
pub const ATTACHMENT_TAG: &str = "attachment";

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PostmarkEmail<'a> {
    pub from: &'a str,
    pub to: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc: Option<&'a str>,
    pub subject: &'a str,
    pub html_body: &'a str,
    pub tag: &'a str,
    pub track_opens: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<PostmarkAttachment<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PostmarkAttachment<'a> {
    pub name: &'a str,
    pub content: &'a str,
    pub content_type: &'a str,
    #[serde(rename = "ContentID", skip_serializing_if = "Option::is_none")]
    pub content_id: Option<&'a str>,
}

impl<'a> From<&'a Attachment> for PostmarkAttachment<'a> {
    fn from(attachment: &'a Attachment) -> Self {
        Self {
            name: &attachment.name,
            content: &attachment.content,
            content_type: &attachment.content_type,
            content_id: attachment.content_id.as_deref(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PostmarkResponse {
    #[serde(default)]
    error_code: i64,
    #[serde(default)]
    message: String,
}

/// Postmark channel bound to one server token and sender
#[derive(Clone)]
pub struct PostmarkChannel {
    http: reqwest::Client,
    server_token: String,
    sender: String,
}

impl PostmarkChannel {
    pub fn new(http: reqwest::Client, server_token: &str, sender: &str) -> Self {
        Self {
            http,
            server_token: server_token.to_string(),
            sender: sender.to_string(),
        }
    }

    pub fn build_email<'a>(
        &'a self,
        to: &'a str,
        bcc: Option<&'a str>,
        subject: &'a str,
        html_body: &'a str,
        tag: &'a str,
        attachments: &'a [Attachment],
    ) -> PostmarkEmail<'a> {
        PostmarkEmail {
            from: &self.sender,
            to,
            bcc,
            subject,
            html_body,
            tag,
            track_opens: true,
            attachments: attachments.iter().map(PostmarkAttachment::from).collect(),
        }
    }

    pub async fn send(&self, email: &PostmarkEmail<'_>) -> Result<(), ChannelError> {
        let response = self
            .http
            .post(POSTMARK_API_URL)
            .header("Accept", "application/json")
            .header("X-Postmark-Server-Token", &self.server_token)
            .json(email)
            .send()
            .await
            .map_err(|e| {
                error!(to = %mask_email(email.to), error = %e, "Postmark request failed");
                ChannelError::delivery(PROVIDER, e.to_string())
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ChannelError::delivery(PROVIDER, e.to_string()))?;

        if !status.is_success() {
            error!(to = %mask_email(email.to), status = %status, "Postmark rejected email");
            return Err(ChannelError::delivery(PROVIDER, format!("HTTP {}: {}", status, text)));
        }

        if let Ok(parsed) = serde_json::from_str::<PostmarkResponse>(&text) {
            if parsed.error_code != 0 {
                return Err(ChannelError::delivery(
                    PROVIDER,
                    format!("error {}: {}", parsed.error_code, parsed.message),
                ));
            }
        }

        info!(to = %mask_email(email.to), tag = email.tag, "Postmark email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_email_payload() {
        let channel = PostmarkChannel::new(reqwest::Client::new(), "token", "noreply@example.com");
        let email = channel.build_email(
            "user@example.com",
            None,
            "Acme verification code",
            "Acme login code:<strong>4821</strong>",
            CODE_TAG,
            &[],
        );
        let json = serde_json::to_value(&email).unwrap();

        assert_eq!(json["From"], "noreply@example.com");
        assert_eq!(json["To"], "user@example.com");
        assert_eq!(json["Subject"], "Acme verification code");
        assert_eq!(json["HtmlBody"], "Acme login code:<strong>4821</strong>");
        assert_eq!(json["Tag"], "verification-code");
        assert_eq!(json["TrackOpens"], true);
        assert!(json.get("Bcc").is_none());
        assert!(json.get("Attachments").is_none());
    }

    #[test]
    fn test_attachment_email_payload() {
        let channel = PostmarkChannel::new(reqwest::Client::new(), "token", "noreply@example.com");
        let attachments = vec![
            Attachment::new("report.txt", "aGVsbG8=", "text/plain"),
            Attachment::new("logo.png", "aGVsbG8=", "image/png").with_content_id("cid:logo"),
        ];
        let email = channel.build_email(
            "user@example.com",
            Some("audit@example.com"),
            "Report",
            "<p>Attached</p>",
            ATTACHMENT_TAG,
            &attachments,
        );
        let json = serde_json::to_value(&email).unwrap();

        assert_eq!(json["Bcc"], "audit@example.com");
        assert_eq!(json["Tag"], "attachment");
        assert_eq!(json["Attachments"][0]["Name"], "report.txt");
        assert_eq!(json["Attachments"][0]["ContentType"], "text/plain");
        assert!(json["Attachments"][0].get("ContentID").is_none());
        assert_eq!(json["Attachments"][1]["ContentID"], "cid:logo");
    }
}
