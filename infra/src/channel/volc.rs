//! Volcengine SMS and BytePlus SMS transport
//!
//! Both vendors expose the same `SendSms` OpenAPI action and differ only in
//! endpoint, region and credentials. The rendered message is passed to the
//! vendor template as the `content` parameter.

use std::collections::BTreeMap;

use chrono::Utc;
use msg_core::errors::ChannelError;
use msg_shared::config::{BytePlusConfig, VolcConfig};
use msg_shared::identifier::{is_mainland_china_number, mask_phone_number};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::signer::{RequestSigner, SMS_SERVICE};

const SEND_SMS_ACTION: &str = "SendSms";
const CONTENT_TYPE: &str = "application/json";
const SMS_TAG: &str = "msgs";

/// Which of the two OpenAPI deployments a channel talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmsVendor {
    Volc,
    BytePlus,
}

impl SmsVendor {
    pub fn name(&self) -> &'static str {
        match self {
            SmsVendor::Volc => "volc-sms",
            SmsVendor::BytePlus => "byteplus-sms",
        }
    }
}

/// `SendSms` request body
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct SendSmsRequest {
    pub sms_account: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub sign: String,
    #[serde(rename = "TemplateID")]
    pub template_id: String,
    pub template_param: String,
    pub phone_numbers: String,
    pub tag: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SendSmsResponse {
    response_metadata: Option<ResponseMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ResponseMetadata {
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiError {
    code: Option<String>,
    message: Option<String>,
}

/// SMS channel for Volcengine or BytePlus
#[derive(Clone)]
pub struct VolcSmsChannel {
    http: reqwest::Client,
    vendor: SmsVendor,
    signer: RequestSigner,
    endpoint: String,
    api_version: String,
    account: String,
    sign: String,
    template: String,
    /// Template for mainland China numbers (Volcengine only)
    template_cn: Option<String>,
}

impl VolcSmsChannel {
    /// Build a Volcengine channel; credentials, account, sign and template are required
    pub fn volc(http: reqwest::Client, config: &VolcConfig) -> Result<Self, ChannelError> {
        require("VOLC_ACCESSKEY", &config.access_key)?;
        require("VOLC_SECRETKEY", &config.secret_key)?;
        require("VOLC_ACCOUNT", &config.account)?;
        require("VOLC_SIGN", &config.sign)?;
        require("VOLC_TEMPLATE", &config.template)?;

        Ok(Self {
            http,
            vendor: SmsVendor::Volc,
            signer: RequestSigner::new(
                &config.access_key,
                &config.secret_key,
                &config.region,
                SMS_SERVICE,
            ),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_version: config.api_version.clone(),
            account: config.account.clone(),
            sign: config.sign.clone(),
            template: config.template.clone(),
            template_cn: Some(config.template_cn.clone()).filter(|t| !t.is_empty()),
        })
    }

    /// Build a BytePlus channel; credentials, account and template are required
    pub fn byteplus(http: reqwest::Client, config: &BytePlusConfig) -> Result<Self, ChannelError> {
        require("BYTEPLUS_ACCESSKEY", &config.access_key)?;
        require("BYTEPLUS_SECRETKEY", &config.secret_key)?;
        require("BYTEPLUS_ACCOUNT", &config.account)?;
        require("BYTEPLUS_TEMPLATE", &config.template)?;

        Ok(Self {
            http,
            vendor: SmsVendor::BytePlus,
            signer: RequestSigner::new(
                &config.access_key,
                &config.secret_key,
                &config.region,
                SMS_SERVICE,
            ),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_version: config.api_version.clone(),
            account: config.account.clone(),
            sign: config.sign.clone(),
            template: config.template.clone(),
            template_cn: None,
        })
    }

    pub fn vendor(&self) -> SmsVendor {
        self.vendor
    }

    /// Mainland China numbers use the dedicated template when one is configured
    pub fn template_for(&self, phone: &str) -> &str {
        match &self.template_cn {
            Some(template_cn) if is_mainland_china_number(phone) => template_cn,
            _ => &self.template,
        }
    }

    pub fn build_request(&self, phone: &str, message: &str) -> SendSmsRequest {
        SendSmsRequest {
            sms_account: self.account.clone(),
            sign: self.sign.clone(),
            template_id: self.template_for(phone).to_string(),
            template_param: serde_json::json!({ "content": message }).to_string(),
            phone_numbers: phone.to_string(),
            tag: SMS_TAG.to_string(),
        }
    }

    fn host(&self) -> &str {
        let without_scheme = self
            .endpoint
            .strip_prefix("https://")
            .or_else(|| self.endpoint.strip_prefix("http://"))
            .unwrap_or(&self.endpoint);
        without_scheme.split('/').next().unwrap_or(without_scheme)
    }

    /// Send a text message to one phone number
    pub async fn send(&self, phone: &str, message: &str) -> Result<(), ChannelError> {
        let provider = self.vendor.name();
        let body = serde_json::to_vec(&self.build_request(phone, message))
            .map_err(|e| ChannelError::delivery(provider, format!("encoding failed: {}", e)))?;

        let query = BTreeMap::from([
            ("Action", SEND_SMS_ACTION),
            ("Version", self.api_version.as_str()),
        ]);
        let signed = self
            .signer
            .sign("POST", self.host(), &query, CONTENT_TYPE, &body, Utc::now())
            .map_err(|e| ChannelError::delivery(provider, format!("signing failed: {}", e)))?;

        debug!(phone = %mask_phone_number(phone), provider, "Sending SMS");

        let response = self
            .http
            .post(format!("{}/", self.endpoint))
            .query(&[("Action", SEND_SMS_ACTION), ("Version", self.api_version.as_str())])
            .header("Content-Type", CONTENT_TYPE)
            .header("X-Date", &signed.x_date)
            .header("X-Content-Sha256", &signed.content_sha256)
            .header("Authorization", &signed.authorization)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                error!(phone = %mask_phone_number(phone), provider, error = %e, "SMS request failed");
                ChannelError::delivery(provider, e.to_string())
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ChannelError::delivery(provider, e.to_string()))?;

        if !status.is_success() {
            error!(phone = %mask_phone_number(phone), provider, status = %status, "SMS vendor rejected request");
            return Err(ChannelError::delivery(provider, format!("HTTP {}: {}", status, text)));
        }

        check_response(provider, &text)?;

        info!(phone = %mask_phone_number(phone), provider, "SMS sent");
        Ok(())
    }
}

/// A 2xx answer can still carry an error in its response metadata
pub(crate) fn check_response(provider: &str, body: &str) -> Result<(), ChannelError> {
    let parsed: SendSmsResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(_) => return Ok(()),
    };

    match parsed.response_metadata.and_then(|m| m.error) {
        Some(err) => Err(ChannelError::delivery(
            provider,
            format!(
                "{}: {}",
                err.code.unwrap_or_default(),
                err.message.unwrap_or_default()
            ),
        )),
        None => Ok(()),
    }
}

fn require(field: &str, value: &str) -> Result<(), ChannelError> {
    if value.trim().is_empty() {
        return Err(ChannelError::missing_config(field));
    }
    Ok(())
}
