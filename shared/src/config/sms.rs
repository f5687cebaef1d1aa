//! SMS provider configuration
//!
//! One SMS provider is selected per deployment. Credentials for both known
//! providers are read so the selection can be switched without code changes.

use serde::{Deserialize, Serialize};

use super::{env_parse, env_string};

/// Known SMS providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SmsProviderKind {
    /// Volcengine SMS (mainland China and global)
    Volc,
    /// BytePlus SMS (international)
    BytePlus,
}

impl SmsProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SmsProviderKind::Volc => "volc",
            SmsProviderKind::BytePlus => "byteplus",
        }
    }
}

impl std::str::FromStr for SmsProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "volc" | "volcengine" => Ok(SmsProviderKind::Volc),
            "byteplus" => Ok(SmsProviderKind::BytePlus),
            other => Err(other.to_string()),
        }
    }
}

/// Volcengine SMS credentials and templates
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VolcConfig {
    pub access_key: String,
    pub secret_key: String,
    pub account: String,
    pub sign: String,
    /// Template used for numbers outside mainland China
    pub template: String,
    /// Template used for `86` / `+86` numbers
    pub template_cn: String,
    pub endpoint: String,
    pub region: String,
    pub api_version: String,
}

impl Default for VolcConfig {
    fn default() -> Self {
        Self {
            access_key: String::new(),
            secret_key: String::new(),
            account: String::new(),
            sign: String::new(),
            template: String::new(),
            template_cn: String::new(),
            endpoint: String::from("https://sms.volcengineapi.com"),
            region: String::from("cn-north-1"),
            api_version: String::from("2020-01-01"),
        }
    }
}

/// BytePlus SMS credentials and template
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BytePlusConfig {
    pub access_key: String,
    pub secret_key: String,
    pub account: String,
    pub sign: String,
    pub template: String,
    pub endpoint: String,
    pub region: String,
    pub api_version: String,
}

impl Default for BytePlusConfig {
    fn default() -> Self {
        Self {
            access_key: String::new(),
            secret_key: String::new(),
            account: String::new(),
            sign: String::new(),
            template: String::new(),
            endpoint: String::from("https://sms.byteplusapi.com"),
            region: String::from("ap-singapore-1"),
            api_version: String::from("2020-01-01"),
        }
    }
}

/// SMS service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    /// Raw provider name as configured ("volc", "byteplus")
    pub provider: String,
    pub volc: VolcConfig,
    pub byteplus: BytePlusConfig,
    /// Upper bound for a single provider request
    pub request_timeout_secs: u64,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: String::from("volc"),
            volc: VolcConfig::default(),
            byteplus: BytePlusConfig::default(),
            request_timeout_secs: 10,
        }
    }
}

impl SmsConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::from_lookup(env_string);
        config.request_timeout_secs = env_parse("SMS_REQUEST_TIMEOUT_SECS", config.request_timeout_secs);
        config
    }

    /// Build from an arbitrary key lookup (environment, test fixtures)
    pub fn from_lookup<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let volc_defaults = VolcConfig::default();
        let byteplus_defaults = BytePlusConfig::default();

        Self {
            provider: get("SMS_PROVIDER").unwrap_or(defaults.provider),
            volc: VolcConfig {
                access_key: get("VOLC_ACCESSKEY").unwrap_or_default(),
                secret_key: get("VOLC_SECRETKEY").unwrap_or_default(),
                account: get("VOLC_ACCOUNT").unwrap_or_default(),
                sign: get("VOLC_SIGN").unwrap_or_default(),
                template: get("VOLC_TEMPLATE").unwrap_or_default(),
                template_cn: get("VOLC_TEMPLATE_CN").unwrap_or_default(),
                endpoint: get("VOLC_ENDPOINT").unwrap_or(volc_defaults.endpoint),
                region: get("VOLC_REGION").unwrap_or(volc_defaults.region),
                api_version: get("VOLC_API_VERSION").unwrap_or(volc_defaults.api_version),
            },
            byteplus: BytePlusConfig {
                access_key: get("BYTEPLUS_ACCESSKEY").unwrap_or_default(),
                secret_key: get("BYTEPLUS_SECRETKEY").unwrap_or_default(),
                account: get("BYTEPLUS_ACCOUNT").unwrap_or_default(),
                sign: get("BYTEPLUS_SIGN").unwrap_or_default(),
                template: get("BYTEPLUS_TEMPLATE").unwrap_or_default(),
                endpoint: get("BYTEPLUS_ENDPOINT").unwrap_or(byteplus_defaults.endpoint),
                region: get("BYTEPLUS_REGION").unwrap_or(byteplus_defaults.region),
                api_version: get("BYTEPLUS_API_VERSION").unwrap_or(byteplus_defaults.api_version),
            },
            request_timeout_secs: defaults.request_timeout_secs,
        }
    }

    /// Resolve the configured provider name into a known kind
    ///
    /// Returns the unrecognised name on failure.
    pub fn provider_kind(&self) -> Result<SmsProviderKind, String> {
        self.provider.parse()
    }
}
