//! Verification policy configuration
//!
//! Static inputs to the bypass rules and message rendering. Loaded once at
//! startup; an empty bypass code disables that bypass.

use serde::{Deserialize, Serialize};

use super::env_string;

/// Process-wide verification settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VerificationPolicyConfig {
    /// Prefix of purpose-based messages and default email subjects
    #[serde(default)]
    pub app_name: String,

    /// Accept every code for every identifier
    #[serde(default)]
    pub dev_mode: bool,

    /// Email domains allowed to use the email bypass code (lowercase)
    #[serde(default)]
    pub email_domains: Vec<String>,

    /// Static code accepted for allow-listed email domains
    #[serde(default)]
    pub email_bypass_code: Option<String>,

    /// Static code accepted for any phone number
    #[serde(default)]
    pub phone_bypass_code: Option<String>,
}

impl VerificationPolicyConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(env_string)
    }

    /// Build from an arbitrary key lookup (environment, test fixtures)
    pub fn from_lookup<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            app_name: get("APP_NAME").unwrap_or_default(),
            dev_mode: get("VERIFICATION_DEV_MODE")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            email_domains: get("EMAIL_DOMAINS")
                .map(|v| parse_domains(&v))
                .unwrap_or_default(),
            email_bypass_code: get("EMAIL_BYPASS_CODE").filter(|c| !c.is_empty()),
            phone_bypass_code: get("PHONE_BYPASS_CODE").filter(|c| !c.is_empty()),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn parse_domains(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|d| d.trim().to_lowercase())
        .filter(|d| !d.is_empty())
        .collect()
}
