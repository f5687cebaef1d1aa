//! Configuration for the verification service

use std::time::Duration;

use msg_shared::VerificationPolicyConfig;

use crate::domain::entities::verification_record::{
    CODE_TTL_SECONDS, MAX_ATTEMPTS, RESEND_COOLDOWN_SECONDS,
};

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Lifetime of a stored record, refreshed on every write
    pub code_ttl_seconds: u64,
    /// Minimum seconds between two generations for one identifier
    pub resend_cooldown_seconds: i64,
    /// Failed validations tolerated before the record is dropped
    pub max_attempts: u32,
    /// Application name prefixed to default messages and subjects
    pub app_name: String,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_ttl_seconds: CODE_TTL_SECONDS,
            resend_cooldown_seconds: RESEND_COOLDOWN_SECONDS,
            max_attempts: MAX_ATTEMPTS,
            app_name: "Messaging".to_string(),
        }
    }
}

impl VerificationServiceConfig {
    pub fn from_policy(policy: &VerificationPolicyConfig) -> Self {
        Self {
            app_name: policy.app_name.clone(),
            ..Self::default()
        }
    }

    pub fn code_ttl(&self) -> Duration {
        Duration::from_secs(self.code_ttl_seconds)
    }

    pub fn resend_cooldown(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.resend_cooldown_seconds)
    }

    pub fn default_subject(&self) -> String {
        format!("{} verification code", self.app_name)
    }
}
