//! Non-production shortcuts that accept a code without consulting the store

use msg_shared::VerificationPolicyConfig;

use crate::domain::value_objects::{Identifier, IdentifierKind};

/// Which rule accepted the code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BypassReason {
    /// Development mode accepts every code
    DevMode,
    /// Email domain is allow-listed and the email bypass code was supplied
    AllowListedDomain,
    /// The phone bypass code was supplied
    PhoneBypassCode,
}

/// Bypass rules, loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct BypassPolicy {
    dev_mode: bool,
    email_domains: Vec<String>,
    email_bypass_code: Option<String>,
    phone_bypass_code: Option<String>,
}

impl BypassPolicy {
    pub fn new(
        dev_mode: bool,
        email_domains: Vec<String>,
        email_bypass_code: Option<String>,
        phone_bypass_code: Option<String>,
    ) -> Self {
        Self {
            dev_mode,
            email_domains: email_domains
                .into_iter()
                .map(|d| d.trim().to_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
            email_bypass_code: email_bypass_code.filter(|c| !c.is_empty()),
            phone_bypass_code: phone_bypass_code.filter(|c| !c.is_empty()),
        }
    }

    pub fn from_config(config: &VerificationPolicyConfig) -> Self {
        Self::new(
            config.dev_mode,
            config.email_domains.clone(),
            config.email_bypass_code.clone(),
            config.phone_bypass_code.clone(),
        )
    }

    /// Policy with every rule switched off
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.dev_mode || self.email_bypass_code.is_some() || self.phone_bypass_code.is_some()
    }

    /// Returns the rule that accepts `supplied` for `identifier`, if any
    pub fn evaluate(&self, identifier: &Identifier, supplied: &str) -> Option<BypassReason> {
        if self.dev_mode {
            return Some(BypassReason::DevMode);
        }

        match identifier.kind() {
            IdentifierKind::Email => {
                let code = self.email_bypass_code.as_deref()?;
                let domain = identifier.domain()?;
                let listed = self.email_domains.iter().any(|d| d == domain);
                (listed && supplied == code).then_some(BypassReason::AllowListedDomain)
            }
            IdentifierKind::Phone => {
                let code = self.phone_bypass_code.as_deref()?;
                (supplied == code).then_some(BypassReason::PhoneBypassCode)
            }
        }
    }
}
