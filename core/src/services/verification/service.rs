//! Main verification service implementation

use std::sync::Arc;

use chrono::Utc;

use crate::domain::entities::VerificationRecord;
use crate::domain::value_objects::{Identifier, Purpose};
use crate::errors::{DomainError, DomainResult};

use super::bypass::BypassPolicy;
use super::config::VerificationServiceConfig;
use super::key_lock::KeyedLocks;
use super::template::render_template;
use super::traits::{ChannelResolver, CodeStore, DeliveryChannel};
use super::types::{
    AttachmentRequest, GenerateRequest, GenerateStatus, MessageSource, ValidateStatus,
};

/// Issues, delivers and validates one-time codes
pub struct VerificationService<S: CodeStore, R: ChannelResolver> {
    /// Record storage
    store: Arc<S>,
    /// Vendor selection
    resolver: Arc<R>,
    /// Non-production shortcuts for validation
    bypass: BypassPolicy,
    /// Service configuration
    config: VerificationServiceConfig,
    /// Serializes operations on one identifier
    locks: KeyedLocks,
}

impl<S: CodeStore, R: ChannelResolver> VerificationService<S, R> {
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `store` - Code store implementation
    /// * `resolver` - Channel resolver implementation
    /// * `bypass` - Bypass rules applied before any store access on validation
    /// * `config` - Service configuration
    pub fn new(
        store: Arc<S>,
        resolver: Arc<R>,
        bypass: BypassPolicy,
        config: VerificationServiceConfig,
    ) -> Self {
        if bypass.is_active() {
            tracing::warn!(
                event = "bypass_enabled",
                "Verification bypass rules are active; do not run this configuration in production"
            );
        }

        Self {
            store,
            resolver,
            bypass,
            config,
            locks: KeyedLocks::new(),
        }
    }

    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Generate a code, deliver it and remember it
    ///
    /// This method:
    /// 1. Rejects the call when the previous code is younger than the cooldown
    /// 2. Draws a new code and renders the message
    /// 3. Resolves the channel and delivers the message
    /// 4. Stores the record with a fresh TTL, only after delivery succeeded
    ///
    /// # Returns
    ///
    /// * `Ok(GenerateStatus::Done)` - Code sent and stored
    /// * `Ok(GenerateStatus::TooFrequent)` - Cooldown still running, nothing sent
    /// * `Err(DomainError)` - Store, template, configuration or delivery failure
    pub async fn generate_and_send(&self, request: GenerateRequest) -> DomainResult<GenerateStatus> {
        let identifier = &request.identifier;
        if identifier.is_empty() {
            return Err(DomainError::Validation {
                message: "identifier must not be empty".to_string(),
            });
        }

        let _guard = self.locks.lock(identifier.key()).await;

        if let Some(existing) = self.store.get(identifier).await? {
            if existing.is_within_cooldown(self.config.resend_cooldown(), Utc::now()) {
                tracing::warn!(
                    identifier = %identifier,
                    event = "resend_too_frequent",
                    "Verification code requested within cooldown"
                );
                return Ok(GenerateStatus::TooFrequent);
            }
        }

        let code = VerificationRecord::generate_code();
        let (subject, body) = self.compose_message(&request, &code)?;

        let channel = self
            .resolver
            .resolve(identifier, request.email_provider.as_ref())?;
        channel
            .send_code(identifier.destination(), &subject, &body)
            .await
            .map_err(|e| {
                tracing::error!(
                    identifier = %identifier,
                    provider = channel.provider_name(),
                    error = %e,
                    event = "code_delivery_failed",
                    "Failed to deliver verification code"
                );
                e
            })?;

        let record = VerificationRecord::issue(code);
        self.store
            .put(identifier, &record, self.config.code_ttl())
            .await?;

        tracing::info!(
            identifier = %identifier,
            provider = channel.provider_name(),
            event = "code_sent",
            "Verification code sent"
        );

        Ok(GenerateStatus::Done)
    }

    /// Check a supplied code against the stored record
    ///
    /// Bypass rules are applied first and never touch the store. A correct
    /// code consumes the record. A wrong code is counted, and once the count
    /// reaches the limit the next attempt drops the record.
    pub async fn validate(&self, identifier: &Identifier, supplied: &str) -> DomainResult<ValidateStatus> {
        if let Some(reason) = self.bypass.evaluate(identifier, supplied) {
            tracing::info!(
                identifier = %identifier,
                reason = ?reason,
                event = "code_bypassed",
                "Verification accepted by bypass rule"
            );
            return Ok(ValidateStatus::Valid);
        }

        if identifier.is_empty() {
            return Err(DomainError::Validation {
                message: "identifier must not be empty".to_string(),
            });
        }

        let _guard = self.locks.lock(identifier.key()).await;

        let mut record = match self.store.get(identifier).await? {
            Some(record) => record,
            None => {
                tracing::info!(
                    identifier = %identifier,
                    event = "code_expired",
                    "No live verification code"
                );
                return Ok(ValidateStatus::Expired);
            }
        };

        if record.matches(supplied) {
            self.store.delete(identifier).await?;
            tracing::info!(
                identifier = %identifier,
                event = "code_verified",
                "Verification code accepted"
            );
            return Ok(ValidateStatus::Valid);
        }

        if record.attempts_exhausted(self.config.max_attempts) {
            if let Err(e) = self.store.delete(identifier).await {
                tracing::warn!(
                    identifier = %identifier,
                    error = %e,
                    "Failed to drop exhausted verification code"
                );
            }
            tracing::warn!(
                identifier = %identifier,
                attempts = record.attempt,
                event = "max_attempts_reached",
                "Verification attempts exhausted"
            );
            return Ok(ValidateStatus::MaximumAttempts);
        }

        record.record_failed_attempt();
        self.store
            .put(identifier, &record, self.config.code_ttl())
            .await?;

        tracing::warn!(
            identifier = %identifier,
            attempt = record.attempt,
            max_attempts = self.config.max_attempts,
            event = "code_rejected",
            "Wrong verification code"
        );

        Ok(ValidateStatus::Invalid)
    }

    /// Send an email with attachments through the requested provider
    pub async fn send_email_with_attachment(&self, request: AttachmentRequest) -> DomainResult<()> {
        if !request.to.is_email() {
            return Err(DomainError::Validation {
                message: "attachments can only be sent to an email address".to_string(),
            });
        }
        for attachment in &request.attachments {
            attachment.validate()?;
        }

        let channel = self
            .resolver
            .resolve(&request.to, Some(&request.email_provider))?;
        channel
            .send_with_attachment(
                request.to.destination(),
                request.bcc.as_deref().filter(|b| !b.trim().is_empty()),
                &request.subject,
                &request.message,
                &request.attachments,
            )
            .await?;

        tracing::info!(
            to = %request.to,
            provider = channel.provider_name(),
            attachments = request.attachments.len(),
            event = "attachment_email_sent",
            "Email with attachments sent"
        );

        Ok(())
    }

    /// Subject and body for a code message
    fn compose_message(&self, request: &GenerateRequest, code: &str) -> DomainResult<(String, String)> {
        let subject = request
            .subject
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| self.config.default_subject());

        let body = match &request.message {
            MessageSource::Template(template) => render_template(template, code)?,
            MessageSource::Purpose(purpose) => {
                self.default_body(*purpose, code, request.identifier.is_email())
            }
        };

        Ok((subject, body))
    }

    fn default_body(&self, purpose: Purpose, code: &str, html: bool) -> String {
        if html {
            format!("{}{}:<strong>{}</strong>", self.config.app_name, purpose.phrase(), code)
        } else {
            format!("{}{}: {}", self.config.app_name, purpose.phrase(), code)
        }
    }
}
