//! Traits for code storage and message delivery integration

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::entities::VerificationRecord;
use crate::domain::value_objects::{Attachment, EmailProviderConfig, Identifier};
use crate::errors::{ChannelError, StoreError};

/// Key-value store holding at most one record per identifier
#[async_trait]
pub trait CodeStore: Send + Sync {
    /// Fetch the record; a missing, expired or undecodable entry is `None`
    async fn get(&self, identifier: &Identifier) -> Result<Option<VerificationRecord>, StoreError>;
    /// Store the record, replacing any previous one and resetting its TTL
    async fn put(
        &self,
        identifier: &Identifier,
        record: &VerificationRecord,
        ttl: Duration,
    ) -> Result<(), StoreError>;
    /// Remove the record
    async fn delete(&self, identifier: &Identifier) -> Result<(), StoreError>;
}

/// A vendor able to deliver messages to one kind of destination
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    /// Send a code message; `subject` is ignored by SMS vendors
    async fn send_code(
        &self,
        destination: &str,
        subject: &str,
        message: &str,
    ) -> Result<(), ChannelError>;

    /// Send a message with file attachments
    async fn send_with_attachment(
        &self,
        destination: &str,
        bcc: Option<&str>,
        subject: &str,
        message: &str,
        attachments: &[Attachment],
    ) -> Result<(), ChannelError>;

    /// Vendor name used in logs and errors
    fn provider_name(&self) -> &'static str;
}

/// Picks the delivery channel for an identifier
pub trait ChannelResolver: Send + Sync {
    type Channel: DeliveryChannel;

    fn resolve(
        &self,
        identifier: &Identifier,
        email_provider: Option<&EmailProviderConfig>,
    ) -> Result<Self::Channel, ChannelError>;
}
