//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborators the verification service
//! depends on.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Cache**: Redis client with retry, Redis-backed and in-memory code stores
//! - **Channel**: the vendor registry and the HTTP transports for Postmark,
//!   Mailchimp Transactional, Volcengine SMS and BytePlus SMS

// Re-export core types for convenience
pub use msg_core::errors::*;

/// Cache module - Redis client and code stores
pub mod cache;

/// Channel module - vendor registry and transports
pub mod channel;

pub use cache::{InMemoryCodeStore, RedisClient, RedisCodeStore};
pub use channel::{Channel, VendorRegistry};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP client error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Record encoding error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Vendor configuration error
    #[error(transparent)]
    Channel(#[from] ChannelError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for StoreError {
    fn from(err: InfrastructureError) -> Self {
        StoreError::unavailable(err.to_string())
    }
}
