//! Shared utilities and common types for the messaging service
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types loaded once at process start
//! - The error envelope returned by the API
//! - Identifier utilities (email detection, masking)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, Environment, LogFormat, LoggingConfig, ServerConfig, SmsConfig,
    SmsProviderKind, StoreBackend, VerificationPolicyConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::identifier;
