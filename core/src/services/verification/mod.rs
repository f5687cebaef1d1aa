//! Verification service module
//!
//! This module provides the one-time code lifecycle:
//! - Code generation with a resend cooldown
//! - Message rendering from a template or a purpose
//! - Delivery through the channel picked for the identifier
//! - Validation with attempt tracking and bypass rules

mod bypass;
mod config;
mod key_lock;
mod routing;
mod service;
mod template;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use bypass::{BypassPolicy, BypassReason};
pub use config::VerificationServiceConfig;
pub use key_lock::{KeyGuard, KeyedLocks};
pub use routing::{select_route, Route};
pub use service::VerificationService;
pub use template::{render_template, CodeTemplate};
pub use traits::{ChannelResolver, CodeStore, DeliveryChannel};
pub use types::{
    AttachmentRequest, GenerateRequest, GenerateStatus, MessageSource, ValidateStatus,
};
