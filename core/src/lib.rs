//! # Messaging Core
//!
//! Core business logic for the verification-code service: domain entities
//! and value objects, the error taxonomy, the collaborator traits the
//! infrastructure layer implements, and the lifecycle manager that issues and
//! validates one-time codes.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
