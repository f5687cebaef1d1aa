//! Route handlers
//!
//! - `verification` - code generation and validation
//! - `email` - attachment email

pub mod email;
pub mod verification;
