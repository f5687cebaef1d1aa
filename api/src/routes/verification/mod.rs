//! Verification code route handlers

pub mod generate;
pub mod validate;

pub use generate::generate;
pub use validate::validate;
