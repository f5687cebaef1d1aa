//! Value objects representing immutable domain concepts.

pub mod attachment;
pub mod email_provider;
pub mod identifier;
pub mod purpose;

// Re-export commonly used types
pub use attachment::Attachment;
pub use email_provider::{EmailProvider, EmailProviderConfig};
pub use identifier::{Identifier, IdentifierKind};
pub use purpose::Purpose;
