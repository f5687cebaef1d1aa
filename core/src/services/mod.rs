//! Business services containing domain logic and use cases.

pub mod verification;

// Re-export commonly used types
pub use verification::{
    render_template, select_route, AttachmentRequest, BypassPolicy, BypassReason,
    ChannelResolver, CodeStore, DeliveryChannel, GenerateRequest, GenerateStatus,
    MessageSource, Route, ValidateStatus, VerificationService, VerificationServiceConfig,
};
