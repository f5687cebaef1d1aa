//! Request and response bodies

pub mod email;
pub mod verification;

pub use email::{AttachmentDto, AttachmentEmailRequest, EmailProviderDto, SendResponse};
pub use verification::{GenerateCodeRequest, StatusResponse, ValidateCodeRequest};
