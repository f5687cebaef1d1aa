//! Domain entities representing core business objects.

pub mod verification_record;


// Re-export commonly used types
pub use verification_record::{
    VerificationRecord, CODE_MAX, CODE_MIN, CODE_TTL_SECONDS, MAX_ATTEMPTS,
    RESEND_COOLDOWN_SECONDS,
};
