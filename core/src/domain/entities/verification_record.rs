//! Verification record entity: the single ephemeral state kept per identifier.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Maximum number of failed validations tolerated before the record is dropped
pub const MAX_ATTEMPTS: u32 = 3;

/// Absolute lifetime of a record, refreshed on every store write (5 minutes)
pub const CODE_TTL_SECONDS: u64 = 300;

/// Minimum interval between two generations for the same identifier
pub const RESEND_COOLDOWN_SECONDS: i64 = 60;

/// Smallest code that can be drawn
pub const CODE_MIN: u32 = 1000;

/// Largest code that can be drawn
pub const CODE_MAX: u32 = 9999;

/// Stored state for one identifier
///
/// Serialized as a self-describing JSON object
/// `{"code": "4821", "attempt": 0, "issuedAt": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRecord {
    /// Numeric code as sent to the user
    pub code: String,

    /// Failed validations since issuance
    pub attempt: u32,

    /// Time of the last (re)generation
    pub issued_at: DateTime<Utc>,
}

impl VerificationRecord {
    /// Creates a fresh record for a newly sent code
    pub fn issue(code: impl Into<String>) -> Self {
        Self::issue_at(code, Utc::now())
    }

    /// Creates a fresh record with an explicit issuance time
    pub fn issue_at(code: impl Into<String>, issued_at: DateTime<Utc>) -> Self {
        Self {
            code: code.into(),
            attempt: 0,
            issued_at,
        }
    }

    /// Draws a 4-digit code in `CODE_MIN..=CODE_MAX`
    ///
    /// The draw is neither checked against earlier codes nor meant to resist
    /// prediction; the cooldown and attempt limit bound guessing.
    pub fn generate_code() -> String {
        let mut rng = rand::thread_rng();
        rng.gen_range(CODE_MIN..=CODE_MAX).to_string()
    }

    /// Whether the record was issued less than `cooldown` before `now`
    pub fn is_within_cooldown(&self, cooldown: Duration, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.issued_at) < cooldown
    }

    /// Exact string comparison, no normalization of the supplied code
    pub fn matches(&self, supplied: &str) -> bool {
        self.code == supplied
    }

    /// Whether `max_attempts` failed validations have already been recorded
    pub fn attempts_exhausted(&self, max_attempts: u32) -> bool {
        self.attempt >= max_attempts
    }

    /// Counts one more failed validation
    pub fn record_failed_attempt(&mut self) {
        self.attempt = self.attempt.saturating_add(1);
    }
}
