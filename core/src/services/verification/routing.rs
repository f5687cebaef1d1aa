//! Channel selection rule shared by every resolver

use crate::domain::value_objects::{EmailProviderConfig, Identifier, IdentifierKind};
use crate::errors::ChannelError;

/// Which kind of channel an identifier is delivered through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    /// Email vendor named by the request
    Email(&'a EmailProviderConfig),
    /// The process-wide SMS vendor
    Sms,
}

/// Email identifiers need per-request provider settings; phone identifiers
/// always go to the configured SMS vendor and ignore any email settings.
pub fn select_route<'a>(
    identifier: &Identifier,
    email_provider: Option<&'a EmailProviderConfig>,
) -> Result<Route<'a>, ChannelError> {
    match identifier.kind() {
        IdentifierKind::Email => email_provider
            .map(Route::Email)
            .ok_or_else(|| ChannelError::missing_config("email_provider")),
        IdentifierKind::Phone => Ok(Route::Sms),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_requires_provider() {
        let id = Identifier::new("user@example.com");
        assert_eq!(
            select_route(&id, None),
            Err(ChannelError::missing_config("email_provider"))
        );

        let config = EmailProviderConfig::new("POSTMARK", "token", "noreply@example.com").unwrap();
        assert_eq!(select_route(&id, Some(&config)), Ok(Route::Email(&config)));
    }

    #[test]
    fn test_phone_ignores_email_provider() {
        let id = Identifier::new("+1234567890");
        let config = EmailProviderConfig::new("MAILCHIMP", "key", "noreply@example.com").unwrap();
        assert_eq!(select_route(&id, Some(&config)), Ok(Route::Sms));
        assert_eq!(select_route(&id, None), Ok(Route::Sms));
    }
}
