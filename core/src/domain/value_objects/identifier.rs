//! Recipient identifier: a phone number or an email address.

use std::fmt;

use msg_shared::identifier::{
    domain_from_address, is_email, is_mainland_china_number, mask_identifier,
    normalize_identifier,
};

/// Kind of recipient, decided by the presence of `@`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    Phone,
    Email,
}

/// Recipient identifier as supplied by the caller
///
/// The trimmed original form is the delivery destination. The store key is
/// the trimmed, lowercased form, so `User@Example.com` and `user@example.com`
/// share one record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    destination: String,
    key: String,
}

impl Identifier {
    pub fn new(raw: &str) -> Self {
        Self {
            destination: raw.trim().to_string(),
            key: normalize_identifier(raw),
        }
    }

    /// Address to deliver to
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Key under which the verification record is stored
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> IdentifierKind {
        if is_email(&self.key) {
            IdentifierKind::Email
        } else {
            IdentifierKind::Phone
        }
    }

    pub fn is_email(&self) -> bool {
        self.kind() == IdentifierKind::Email
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }

    /// Lowercased domain of an email identifier
    pub fn domain(&self) -> Option<&str> {
        match self.kind() {
            IdentifierKind::Email => Some(domain_from_address(&self.key)),
            IdentifierKind::Phone => None,
        }
    }

    /// Mainland China numbers get a dedicated SMS template
    pub fn is_mainland_china_phone(&self) -> bool {
        self.kind() == IdentifierKind::Phone && is_mainland_china_number(&self.destination)
    }

    /// Log-safe rendering
    pub fn masked(&self) -> String {
        mask_identifier(&self.destination)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_detection() {
        assert_eq!(Identifier::new("+8613800138000").kind(), IdentifierKind::Phone);
        assert_eq!(Identifier::new("user@example.com").kind(), IdentifierKind::Email);
    }

    #[test]
    fn test_key_is_normalized() {
        let id = Identifier::new("  User@Example.COM ");
        assert_eq!(id.key(), "user@example.com");
        assert_eq!(id.destination(), "User@Example.COM");
        assert_eq!(id.key(), Identifier::new("user@example.com").key());
    }

    #[test]
    fn test_domain() {
        assert_eq!(Identifier::new("qa@Test.Example").domain(), Some("test.example"));
        assert_eq!(Identifier::new("+1234567890").domain(), None);
    }

    #[test]
    fn test_mainland_china_phone() {
        assert!(Identifier::new("+8613800138000").is_mainland_china_phone());
        assert!(Identifier::new("8613800138000").is_mainland_china_phone());
        assert!(!Identifier::new("+6591234567").is_mainland_china_phone());
    }

    #[test]
    fn test_display_is_masked() {
        let id = Identifier::new("+1234567890");
        assert_eq!(id.to_string(), "+******7890");
    }
}
