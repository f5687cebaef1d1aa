//! Identifier utilities
//!
//! An identifier is either a phone number or an email address. The two are
//! told apart solely by the presence of `@`; no further syntax checks are
//! made here.

/// Check whether an identifier is an email address
pub fn is_email(identifier: &str) -> bool {
    identifier.contains('@')
}

/// Extract the domain part of an email address
///
/// Returns an empty string when there is no `@`. Only the segment after the
/// first `@` is returned, matching how allow-listed domains are compared.
pub fn domain_from_address(address: &str) -> &str {
    address.split('@').nth(1).unwrap_or("")
}

/// Normalize an identifier for use as a store key
pub fn normalize_identifier(identifier: &str) -> String {
    identifier.trim().to_lowercase()
}

/// Check whether a phone number belongs to mainland China (`86` / `+86`)
pub fn is_mainland_china_number(phone: &str) -> bool {
    phone.starts_with("86") || phone.starts_with("+86")
}

/// Mask a phone number for logging, keeping only the last 4 digits
///
/// ```
/// use msg_shared::identifier::mask_phone_number;
/// assert_eq!(mask_phone_number("+1234567890"), "+******7890");
/// ```
pub fn mask_phone_number(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }

    let visible = 4;
    let masked_count = chars.len() - visible;
    let last_digits: String = chars[chars.len() - visible..].iter().collect();

    if phone.starts_with('+') {
        format!("+{}{}", "*".repeat(masked_count - 1), last_digits)
    } else {
        format!("{}{}", "*".repeat(masked_count), last_digits)
    }
}

/// Mask an email address for logging (`u***@example.com`)
pub fn mask_email(address: &str) -> String {
    match address.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) => format!("{}***@{}", first, domain),
            None => format!("***@{}", domain),
        },
        None => "***".to_string(),
    }
}

/// Mask any identifier for logging
pub fn mask_identifier(identifier: &str) -> String {
    if is_email(identifier) {
        mask_email(identifier)
    } else {
        mask_phone_number(identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_email() {
        assert!(is_email("user@example.com"));
        assert!(is_email("@"));
        assert!(!is_email("+85291234567"));
    }

    #[test]
    fn test_domain_from_address() {
        assert_eq!(domain_from_address("user@example.com"), "example.com");
        assert_eq!(domain_from_address("a@b@c"), "b");
        assert_eq!(domain_from_address("+85291234567"), "");
    }

    #[test]
    fn test_normalize_identifier() {
        assert_eq!(normalize_identifier("  User@Example.COM "), "user@example.com");
        assert_eq!(normalize_identifier("+8613800138000"), "+8613800138000");
    }

    #[test]
    fn test_mask_phone_number() {
        assert_eq!(mask_phone_number("+1234567890"), "+******7890");
        assert_eq!(mask_phone_number("1234567890"), "******7890");
        assert_eq!(mask_phone_number("123"), "***");
        assert_eq!(mask_phone_number("1234"), "****");
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("user@example.com"), "u***@example.com");
        assert_eq!(mask_email("@example.com"), "***@example.com");
        assert_eq!(mask_identifier("user@example.com"), "u***@example.com");
        assert_eq!(mask_identifier("+85291234567"), "+*******4567");
    }

    #[test]
    fn test_is_mainland_china_number() {
        assert!(is_mainland_china_number("+8613800138000"));
        assert!(is_mainland_china_number("8613800138000"));
        assert!(!is_mainland_china_number("+85291234567"));
    }
}
