//! Phone number helpers shared by the dispatchers and logging

use once_cell::sync::Lazy;
use regex::Regex;

// E.164 destination, as produced by `dialable_destination`
static E164_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+[1-9]\d{1,14}$").expect("E.164 pattern is valid")
});

/// Keep only ASCII digits
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Compose an international destination from its parts.
///
/// Non-digits in the call code are dropped (`"+36"` and `"36"` compose the
/// same way). Area call number and subscriber number are appended as stored.
pub fn dialable_destination(country_call_code: &str, area_call_number: &str, subscriber: &str) -> String {
    format!(
        "+{}{}{}",
        digits_only(country_call_code),
        area_call_number.trim(),
        subscriber.trim()
    )
}

/// Check that a destination is in E.164 form
pub fn is_valid_e164(phone: &str) -> bool {
    E164_REGEX.is_match(phone)
}

/// Mask a phone number for logs (e.g., +36****4567)
pub fn mask_phone_number(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().filter(|c| !c.is_whitespace()).collect();
    if chars.len() >= 7 {
        let head: String = chars[..3].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}****{}", head, tail)
    } else {
        "****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialable_destination() {
        assert_eq!(dialable_destination("36", "30", "1234567"), "+36301234567");
        assert_eq!(dialable_destination("+852", "", "12345678"), "+85212345678");
        assert_eq!(dialable_destination("1-264", "4", "123456"), "+12644123456");
    }

    #[test]
    fn test_is_valid_e164() {
        assert!(is_valid_e164("+36301234567"));
        assert!(!is_valid_e164("36301234567"));
        assert!(!is_valid_e164("+0123456"));
        assert!(!is_valid_e164("+3630 1234567"));
    }

    #[test]
    fn test_mask_phone_number() {
        assert_eq!(mask_phone_number("+36301234567"), "+36****4567");
        assert_eq!(mask_phone_number("12345"), "****");
    }

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only("+1-264"), "1264");
        assert_eq!(digits_only(""), "");
    }
}
