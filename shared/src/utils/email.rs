//! Email address utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Pragmatic address shape check; deliverability is the mail provider's concern
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)+$").unwrap()
});

/// Canonical form used for storing and looking up administrator emails.
///
/// Surrounding whitespace is removed and ASCII letters are lowercased, so
/// `" Admin@Example.ORG "` and `"admin@example.org"` resolve to the same
/// administrator.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// Check if an email address has a plausible `local@domain.tld` shape
pub fn is_valid_email(email: &str) -> bool {
    let normalized = normalize_email(email);
    normalized.len() <= 254 && EMAIL_REGEX.is_match(&normalized)
}

/// Mask an email address for logs (e.g., a***n@example.org)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let chars: Vec<char> = local.chars().collect();
            let masked_local = match chars.len() {
                0 => String::new(),
                1 => "*".to_string(),
                2 => format!("{}*", chars[0]),
                n => format!("{}***{}", chars[0], chars[n - 1]),
            };
            format!("{}@{}", masked_local, domain)
        }
        None => "***".to_string(),
    }
}
