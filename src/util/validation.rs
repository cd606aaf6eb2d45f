use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("compile email regex")
});

const EMAIL_MAX: usize = 254;
const PASSWORD_MIN: usize = 8;

/// Shape check for `local@domain.tld`-looking addresses. Deliberately
/// loose: deliverability is the mail server's problem, not ours.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email) && email.len() <= EMAIL_MAX
}

/// Minimum password policy: at least 8 characters with at least one
/// ASCII letter and one ASCII digit.
pub fn is_valid_password(pass: &str) -> bool {
    pass.len() >= PASSWORD_MIN
        && pass.chars().any(|c| c.is_ascii_alphabetic())
        && pass.chars().any(|c| c.is_ascii_digit())
}
